use thiserror::Error;

use crate::node::Kind;

/// The main error type for jsontree operations.
///
/// Every fallible operation reports through this type. A failed mutator
/// leaves its container exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("syntax error at byte offset {offset}: {reason}")]
    Syntax { offset: usize, reason: &'static str },

    #[error("nesting depth exceeds the limit of {limit}")]
    NestingLimit { limit: usize, offset: Option<usize> },

    #[error("failed to allocate {requested} byte(s)")]
    Allocation { requested: usize },

    #[error("output does not fit in the {capacity}-byte buffer")]
    BufferTooSmall { capacity: usize },

    #[error("expected {expected} node, found {found}")]
    TypeMismatch { expected: &'static str, found: Kind },

    #[error("index {index} is out of range for {len} member(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no member with key '{key}'")]
    KeyNotFound { key: String },

    #[error("node is not a member of this container")]
    NodeNotFound,

    #[error("cannot mutate the members of a reference container")]
    BorrowedMembers,
}

impl Error {
    /// Byte offset in the parser input where the error was detected, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. } => Some(*offset),
            Error::NestingLimit { offset, .. } => *offset,
            _ => None,
        }
    }

    pub(crate) fn syntax(offset: usize, reason: &'static str) -> Self {
        Error::Syntax { offset, reason }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
