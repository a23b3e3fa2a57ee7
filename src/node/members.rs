//! Member storage for arrays and objects.

use super::model::{Node, Value};
use crate::error::{Error, Result};

/// The ordered members of an array or object.
///
/// `Owned` members are dropped with the container. `Borrowed` members alias
/// another container's list; dropping them frees nothing, and they cannot be
/// mutated through this container.
#[derive(Debug)]
pub enum Members<'a> {
    Owned(Vec<Box<Node<'a>>>),
    Borrowed(&'a [Box<Node<'a>>]),
}

impl<'a> Members<'a> {
    pub(crate) fn new() -> Self {
        Members::Owned(Vec::new())
    }

    /// Returns the members as a slice, regardless of ownership.
    pub fn as_slice(&self) -> &[Box<Node<'a>>] {
        match self {
            Members::Owned(nodes) => nodes,
            Members::Borrowed(nodes) => nodes,
        }
    }

    /// Returns true if the members are aliased from another container.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Members::Borrowed(_))
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub(crate) fn owned_mut(&mut self) -> Result<&mut Vec<Box<Node<'a>>>> {
        match self {
            Members::Owned(nodes) => Ok(nodes),
            Members::Borrowed(_) => Err(Error::BorrowedMembers),
        }
    }
}

// Flattens owned subtrees onto a work list so that dropping a deep tree
// never recurses more than one level.
impl Drop for Members<'_> {
    fn drop(&mut self) {
        let Members::Owned(nodes) = self else {
            return;
        };
        let mut pending = std::mem::take(nodes);
        while let Some(mut node) = pending.pop() {
            if let Value::Array(Members::Owned(children)) | Value::Object(Members::Owned(children)) =
                &mut node.value
            {
                pending.append(children);
            }
        }
    }
}
