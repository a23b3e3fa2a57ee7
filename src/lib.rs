//! Jsontree: an in-memory JSON value tree.
//!
//! Trees are built from constructors, parsed from text, or copied with
//! [`Node::duplicate`]. Nodes own their text and members, or borrow them from
//! storage that outlives the tree ([`Node::reference`], [`Node::string_ref`]).
//! Containers are edited through explicit attach, detach, delete and replace
//! operations, then serialized by a printer or checked with [`compare`].
//!
//! # Modules
//!
//! - [`node`]: The value model, constructors and mutators
//! - [`parse`]: Bounded recursive-descent parser
//! - [`print`]: Pretty, compact and preallocated printers, plus [`minify`]
//! - [`compare`]: Structural equality
//! - [`patch`]: JSON Merge Patch apply and generate
//! - [`error`]: Error types for jsontree operations
//!
//! # Example
//!
//! ```
//! use jsontree::{parse, print_unformatted, Node};
//!
//! let mut root = parse(r#"{"a":[1,2,3]}"#).unwrap();
//! let list = root.get_mut("a").unwrap();
//! list.detach(1).unwrap();
//! list.insert(1, Node::bool(true)).unwrap();
//! assert_eq!(print_unformatted(&root).unwrap(), r#"{"a":[1,true,3]}"#);
//! ```
//!
//! Every nested walk (parse, print, duplicate, compare, patch) is bounded by
//! [`NESTING_LIMIT`]. Dropping a tree never recurses.

pub mod compare;
pub mod error;
mod impls;
pub mod node;
pub mod parse;
pub mod patch;
pub mod print;

pub use compare::compare;
pub use error::{Error, Result};
pub use node::{KeyCase, Kind, Members, Node, NodeId, Number, Value};
pub use parse::{
    parse, parse_bytes, parse_with_length, parse_with_opts, InputBound, ParseOptions, Parsed,
    NESTING_LIMIT,
};
pub use patch::{generate_merge_patch, merge_patch};
pub use print::{
    minify, minify_bytes, print, print_buffered, print_preallocated, print_unformatted,
    print_with_opts, Format, PrintOptions, DEFAULT_CAPACITY,
};
