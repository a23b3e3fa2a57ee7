//! The JSON value tree.
//!
//! A tree is made of [`Node`]s. Each node carries a [`Value`] payload tagged
//! by [`Kind`] and, while it is an object member, a key. Text and member
//! lists are either owned by the node or borrowed from elsewhere:
//!
//! - Owned storage is freed when the node is dropped.
//! - Borrowed storage (reference nodes, `*_ref` constructors) is never freed
//!   by the tree. Lifetimes guarantee it outlives the nodes that alias it.
//!
//! # Example
//!
//! ```
//! use jsontree::{KeyCase, Node};
//!
//! let mut root = Node::object();
//! root.add_string("name", "tree").unwrap();
//! let list = root.add_array("list").unwrap();
//! list.add_to_array(Node::number(1)).unwrap();
//! list.add_to_array(Node::bool(true)).unwrap();
//!
//! root.replace_by_key("name", KeyCase::Sensitive, Node::null()).unwrap();
//! assert_eq!(root.to_string(), r#"{"name":null,"list":[1,true]}"#);
//! ```

mod build;
mod duplicate;
mod members;
mod model;
mod mutate;
mod number;

pub use members::Members;
pub use model::{KeyCase, Kind, Node, NodeId, Value};
pub use number::Number;
