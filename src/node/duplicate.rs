use std::borrow::Cow;

use super::members::Members;
use super::model::{Node, NodeId, Value};
use crate::error::{Error, Result};
use crate::parse::NESTING_LIMIT;

impl Node<'_> {
    /// Copies this node into fully owned storage.
    ///
    /// With `recursive` set the whole subtree is copied; otherwise arrays and
    /// objects come back empty. Borrowed text, keys and member lists in the
    /// source all become owned copies, so the result shares no storage with
    /// `self` and outlives it.
    ///
    /// # Errors
    /// Returns [`Error::NestingLimit`] if the subtree is nested deeper than
    /// [`NESTING_LIMIT`].
    pub fn duplicate(&self, recursive: bool) -> Result<Node<'static>> {
        duplicate_at(self, recursive, 0)
    }
}

fn duplicate_at(node: &Node<'_>, recursive: bool, depth: usize) -> Result<Node<'static>> {
    if depth > NESTING_LIMIT {
        return Err(Error::NestingLimit {
            limit: NESTING_LIMIT,
            offset: None,
        });
    }

    let value = match &node.value {
        Value::Null => Value::Null,
        Value::False => Value::False,
        Value::True => Value::True,
        Value::Number(number) => Value::Number(*number),
        Value::String(text) => Value::String(owned(text)),
        Value::Raw(text) => Value::Raw(owned(text)),
        Value::Array(members) => Value::Array(duplicate_members(members, recursive, depth)?),
        Value::Object(members) => Value::Object(duplicate_members(members, recursive, depth)?),
    };

    Ok(Node {
        id: NodeId::fresh(),
        key: node.key.as_ref().map(owned),
        value,
    })
}

fn duplicate_members(
    members: &Members<'_>,
    recursive: bool,
    depth: usize,
) -> Result<Members<'static>> {
    if !recursive {
        return Ok(Members::new());
    }
    let source = members.as_slice();
    let mut copies = Vec::with_capacity(source.len());
    for member in source {
        copies.push(Box::new(duplicate_at(member, true, depth + 1)?));
    }
    Ok(Members::Owned(copies))
}

fn owned(text: &Cow<'_, str>) -> Cow<'static, str> {
    Cow::Owned(text.as_ref().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::node::KeyCase;

    #[test]
    fn shallow_copy_drops_members() {
        let mut object = Node::object();
        object.add_number("a", 1).expect("add");
        let copy = object.duplicate(false).expect("duplicate");
        assert!(copy.is_object());
        assert!(copy.is_empty());
    }

    #[test]
    fn deep_copy_is_structurally_equal() {
        let mut object = Node::object();
        object.add_array("list").expect("add list").add_to_array(Node::string("x")).expect("push");
        object.add_raw("raw", "{\"pre\":true}").expect("add raw");
        let copy = object.duplicate(true).expect("duplicate");
        assert!(compare(&object, &copy, KeyCase::Sensitive));
    }

    #[test]
    fn copies_of_references_are_owned() {
        let key = String::from("k");
        let shared = Node::string_array(&["a", "b"]);
        let mut object = Node::object();
        object.add_to_object_ref(&key, Node::reference(&shared)).expect("attach");

        let copy = object.duplicate(true).expect("duplicate");
        let member = copy.get("k").expect("member copied");
        assert!(!member.is_key_reference());
        assert!(!member.is_reference());
        assert_eq!(member.len(), 2);
        assert_ne!(member.get_index(0).map(Node::id), shared.get_index(0).map(Node::id));
    }

    #[test]
    fn mutating_copy_leaves_source_alone() {
        let source = Node::int_array(&[1, 2]);
        let mut copy = source.duplicate(true).expect("duplicate");
        copy.delete(0).expect("delete");
        copy.add_to_array(Node::null()).expect("push");
        assert_eq!(source.to_string(), "[1,2]");
        assert_eq!(copy.to_string(), "[2,null]");
    }

    #[test]
    fn too_deep_tree_is_refused() {
        let mut root = Node::array();
        for _ in 0..NESTING_LIMIT + 1 {
            let mut outer = Node::array();
            outer.add_to_array(root).expect("push");
            root = outer;
        }
        assert!(matches!(
            root.duplicate(true),
            Err(Error::NestingLimit { .. })
        ));
        assert!(root.duplicate(false).is_ok());
    }
}
