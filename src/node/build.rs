//! Node constructors and object member helpers.
//!
//! Every constructor returns a detached node. Owned constructors copy the
//! supplied text; `*_ref` constructors and [`Node::reference`] borrow it, and
//! the borrow checker makes sure the source outlives the new node.

use std::borrow::Cow;

use super::members::Members;
use super::model::{Node, Value};
use super::number::Number;
use crate::error::Result;

impl<'a> Node<'a> {
    pub fn null() -> Self {
        Self::from_value(Value::Null)
    }

    pub fn bool(value: bool) -> Self {
        Self::from_value(if value { Value::True } else { Value::False })
    }

    pub fn r#true() -> Self {
        Self::bool(true)
    }

    pub fn r#false() -> Self {
        Self::bool(false)
    }

    pub fn number(value: impl Into<Number>) -> Self {
        Self::from_value(Value::Number(value.into()))
    }

    /// Creates a string node holding an owned copy of `text`.
    pub fn string(text: &str) -> Self {
        Self::from_value(Value::String(Cow::Owned(text.to_owned())))
    }

    /// Creates a string node that borrows `text` without copying it.
    pub fn string_ref(text: &'a str) -> Self {
        Self::from_value(Value::String(Cow::Borrowed(text)))
    }

    /// Creates a raw node from pre-rendered JSON text.
    ///
    /// The text is not validated; the printer emits it as-is.
    pub fn raw(json: &str) -> Self {
        Self::from_value(Value::Raw(Cow::Owned(json.to_owned())))
    }

    /// Creates a raw node that borrows `json` without copying it.
    pub fn raw_ref(json: &'a str) -> Self {
        Self::from_value(Value::Raw(Cow::Borrowed(json)))
    }

    pub fn array() -> Self {
        Self::from_value(Value::Array(Members::new()))
    }

    pub fn object() -> Self {
        Self::from_value(Value::Object(Members::new()))
    }

    /// Creates a reference node aliasing `target`.
    ///
    /// Text and member lists are borrowed, not copied; scalar payloads are
    /// copied by value. The new node has no key. Dropping it never frees
    /// anything owned by `target`.
    pub fn reference(target: &'a Node<'a>) -> Self {
        let value = match &target.value {
            Value::Null => Value::Null,
            Value::False => Value::False,
            Value::True => Value::True,
            Value::Number(number) => Value::Number(*number),
            Value::String(text) => Value::String(Cow::Borrowed(text.as_ref())),
            Value::Raw(text) => Value::Raw(Cow::Borrowed(text.as_ref())),
            Value::Array(members) => Value::Array(Members::Borrowed(members.as_slice())),
            Value::Object(members) => Value::Object(Members::Borrowed(members.as_slice())),
        };
        Self::from_value(value)
    }

    /// Creates an array of numbers from `i32` values.
    pub fn int_array(values: &[i32]) -> Self {
        Self::array_of(values.iter().map(|&value| Node::number(value)))
    }

    /// Creates an array of numbers from `f32` values.
    pub fn float_array(values: &[f32]) -> Self {
        Self::array_of(values.iter().map(|&value| Node::number(value)))
    }

    /// Creates an array of numbers from `f64` values.
    pub fn double_array(values: &[f64]) -> Self {
        Self::array_of(values.iter().map(|&value| Node::number(value)))
    }

    /// Creates an array of owned string copies.
    pub fn string_array<S: AsRef<str>>(values: &[S]) -> Self {
        Self::array_of(values.iter().map(|value| Node::string(value.as_ref())))
    }

    fn array_of(items: impl Iterator<Item = Node<'a>>) -> Self {
        let members: Vec<Box<Node<'a>>> = items.map(Box::new).collect();
        Self::from_value(Value::Array(Members::Owned(members)))
    }

    /// Adds a `null` member under an owned copy of `key`.
    pub fn add_null(&mut self, key: &str) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::null())
    }

    pub fn add_bool(&mut self, key: &str, value: bool) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::bool(value))
    }

    pub fn add_true(&mut self, key: &str) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::r#true())
    }

    pub fn add_false(&mut self, key: &str) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::r#false())
    }

    pub fn add_number(&mut self, key: &str, value: impl Into<Number>) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::number(value))
    }

    pub fn add_string(&mut self, key: &str, text: &str) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::string(text))
    }

    pub fn add_raw(&mut self, key: &str, json: &str) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::raw(json))
    }

    /// Adds an empty array member and returns it for further filling.
    pub fn add_array(&mut self, key: &str) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::array())
    }

    /// Adds an empty object member and returns it for further filling.
    pub fn add_object(&mut self, key: &str) -> Result<&mut Node<'a>> {
        self.add_new(key, Node::object())
    }

    fn add_new(&mut self, key: &str, node: Node<'a>) -> Result<&mut Node<'a>> {
        self.add_to_object(key, node)?;
        let members = self.owned_members_mut(None)?;
        // add_to_object just pushed, so the list is non-empty
        let last = members.len() - 1;
        Ok(&mut *members[last])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::node::Kind;

    #[test]
    fn constructors_produce_the_right_kind() {
        assert_eq!(Node::null().kind(), Kind::Null);
        assert_eq!(Node::bool(true).kind(), Kind::True);
        assert_eq!(Node::bool(false).kind(), Kind::False);
        assert_eq!(Node::number(1.5).kind(), Kind::Number);
        assert_eq!(Node::string("s").kind(), Kind::String);
        assert_eq!(Node::raw("[1]").kind(), Kind::Raw);
        assert_eq!(Node::array().kind(), Kind::Array);
        assert_eq!(Node::object().kind(), Kind::Object);
        assert!(Node::object().key().is_none());
    }

    #[test]
    fn aggregate_constructors_preserve_order() {
        let ints = Node::int_array(&[3, 1, 2]);
        let values: Vec<i32> = ints.iter().filter_map(Node::as_int).collect();
        assert_eq!(values, vec![3, 1, 2]);

        let floats = Node::float_array(&[0.5, 1.5]);
        assert_eq!(floats.get_index(1).and_then(Node::as_f64), Some(1.5));

        let doubles = Node::double_array(&[]);
        assert!(doubles.is_array());
        assert!(doubles.is_empty());

        let strings = Node::string_array(&["a", "b"]);
        assert_eq!(strings.get_index(0).and_then(Node::as_str), Some("a"));
        assert!(!strings.get_index(0).map(Node::is_reference).unwrap_or(true));
    }

    #[test]
    fn reference_aliases_without_copying() {
        let source = Node::string("shared");
        let alias = Node::reference(&source);
        assert!(alias.is_reference());
        assert_eq!(
            alias.as_str().map(str::as_ptr),
            source.as_str().map(str::as_ptr)
        );
    }

    #[test]
    fn reference_to_container_shares_members() {
        let source = Node::int_array(&[1, 2, 3]);
        let alias = Node::reference(&source);
        assert!(alias.is_array());
        assert!(alias.is_reference());
        assert_eq!(alias.len(), 3);
        assert_eq!(alias.get_index(0).map(Node::id), source.get_index(0).map(Node::id));
    }

    #[test]
    fn add_helpers_return_the_new_member() {
        let mut object = Node::object();
        object.add_array("list").expect("add array").add_to_array(Node::number(1)).expect("push");
        object.add_null("nothing").expect("add null");
        object.add_bool("flag", false).expect("add bool");

        assert_eq!(object.len(), 3);
        assert_eq!(object.get("list").map(Node::len), Some(1));
        assert!(object.get("nothing").is_some_and(Node::is_null));
        assert!(object.get("flag").is_some_and(Node::is_false));
    }

    #[test]
    fn add_helpers_require_an_object() {
        let mut array = Node::array();
        assert_eq!(
            array.add_null("k").map(|_| ()),
            Err(Error::TypeMismatch {
                expected: "object",
                found: Kind::Array
            })
        );
        assert!(array.is_empty());
    }

    #[test]
    fn borrowed_raw_text_prints_verbatim() {
        let text = String::from("{ \"pre\" : [1, 2] }");
        let mut array = Node::array();
        array.add_to_array(Node::raw_ref(&text)).expect("push");
        let member = array.get_index(0).expect("member");
        assert!(member.is_reference());
        assert_eq!(member.kind(), Kind::Raw);
        assert_eq!(array.to_string(), "[{ \"pre\" : [1, 2] }]");
    }
}
