//! The value node and its read-side API.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::members::Members;
use super::number::Number;
use crate::error::{Error, Result};

/// The type tag of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    False,
    True,
    Number,
    String,
    Raw,
    Array,
    Object,
}

impl Kind {
    /// Returns a lowercase name for the kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::False => "false",
            Kind::True => "true",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Raw => "raw",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The payload of a [`Node`]. Exactly one variant per [`Kind`].
///
/// Text payloads are `Cow`: `Cow::Borrowed` text is a reference that is never
/// freed by the tree, `Cow::Owned` text lives and dies with the node.
#[derive(Debug)]
pub enum Value<'a> {
    Null,
    False,
    True,
    Number(Number),
    String(Cow<'a, str>),
    /// Pre-rendered JSON text, emitted verbatim by the printer.
    Raw(Cow<'a, str>),
    Array(Members<'a>),
    Object(Members<'a>),
}

impl Value<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::False => Kind::False,
            Value::True => Kind::True,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Raw(_) => Kind::Raw,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }
}

/// Identity of a node.
///
/// Obtained from [`Node::id`] and accepted by the identity-based mutators.
/// Every node gets a fresh id when it is created, and ids are never reused,
/// so a stale id finds nothing instead of a newer node. Sibling insertions
/// and removals do not affect it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

impl NodeId {
    pub(crate) fn fresh() -> Self {
        NodeId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A node of a JSON value tree.
///
/// A node owns its payload unless it was built as a reference (see
/// [`Node::reference`], [`Node::string_ref`]). Its key is set only while it is
/// a member of an object and carries its own, independent ownership flag.
/// Nodes have no parent pointer: every operation that needs the container
/// takes it as `self`.
#[derive(Debug)]
pub struct Node<'a> {
    pub(crate) id: NodeId,
    pub(crate) key: Option<Cow<'a, str>>,
    pub(crate) value: Value<'a>,
}

impl<'a> Node<'a> {
    pub(crate) fn from_value(value: Value<'a>) -> Self {
        Self {
            id: NodeId::fresh(),
            key: None,
            value,
        }
    }

    /// Returns the payload.
    #[inline]
    pub fn value(&self) -> &Value<'a> {
        &self.value
    }

    /// Consumes the node and returns its payload, dropping the key.
    pub fn into_value(self) -> Value<'a> {
        self.value
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Returns this node's identity token.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    pub fn is_true(&self) -> bool {
        matches!(self.value, Value::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self.value, Value::False)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.value, Value::True | Value::False)
    }

    pub fn is_number(&self) -> bool {
        matches!(self.value, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value, Value::String(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.value, Value::Raw(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.value, Value::Object(_))
    }

    /// Returns true if the payload (text or member list) is borrowed.
    ///
    /// Scalars without heap payload are never references.
    pub fn is_reference(&self) -> bool {
        match &self.value {
            Value::String(text) | Value::Raw(text) => matches!(text, Cow::Borrowed(_)),
            Value::Array(members) | Value::Object(members) => members.is_borrowed(),
            _ => false,
        }
    }

    /// Returns true if the key is borrowed.
    pub fn is_key_reference(&self) -> bool {
        matches!(self.key, Some(Cow::Borrowed(_)))
    }

    /// Returns the key this node is stored under, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::True => Some(true),
            Value::False => Some(false),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self.value {
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|number| number.as_f64())
    }

    /// Returns the clamped integer view of a number node.
    pub fn as_int(&self) -> Option<i32> {
        self.as_number().map(|number| number.as_int())
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match &self.value {
            Value::Raw(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// Returns the member list of an array or object.
    pub fn members(&self) -> Option<&Members<'a>> {
        match &self.value {
            Value::Array(members) | Value::Object(members) => Some(members),
            _ => None,
        }
    }

    pub(crate) fn members_slice(&self) -> &[Box<Node<'a>>] {
        self.members().map(Members::as_slice).unwrap_or(&[])
    }

    /// Number of members. Scalars have none.
    pub fn len(&self) -> usize {
        self.members_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the members of an array or object in order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<'a>> + '_ {
        self.members_slice().iter().map(|member| &**member)
    }

    /// Iterates mutably over owned members.
    ///
    /// # Errors
    /// Returns an error for scalars and reference containers.
    pub fn iter_mut(&mut self) -> Result<impl Iterator<Item = &mut Node<'a>> + '_> {
        let members = self.owned_members_mut(None)?;
        Ok(members.iter_mut().map(|member| &mut **member))
    }

    /// Returns the member at `index`.
    pub fn get_index(&self, index: usize) -> Option<&Node<'a>> {
        self.members_slice().get(index).map(|member| &**member)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Node<'a>> {
        let members = self.owned_members_mut(None).ok()?;
        members.get_mut(index).map(|member| &mut **member)
    }

    /// Returns the first object member whose key equals `key` exactly.
    pub fn get(&self, key: &str) -> Option<&Node<'a>> {
        self.find_key(key, KeyCase::Sensitive)
            .map(|index| &*self.members_slice()[index])
    }

    /// Returns the first object member whose key equals `key` ignoring ASCII case.
    pub fn get_ignore_case(&self, key: &str) -> Option<&Node<'a>> {
        self.find_key(key, KeyCase::Insensitive)
            .map(|index| &*self.members_slice()[index])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node<'a>> {
        let index = self.find_key(key, KeyCase::Sensitive)?;
        self.get_index_mut(index)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_key(key, KeyCase::Sensitive).is_some()
    }

    /// Position of the first object member matching `key`.
    pub(crate) fn find_key(&self, key: &str, case: KeyCase) -> Option<usize> {
        match &self.value {
            Value::Object(members) => members
                .as_slice()
                .iter()
                .position(|member| member.key().is_some_and(|k| case.matches(k, key))),
            _ => None,
        }
    }

    /// Position of the member with identity `id`.
    pub(crate) fn find_id(&self, id: NodeId) -> Option<usize> {
        self.members_slice()
            .iter()
            .position(|member| member.id() == id)
    }

    /// Sets the number of a number node and returns the stored value.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] for any other kind.
    pub fn set_number(&mut self, value: f64) -> Result<f64> {
        match &mut self.value {
            Value::Number(number) => {
                *number = Number::new(value);
                Ok(value)
            }
            other => Err(Error::TypeMismatch {
                expected: "number",
                found: other.kind(),
            }),
        }
    }

    /// Replaces the text of a string node with an owned copy of `text`.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] for any other kind.
    pub fn set_string(&mut self, text: &str) -> Result<()> {
        match &mut self.value {
            Value::String(current) => {
                *current = Cow::Owned(text.to_owned());
                Ok(())
            }
            other => Err(Error::TypeMismatch {
                expected: "string",
                found: other.kind(),
            }),
        }
    }

    /// Sets an owned copy of `key` as this node's key.
    pub fn set_key(&mut self, key: &str) {
        self.key = Some(Cow::Owned(key.to_owned()));
    }

    /// Sets a borrowed key. The key text is never freed by the tree.
    pub fn set_key_ref(&mut self, key: &'a str) {
        self.key = Some(Cow::Borrowed(key));
    }

    pub(crate) fn owned_members_mut(
        &mut self,
        expected: Option<Kind>,
    ) -> Result<&mut Vec<Box<Node<'a>>>> {
        let found = self.kind();
        let members = match (&mut self.value, expected) {
            (Value::Array(members), None | Some(Kind::Array))
            | (Value::Object(members), None | Some(Kind::Object)) => members,
            _ => {
                return Err(Error::TypeMismatch {
                    expected: expected.map_or("array or object", Kind::name),
                    found,
                })
            }
        };
        members.owned_mut()
    }
}

impl fmt::Display for Node<'_> {
    /// Writes the compact serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::print::print_unformatted(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// How object keys are matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyCase {
    /// Keys must be byte-for-byte equal.
    #[default]
    Sensitive,
    /// Keys are equal if they match ignoring ASCII case.
    Insensitive,
}

impl KeyCase {
    #[inline]
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            KeyCase::Sensitive => a == b,
            KeyCase::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }
}
