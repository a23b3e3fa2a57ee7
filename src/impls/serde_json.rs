use std::borrow::Cow;

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number as JsonNumber, Value as JsonValue};

use crate::error::{Error, Result};
use crate::node::{Members, Node, Value};
use crate::parse::{parse_with_opts, ParseOptions, NESTING_LIMIT};

impl Serialize for Node<'_> {
    /// Serializes the tree through any serde serializer.
    ///
    /// Raw nodes are parsed first so the serializer sees structured data.
    /// Non-finite numbers serialize as unit (`null` in JSON).
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Bounded {
            node: self,
            depth: 0,
        }
        .serialize(serializer)
    }
}

struct Bounded<'n, 'a> {
    node: &'n Node<'a>,
    depth: usize,
}

impl Bounded<'_, '_> {
    fn child_depth<E: serde::ser::Error>(&self) -> std::result::Result<usize, E> {
        if self.depth >= NESTING_LIMIT {
            return Err(E::custom(nesting_error()));
        }
        Ok(self.depth + 1)
    }
}

impl Serialize for Bounded<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.node.value() {
            Value::Null => serializer.serialize_unit(),
            Value::False => serializer.serialize_bool(false),
            Value::True => serializer.serialize_bool(true),
            Value::Number(number) => match integral(number.as_f64()) {
                Some(int) => serializer.serialize_i64(int),
                None if number.is_finite() => serializer.serialize_f64(number.as_f64()),
                None => serializer.serialize_unit(),
            },
            Value::String(text) => serializer.serialize_str(text),
            Value::Raw(text) => {
                let parsed = parse_raw(text).map_err(S::Error::custom)?;
                Bounded {
                    node: &parsed,
                    depth: self.depth,
                }
                .serialize(serializer)
            }
            Value::Array(members) => {
                let depth = self.child_depth()?;
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members.as_slice() {
                    seq.serialize_element(&Bounded {
                        node: &**member,
                        depth,
                    })?;
                }
                seq.end()
            }
            Value::Object(members) => {
                let depth = self.child_depth()?;
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for member in members.as_slice() {
                    map.serialize_entry(
                        member.key().unwrap_or(""),
                        &Bounded {
                            node: &**member,
                            depth,
                        },
                    )?;
                }
                map.end()
            }
        }
    }
}

impl TryFrom<&JsonValue> for Node<'static> {
    type Error = Error;

    /// Converts a `serde_json::Value` to an owned tree.
    ///
    /// Numbers outside `f64` become `null`. Values nested deeper than
    /// [`NESTING_LIMIT`] fail with [`Error::NestingLimit`].
    fn try_from(value: &JsonValue) -> Result<Self> {
        from_json(value, 0)
    }
}

fn from_json(value: &JsonValue, depth: usize) -> Result<Node<'static>> {
    let node = match value {
        JsonValue::Null => Node::null(),
        JsonValue::Bool(value) => Node::bool(*value),
        JsonValue::Number(number) => match number.as_f64() {
            Some(value) => Node::number(value),
            None => Node::null(),
        },
        JsonValue::String(text) => Node::string(text),
        JsonValue::Array(items) => {
            if depth >= NESTING_LIMIT {
                return Err(nesting_error());
            }
            let mut members = Vec::with_capacity(items.len());
            for item in items {
                members.push(Box::new(from_json(item, depth + 1)?));
            }
            Node::from_value(Value::Array(Members::Owned(members)))
        }
        JsonValue::Object(map) => {
            if depth >= NESTING_LIMIT {
                return Err(nesting_error());
            }
            let mut members = Vec::with_capacity(map.len());
            for (key, item) in map {
                let mut member = from_json(item, depth + 1)?;
                member.key = Some(Cow::Owned(key.clone()));
                members.push(Box::new(member));
            }
            Node::from_value(Value::Object(Members::Owned(members)))
        }
    };
    Ok(node)
}

impl TryFrom<&Node<'_>> for JsonValue {
    type Error = Error;

    /// Converts a tree to a `serde_json::Value`.
    ///
    /// Duplicate object keys keep the first member. Non-finite numbers become
    /// `null`. Raw nodes are parsed and fail the conversion if invalid.
    fn try_from(node: &Node<'_>) -> Result<Self> {
        to_json(node, 0)
    }
}

fn to_json(node: &Node<'_>, depth: usize) -> Result<JsonValue> {
    let value = match node.value() {
        Value::Null => JsonValue::Null,
        Value::False => JsonValue::Bool(false),
        Value::True => JsonValue::Bool(true),
        Value::Number(number) => match integral(number.as_f64()) {
            Some(int) => JsonValue::from(int),
            None => JsonNumber::from_f64(number.as_f64()).map_or(JsonValue::Null, JsonValue::Number),
        },
        Value::String(text) => JsonValue::String(text.to_string()),
        Value::Raw(text) => to_json(&parse_raw(text)?, depth)?,
        Value::Array(members) => {
            if depth >= NESTING_LIMIT {
                return Err(nesting_error());
            }
            let mut items = Vec::with_capacity(members.len());
            for member in members.as_slice() {
                items.push(to_json(member, depth + 1)?);
            }
            JsonValue::Array(items)
        }
        Value::Object(members) => {
            if depth >= NESTING_LIMIT {
                return Err(nesting_error());
            }
            let mut map = Map::new();
            for member in members.as_slice() {
                let converted = to_json(member, depth + 1)?;
                map.entry(member.key().unwrap_or("")).or_insert(converted);
            }
            JsonValue::Object(map)
        }
    };
    Ok(value)
}

fn parse_raw(text: &str) -> Result<Node<'static>> {
    let opts = ParseOptions {
        require_termination: true,
        ..ParseOptions::default()
    };
    parse_with_opts(text.as_bytes(), &opts).map(|parsed| parsed.node)
}

fn integral(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < 1e15).then_some(value as i64)
}

fn nesting_error() -> Error {
    Error::NestingLimit {
        limit: NESTING_LIMIT,
        offset: None,
    }
}
