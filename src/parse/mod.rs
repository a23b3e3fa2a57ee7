//! JSON text to [`Node`] tree.
//!
//! The parser is a recursive-descent state machine over a byte buffer. It
//! keeps a cursor, an end bound and a nesting counter. The counter is checked
//! before every array or object is entered, so hostile input cannot exhaust
//! the call stack.
//!
//! Two independent knobs are exposed through [`ParseOptions`]:
//!
//! - [`InputBound`]: the input ends at its length, or at the first NUL byte.
//! - `require_termination`: whether anything but whitespace after the value
//!   is an error. In lenient mode [`Parsed::end`] reports where parsing
//!   stopped.

mod strings;

use std::borrow::Cow;

use tracing::debug;

use crate::error::{Error, Result};
use crate::node::{Members, Node, Number, Value};

/// Maximum nesting of arrays and objects accepted by the parser.
///
/// The same bound applies to printing, duplication and comparison.
pub const NESTING_LIMIT: usize = 1000;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Where the input ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputBound {
    /// The whole slice is input.
    #[default]
    Length,
    /// Input ends at the first NUL byte, or at the end of the slice.
    NulTerminated,
}

/// Options for parsing behavior.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    pub bound: InputBound,
    /// If true, trailing non-whitespace after the value is a syntax error.
    pub require_termination: bool,
    pub nesting_limit: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            bound: InputBound::Length,
            require_termination: false,
            nesting_limit: NESTING_LIMIT,
        }
    }
}

/// A parsed tree together with the offset where parsing stopped.
#[derive(Debug)]
pub struct Parsed {
    pub node: Node<'static>,
    /// Byte offset just past the value (and past trailing whitespace when
    /// termination is required).
    pub end: usize,
}

/// Parses a JSON document. Trailing text after the value is ignored.
pub fn parse(text: &str) -> Result<Node<'static>> {
    parse_with_opts(text.as_bytes(), &ParseOptions::default()).map(|parsed| parsed.node)
}

/// Parses a NUL-terminated byte buffer. Trailing text after the value is
/// ignored.
pub fn parse_bytes(bytes: &[u8]) -> Result<Node<'static>> {
    let opts = ParseOptions {
        bound: InputBound::NulTerminated,
        ..ParseOptions::default()
    };
    parse_with_opts(bytes, &opts).map(|parsed| parsed.node)
}

/// Parses at most `len` bytes of `bytes`.
pub fn parse_with_length(bytes: &[u8], len: usize) -> Result<Node<'static>> {
    let bounded = &bytes[..len.min(bytes.len())];
    parse_with_opts(bounded, &ParseOptions::default()).map(|parsed| parsed.node)
}

/// Parses `bytes` under explicit options.
///
/// # Errors
/// Returns [`Error::Syntax`] or [`Error::NestingLimit`] with the byte offset
/// of the failure. No partial tree is returned.
pub fn parse_with_opts(bytes: &[u8], opts: &ParseOptions) -> Result<Parsed> {
    let input = match opts.bound {
        InputBound::Length => bytes,
        InputBound::NulTerminated => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            &bytes[..end]
        }
    };

    let mut parser = Parser::new(input, opts.nesting_limit);
    let result = parser.document(opts.require_termination);
    if let Err(err) = &result {
        debug!(offset = ?err.offset(), error = %err, "JSON parse failed");
    }
    result
}

struct Parser<'i> {
    input: &'i [u8],
    pos: usize,
    depth: usize,
    limit: usize,
}

impl<'i> Parser<'i> {
    fn new(input: &'i [u8], limit: usize) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            limit,
        }
    }

    fn document(&mut self, require_termination: bool) -> Result<Parsed> {
        if self.input.starts_with(UTF8_BOM) {
            self.pos = UTF8_BOM.len();
        }
        self.skip_whitespace();
        let node = self.value()?;

        if require_termination {
            self.skip_whitespace();
            if self.pos < self.input.len() {
                return Err(Error::syntax(self.pos, "unexpected text after the value"));
            }
        }

        Ok(Parsed {
            node,
            end: self.pos,
        })
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b <= b' ') {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8, reason: &'static str) -> Result<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(Error::syntax(self.pos, reason))
        }
    }

    fn value(&mut self) -> Result<Node<'static>> {
        let value = match self.peek() {
            None => return Err(Error::syntax(self.pos, "unexpected end of input")),
            Some(b'n') => self.literal(b"null", Value::Null)?,
            Some(b't') => self.literal(b"true", Value::True)?,
            Some(b'f') => self.literal(b"false", Value::False)?,
            Some(b'"') => Value::String(Cow::Owned(self.string()?)),
            Some(b'-' | b'0'..=b'9') => Value::Number(self.number()?),
            Some(b'[') => Value::Array(self.array()?),
            Some(b'{') => Value::Object(self.object()?),
            Some(_) => return Err(Error::syntax(self.pos, "expected a JSON value")),
        };
        Ok(Node::from_value(value))
    }

    fn literal(&mut self, word: &'static [u8], value: Value<'static>) -> Result<Value<'static>> {
        if self.input[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(Error::syntax(self.pos, "invalid literal"))
        }
    }

    fn number(&mut self) -> Result<Number> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.digits(),
            _ => return Err(Error::syntax(self.pos, "expected a digit")),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.required_digits()?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.required_digits()?;
        }

        std::str::from_utf8(&self.input[start..self.pos])
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .map(Number::new)
            .ok_or_else(|| Error::syntax(start, "invalid number"))
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn required_digits(&mut self) -> Result<()> {
        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(Error::syntax(self.pos, "expected a digit"));
        }
        self.digits();
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.limit {
            return Err(Error::NestingLimit {
                limit: self.limit,
                offset: Some(self.pos),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn array(&mut self) -> Result<Members<'static>> {
        self.enter()?;
        self.pos += 1;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Members::Owned(items));
        }

        loop {
            self.skip_whitespace();
            items.push(Box::new(self.value()?));
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(Error::syntax(self.pos, "expected ',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Members::Owned(items))
    }

    fn object(&mut self) -> Result<Members<'static>> {
        self.enter()?;
        self.pos += 1;
        let mut members = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Members::Owned(members));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(Error::syntax(self.pos, "expected a string key"));
            }
            let key = self.string()?;
            self.skip_whitespace();
            self.expect(b':', "expected ':' after object key")?;
            self.skip_whitespace();

            let mut member = self.value()?;
            member.key = Some(Cow::Owned(key));
            members.push(Box::new(member));

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(Error::syntax(self.pos, "expected ',' or '}'")),
            }
        }

        self.depth -= 1;
        Ok(Members::Owned(members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Kind;

    #[test]
    fn parses_scalars() {
        assert!(parse("null").expect("null").is_null());
        assert!(parse("true").expect("true").is_true());
        assert!(parse("false").expect("false").is_false());
        assert_eq!(parse("-12.5e1").expect("number").as_f64(), Some(-125.0));
        assert_eq!(parse(r#""hi""#).expect("string").as_str(), Some("hi"));
    }

    #[test]
    fn parses_nested_containers_in_order() {
        let node = parse(r#" { "a" : [1, {"b": null}], "c": "d" } "#).expect("parse");
        assert_eq!(node.kind(), Kind::Object);
        let keys: Vec<&str> = node.iter().filter_map(Node::key).collect();
        assert_eq!(keys, vec!["a", "c"]);
        let a = node.get("a").expect("a");
        assert_eq!(a.len(), 2);
        assert!(a.get_index(1).and_then(|o| o.get("b")).is_some_and(Node::is_null));
    }

    #[test]
    fn keeps_duplicate_keys() {
        let node = parse(r#"{"x":1,"x":2}"#).expect("parse");
        assert_eq!(node.len(), 2);
        assert_eq!(node.get("x").and_then(Node::as_f64), Some(1.0));
    }

    #[test]
    fn reports_offset_of_first_error() {
        let err = parse("[1, 2,, 3]").unwrap_err();
        assert_eq!(err.offset(), Some(6));
        let err = parse(r#"{"a" 1}"#).unwrap_err();
        assert_eq!(err.offset(), Some(5));
        let err = parse("").unwrap_err();
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn rejects_malformed_numbers() {
        for text in ["-", "01x", "1.", ".5", "1e", "1e+", "+1"] {
            let result = parse_with_opts(
                text.as_bytes(),
                &ParseOptions {
                    require_termination: true,
                    ..ParseOptions::default()
                },
            );
            assert!(result.is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn lenient_mode_reports_where_parsing_stopped() {
        let parsed = parse_with_opts(b"[1] trailing", &ParseOptions::default()).expect("parse");
        assert_eq!(parsed.end, 3);
        assert_eq!(parsed.node.len(), 1);
    }

    #[test]
    fn strict_mode_rejects_trailing_text() {
        let opts = ParseOptions {
            require_termination: true,
            ..ParseOptions::default()
        };
        let err = parse_with_opts(b"[1] x", &opts).unwrap_err();
        assert_eq!(err.offset(), Some(4));

        let parsed = parse_with_opts(b"[1]  \n", &opts).expect("whitespace is fine");
        assert_eq!(parsed.end, 6);
    }

    #[test]
    fn nul_terminated_input_stops_at_nul() {
        let opts = ParseOptions {
            bound: InputBound::NulTerminated,
            require_termination: true,
            ..ParseOptions::default()
        };
        let parsed = parse_with_opts(b"{\"a\":1}\0garbage", &opts).expect("parse");
        assert_eq!(parsed.end, 7);

        let node = parse_bytes(b"[true]\0[").expect("parse");
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn length_bound_truncates_input() {
        let node = parse_with_length(b"[1,2][3]", 5).expect("parse");
        assert_eq!(node.len(), 2);
        assert!(parse_with_length(b"[1,2]", 3).is_err());
    }

    #[test]
    fn nesting_limit_is_enforced() {
        let ok = "[".repeat(NESTING_LIMIT) + &"]".repeat(NESTING_LIMIT);
        assert!(parse(&ok).is_ok());

        let deep = "[".repeat(NESTING_LIMIT + 1) + &"]".repeat(NESTING_LIMIT + 1);
        let err = parse(&deep).unwrap_err();
        assert_eq!(
            err,
            Error::NestingLimit {
                limit: NESTING_LIMIT,
                offset: Some(NESTING_LIMIT)
            }
        );
    }

    #[test]
    fn custom_nesting_limit() {
        let opts = ParseOptions {
            nesting_limit: 2,
            ..ParseOptions::default()
        };
        assert!(parse_with_opts(b"[[1]]", &opts).is_ok());
        assert!(parse_with_opts(b"[[[1]]]", &opts).is_err());
    }

    #[test]
    fn skips_byte_order_mark() {
        let node = parse("\u{feff}[1]").expect("parse");
        assert_eq!(node.len(), 1);
    }
}
