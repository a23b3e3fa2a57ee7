//! [`Node`] tree to JSON text.
//!
//! One tree walk feeds three output strategies:
//!
//! - [`print`] / [`print_unformatted`]: a growable buffer starting at
//!   [`DEFAULT_CAPACITY`] bytes and doubling on overflow.
//! - [`print_buffered`]: the same, seeded with a caller capacity hint.
//! - [`print_preallocated`]: a caller buffer of fixed length that is never
//!   written past its end.
//!
//! Numbers use the shortest text that round-trips. NaN and the infinities
//! have no JSON form and print as `null`. Raw nodes are copied verbatim.

mod buffer;
mod minify;

pub use minify::{minify, minify_bytes};

use buffer::{Fixed, Growable, Sink};

use crate::error::{Error, Result};
use crate::node::{Node, Value};
use crate::parse::NESTING_LIMIT;

/// Initial capacity of the growable print buffer.
pub const DEFAULT_CAPACITY: usize = 256;

/// Output layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Objects one member per line, tab-indented per nesting level.
    #[default]
    Pretty,
    /// No insignificant whitespace.
    Compact,
}

/// Options for the growable printers.
#[derive(Clone, Debug)]
pub struct PrintOptions {
    pub format: Format,
    /// Initial buffer capacity in bytes. A hint, not a limit.
    pub prebuffer: usize,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            format: Format::Pretty,
            prebuffer: DEFAULT_CAPACITY,
        }
    }
}

/// Serializes `node` with indentation.
pub fn print(node: &Node<'_>) -> Result<String> {
    print_with_opts(node, &PrintOptions::default())
}

/// Serializes `node` without any whitespace.
pub fn print_unformatted(node: &Node<'_>) -> Result<String> {
    print_with_opts(
        node,
        &PrintOptions {
            format: Format::Compact,
            ..PrintOptions::default()
        },
    )
}

/// Serializes `node` into a buffer seeded with `prebuffer` bytes of capacity.
pub fn print_buffered(node: &Node<'_>, prebuffer: usize, format: Format) -> Result<String> {
    print_with_opts(node, &PrintOptions { format, prebuffer })
}

pub fn print_with_opts(node: &Node<'_>, opts: &PrintOptions) -> Result<String> {
    let mut out = Growable::with_capacity(opts.prebuffer)?;
    Printer::new(&mut out, opts.format).value(node)?;
    Ok(out.into_string())
}

/// Serializes `node` into `buf` and returns the number of bytes written.
///
/// # Errors
/// Returns [`Error::BufferTooSmall`] if the text does not fit. Bytes past
/// `buf.len()` are never touched; the prefix that did fit may have been
/// written.
pub fn print_preallocated(node: &Node<'_>, buf: &mut [u8], format: Format) -> Result<usize> {
    let mut out = Fixed::new(buf);
    Printer::new(&mut out, format).value(node)?;
    Ok(out.len())
}

struct Printer<'s, S: Sink> {
    out: &'s mut S,
    format: Format,
    depth: usize,
}

impl<'s, S: Sink> Printer<'s, S> {
    fn new(out: &'s mut S, format: Format) -> Self {
        Self {
            out,
            format,
            depth: 0,
        }
    }

    fn pretty(&self) -> bool {
        self.format == Format::Pretty
    }

    fn value(&mut self, node: &Node<'_>) -> Result<()> {
        match node.value() {
            Value::Null => self.out.write("null"),
            Value::False => self.out.write("false"),
            Value::True => self.out.write("true"),
            Value::Number(number) => self.out.write(&format_number(number.as_f64())),
            Value::String(text) => self.string(text),
            Value::Raw(text) => self.out.write(text),
            Value::Array(members) => self.array(members.as_slice()),
            Value::Object(members) => self.object(members.as_slice()),
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= NESTING_LIMIT {
            return Err(Error::NestingLimit {
                limit: NESTING_LIMIT,
                offset: None,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn array(&mut self, members: &[Box<Node<'_>>]) -> Result<()> {
        self.enter()?;
        self.out.write("[")?;
        for (index, member) in members.iter().enumerate() {
            if index > 0 {
                self.out.write(if self.pretty() { ", " } else { "," })?;
            }
            self.value(member)?;
        }
        self.out.write("]")?;
        self.depth -= 1;
        Ok(())
    }

    fn object(&mut self, members: &[Box<Node<'_>>]) -> Result<()> {
        self.enter()?;
        self.out.write("{")?;
        if self.pretty() {
            self.out.write("\n")?;
        }
        for (index, member) in members.iter().enumerate() {
            if self.pretty() {
                self.indent(self.depth)?;
            }
            self.string(member.key().unwrap_or(""))?;
            self.out.write(if self.pretty() { ":\t" } else { ":" })?;
            self.value(member)?;
            if index + 1 < members.len() {
                self.out.write(",")?;
            }
            if self.pretty() {
                self.out.write("\n")?;
            }
        }
        if self.pretty() {
            self.indent(self.depth - 1)?;
        }
        self.out.write("}")?;
        self.depth -= 1;
        Ok(())
    }

    fn indent(&mut self, level: usize) -> Result<()> {
        for _ in 0..level {
            self.out.write("\t")?;
        }
        Ok(())
    }

    fn string(&mut self, text: &str) -> Result<()> {
        self.out.write("\"")?;
        let mut run_start = 0;
        for (index, byte) in text.bytes().enumerate() {
            let escaped = match byte {
                b'"' => "\\\"",
                b'\\' => "\\\\",
                0x08 => "\\b",
                0x0C => "\\f",
                b'\n' => "\\n",
                b'\r' => "\\r",
                b'\t' => "\\t",
                0x00..=0x1F => "",
                _ => continue,
            };
            self.out.write(&text[run_start..index])?;
            if escaped.is_empty() {
                self.out.write(&format!("\\u{byte:04x}"))?;
            } else {
                self.out.write(escaped)?;
            }
            run_start = index + 1;
        }
        self.out.write(&text[run_start..])?;
        self.out.write("\"")
    }
}

/// Formats a number as JSON text.
///
/// Integral values below 1e15 in magnitude print without a fraction; other
/// finite values print their shortest round-trip form. Non-finite values
/// print as `null`.
pub(crate) fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_owned();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value:?}")
}

/// Fuzz-only entrypoint for number formatting.
#[cfg(feature = "fuzzing")]
pub fn fuzz_format_number(value: f64) -> String {
    format_number(value)
}
