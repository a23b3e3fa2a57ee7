//! String literal decoding.

use super::Parser;
use crate::error::{Error, Result};

impl Parser<'_> {
    /// Decodes the string literal at the cursor, which must sit on `"`.
    pub(super) fn string(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        let mut out: Vec<u8> = Vec::new();

        loop {
            // Copy the run of plain bytes in one go.
            let run_start = self.pos;
            while self
                .peek()
                .is_some_and(|b| b != b'"' && b != b'\\')
            {
                self.pos += 1;
            }
            out.extend_from_slice(&self.input[run_start..self.pos]);

            match self.peek() {
                None => return Err(Error::syntax(start, "unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.escape(&mut out)?,
            }
        }

        String::from_utf8(out).map_err(|_| Error::syntax(start, "string is not valid UTF-8"))
    }

    fn escape(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let at = self.pos;
        self.pos += 1;
        let byte = match self.peek() {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0C,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                self.pos += 1;
                let ch = self.unicode_escape(at)?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                return Ok(());
            }
            _ => return Err(Error::syntax(at, "invalid escape sequence")),
        };
        self.pos += 1;
        out.push(byte);
        Ok(())
    }

    /// Decodes the code point after `\u`, joining surrogate pairs.
    fn unicode_escape(&mut self, at: usize) -> Result<char> {
        let first = self.hex4(at)?;
        let code = match first {
            0xDC00..=0xDFFF => return Err(Error::syntax(at, "unpaired low surrogate")),
            0xD800..=0xDBFF => {
                if !self.input[self.pos..].starts_with(b"\\u") {
                    return Err(Error::syntax(at, "unpaired high surrogate"));
                }
                self.pos += 2;
                let second = self.hex4(at)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(Error::syntax(at, "invalid low surrogate"));
                }
                0x10000 + (((first - 0xD800) << 10) | (second - 0xDC00))
            }
            _ => first,
        };
        char::from_u32(code).ok_or_else(|| Error::syntax(at, "invalid code point"))
    }

    fn hex4(&mut self, at: usize) -> Result<u32> {
        let digits = self
            .input
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| Error::syntax(at, "truncated \\u escape"))?;
        let mut value = 0u32;
        for &digit in digits {
            let nibble = (digit as char)
                .to_digit(16)
                .ok_or_else(|| Error::syntax(at, "invalid hex digit in \\u escape"))?;
            value = (value << 4) | nibble;
        }
        self.pos += 4;
        Ok(value)
    }
}
