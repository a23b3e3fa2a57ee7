//! In-place removal of insignificant whitespace and comments.

/// Strips whitespace outside strings plus `//` and `/* */` comments.
///
/// String literals, escapes included, are copied unchanged. A `/` that does
/// not start a comment is kept. An unterminated block comment swallows the
/// rest of the text.
pub fn minify_bytes(text: &mut Vec<u8>) {
    let len = text.len();
    let mut read = 0;
    let mut write = 0;

    while read < len {
        match text[read] {
            b' ' | b'\t' | b'\r' | b'\n' => read += 1,
            b'/' if text.get(read + 1) == Some(&b'/') => {
                read += 2;
                while read < len && text[read] != b'\n' {
                    read += 1;
                }
                // The newline ending the comment goes too.
                read = (read + 1).min(len);
            }
            b'/' if text.get(read + 1) == Some(&b'*') => {
                read += 2;
                while read < len && !(text[read] == b'*' && text.get(read + 1) == Some(&b'/')) {
                    read += 1;
                }
                read = (read + 2).min(len);
            }
            b'"' => {
                text[write] = b'"';
                write += 1;
                read += 1;
                while read < len {
                    let byte = text[read];
                    text[write] = byte;
                    write += 1;
                    read += 1;
                    if byte == b'\\' && read < len {
                        text[write] = text[read];
                        write += 1;
                        read += 1;
                    } else if byte == b'"' {
                        break;
                    }
                }
            }
            byte => {
                text[write] = byte;
                write += 1;
                read += 1;
            }
        }
    }

    text.truncate(write);
}

/// [`minify_bytes`] over a `String`.
///
/// Only ASCII bytes outside string literals are ever removed, so the result
/// stays valid UTF-8.
pub fn minify(text: &mut String) {
    let mut bytes = std::mem::take(text).into_bytes();
    minify_bytes(&mut bytes);
    *text = match String::from_utf8(bytes) {
        Ok(minified) => minified,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };
}
