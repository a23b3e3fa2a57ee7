//! Structural equality over two trees.
//!
//! Arrays compare in order. Objects compare as unordered key/value sets:
//! every member of one side must find an equal value under the same key on
//! the other side. Repeated keys pair up in order of occurrence. Keys are matched per
//! [`KeyCase`]. Member keys of the two roots themselves are ignored.

use crate::node::{KeyCase, Node, Value};
use crate::parse::NESTING_LIMIT;

/// Returns true if `a` and `b` are structurally equal.
///
/// Numbers compare by value, so `1` equals `1.0`. Text compares byte for
/// byte; a raw node never equals a string node. Trees nested deeper than
/// [`NESTING_LIMIT`] compare unequal.
pub fn compare(a: &Node<'_>, b: &Node<'_>, case: KeyCase) -> bool {
    equal_at(a, b, case, 0)
}

fn equal_at(a: &Node<'_>, b: &Node<'_>, case: KeyCase, depth: usize) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    match (a.value(), b.value()) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::String(x), Value::String(y)) | (Value::Raw(x), Value::Raw(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            if depth >= NESTING_LIMIT {
                return false;
            }
            let (x, y) = (x.as_slice(), y.as_slice());
            if x.len() != y.len() {
                return false;
            }
            for (left, right) in x.iter().zip(y) {
                if !equal_at(left, right, case, depth + 1) {
                    return false;
                }
            }
            true
        }
        (Value::Object(_), Value::Object(_)) => {
            if depth >= NESTING_LIMIT {
                return false;
            }
            if a.len() != b.len() {
                return false;
            }
            covers(a, b, case, depth) && covers(b, a, case, depth)
        }
        // Null, True and False carry no payload beyond the kind.
        _ => true,
    }
}

/// Every member of `from` has an equal counterpart under its key in `into`.
///
/// Repeated keys pair by occurrence: the n-th member of `from` under a key
/// is checked against the n-th member of `into` under that key.
fn covers(from: &Node<'_>, into: &Node<'_>, case: KeyCase, depth: usize) -> bool {
    let (from, into) = (from.members_slice(), into.members_slice());
    for (index, member) in from.iter().enumerate() {
        let key = member.key().unwrap_or("");
        let occurrence = from[..index]
            .iter()
            .filter(|earlier| case.matches(earlier.key().unwrap_or(""), key))
            .count();
        let counterpart = into
            .iter()
            .filter(|other| case.matches(other.key().unwrap_or(""), key))
            .nth(occurrence);
        match counterpart {
            Some(other) if equal_at(member, other, case, depth + 1) => {}
            _ => return false,
        }
    }
    true
}
