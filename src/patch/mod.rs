//! JSON Merge Patch (RFC 7396) over [`Node`] trees.
//!
//! [`merge_patch`] applies a patch to a target tree and
//! [`generate_merge_patch`] computes the patch between two trees. Object keys
//! are matched per [`KeyCase`], first match wins.
//!
//! Merge patches cannot express a `null` stored as a value: applying a
//! generated patch reproduces `to` only if `to` has no `null` object members
//! that `from` lacks.

use std::borrow::Cow;

use tracing::trace;

use crate::compare::compare;
use crate::error::{Error, Result};
use crate::node::{KeyCase, Kind, Node};
use crate::parse::NESTING_LIMIT;

/// Applies `patch` to `target` and returns the patched tree.
///
/// A non-object patch replaces the target outright. An object patch turns the
/// target into an object if it is not one already, then for each member
/// deletes the matching target member if the patch value is `null` and
/// otherwise merges recursively. Merged members keep their position; new
/// members are appended. The target's own key is preserved. A reference
/// target is copied to owned storage before it is changed.
///
/// # Errors
/// Returns [`Error::NestingLimit`] if either tree is nested deeper than
/// [`NESTING_LIMIT`].
pub fn merge_patch<'a>(target: Node<'a>, patch: &Node<'_>, case: KeyCase) -> Result<Node<'a>> {
    apply(target, patch, case, 0)
}

fn apply<'a>(mut target: Node<'a>, patch: &Node<'_>, case: KeyCase, depth: usize) -> Result<Node<'a>> {
    if depth > NESTING_LIMIT {
        return Err(Error::NestingLimit {
            limit: NESTING_LIMIT,
            offset: None,
        });
    }
    let key = target.key.take();

    if !patch.is_object() {
        let mut replacement: Node<'a> = patch.duplicate(true)?;
        replacement.key = key;
        return Ok(replacement);
    }

    let mut target: Node<'a> = if !target.is_object() {
        Node::object()
    } else if target.is_reference() {
        trace!("copying reference target before patching");
        target.duplicate(true)?
    } else {
        target
    };
    target.key = key;

    for change in patch.iter() {
        let name = change.key().unwrap_or("");
        let found = target.find_key(name, case);
        let members = target.owned_members_mut(Some(Kind::Object))?;
        match found {
            Some(index) if change.is_null() => drop(members.remove(index)),
            Some(index) => {
                let current = std::mem::replace(&mut *members[index], Node::null());
                *members[index] = apply(current, change, case, depth + 1)?;
            }
            None if change.is_null() => {}
            None => {
                let mut added = apply(Node::null(), change, case, depth + 1)?;
                added.key = Some(Cow::Owned(name.to_owned()));
                members.push(Box::new(added));
            }
        }
    }

    Ok(target)
}

/// Computes the merge patch that turns `from` into `to`.
///
/// Returns `None` when the trees already compare equal. Patch members appear
/// in `from` order first, followed by members only present in `to`.
///
/// # Errors
/// Returns [`Error::NestingLimit`] if either tree is nested deeper than
/// [`NESTING_LIMIT`].
pub fn generate_merge_patch(
    from: &Node<'_>,
    to: &Node<'_>,
    case: KeyCase,
) -> Result<Option<Node<'static>>> {
    generate(from, to, case, 0)
}

fn generate(
    from: &Node<'_>,
    to: &Node<'_>,
    case: KeyCase,
    depth: usize,
) -> Result<Option<Node<'static>>> {
    if depth > NESTING_LIMIT {
        return Err(Error::NestingLimit {
            limit: NESTING_LIMIT,
            offset: None,
        });
    }

    if !(from.is_object() && to.is_object()) {
        if compare(from, to, case) {
            return Ok(None);
        }
        let mut replacement = to.duplicate(true)?;
        replacement.key = None;
        return Ok(Some(replacement));
    }

    let mut patch = Node::object();
    for old in from.iter() {
        let name = old.key().unwrap_or("");
        match to.find_key(name, case) {
            None => patch.add_null(name).map(drop)?,
            Some(index) => {
                let new = &to.members_slice()[index];
                if let Some(change) = generate(old, new, case, depth + 1)? {
                    patch.add_to_object(name, change)?;
                }
            }
        }
    }
    for new in to.iter() {
        let name = new.key().unwrap_or("");
        if from.find_key(name, case).is_none() {
            let mut added = new.duplicate(true)?;
            added.key = None;
            patch.add_to_object(name, added)?;
        }
    }

    Ok((!patch.is_empty()).then_some(patch))
}
