//! Mutators: attach, insert, detach, delete and replace members.
//!
//! Attaching moves the node into the container, so a node can never be a
//! direct member of two containers. Aliasing goes through reference nodes
//! instead. Every mutator either completes or returns an error with the
//! container unchanged.

use std::borrow::Cow;

use tracing::trace;

use super::model::{Kind, KeyCase, Node, NodeId};
use crate::error::{Error, Result};

impl<'a> Node<'a> {
    /// Appends `node` to an array.
    ///
    /// # Errors
    /// Fails if `self` is not an owned array.
    pub fn add_to_array(&mut self, node: Node<'a>) -> Result<()> {
        let members = self.members_for(Kind::Array, "add_to_array")?;
        reserve_slot(members)?;
        members.push(Box::new(node));
        Ok(())
    }

    /// Inserts `node` before position `index`, shifting later members right.
    ///
    /// An index past the end appends.
    pub fn insert(&mut self, index: usize, node: Node<'a>) -> Result<()> {
        let members = self.members_for(Kind::Array, "insert")?;
        let index = index.min(members.len());
        reserve_slot(members)?;
        members.insert(index, Box::new(node));
        Ok(())
    }

    /// Appends `node` to an object under an owned copy of `key`.
    pub fn add_to_object(&mut self, key: &str, node: Node<'a>) -> Result<()> {
        self.attach_keyed(Cow::Owned(owned_text(key)?), node)
    }

    /// Appends `node` to an object under a borrowed `key`.
    ///
    /// The key text is never copied or freed by the tree.
    pub fn add_to_object_ref(&mut self, key: &'a str, node: Node<'a>) -> Result<()> {
        self.attach_keyed(Cow::Borrowed(key), node)
    }

    fn attach_keyed(&mut self, key: Cow<'a, str>, mut node: Node<'a>) -> Result<()> {
        let members = self.members_for(Kind::Object, "add_to_object")?;
        reserve_slot(members)?;
        node.key = Some(key);
        members.push(Box::new(node));
        Ok(())
    }

    /// Appends a reference to `target`; `target` itself is not moved.
    pub fn add_reference_to_array(&mut self, target: &'a Node<'a>) -> Result<()> {
        self.add_to_array(Node::reference(target))
    }

    /// Adds a reference to `target` under an owned copy of `key`.
    pub fn add_reference_to_object(&mut self, key: &str, target: &'a Node<'a>) -> Result<()> {
        self.add_to_object(key, Node::reference(target))
    }

    /// Removes the member at `index` and hands it back to the caller.
    ///
    /// The returned node keeps its key and reference flags.
    pub fn detach(&mut self, index: usize) -> Result<Node<'a>> {
        let members = self.members_for_any("detach")?;
        if index >= members.len() {
            let len = members.len();
            trace!(index, len, "detach index out of range");
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(*members.remove(index))
    }

    /// Removes the member identified by `id`.
    pub fn detach_by_id(&mut self, id: NodeId) -> Result<Node<'a>> {
        let index = self.find_id(id).ok_or(Error::NodeNotFound)?;
        self.detach(index)
    }

    /// Removes the first object member whose key matches.
    pub fn detach_by_key(&mut self, key: &str, case: KeyCase) -> Result<Node<'a>> {
        let index = self.require_key(key, case)?;
        self.detach(index)
    }

    /// Removes and drops the member at `index`.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        self.detach(index).map(drop)
    }

    pub fn delete_by_id(&mut self, id: NodeId) -> Result<()> {
        self.detach_by_id(id).map(drop)
    }

    pub fn delete_by_key(&mut self, key: &str, case: KeyCase) -> Result<()> {
        self.detach_by_key(key, case).map(drop)
    }

    /// Replaces the member at `index` with `node`, dropping the old member.
    ///
    /// Inside an object a keyless replacement inherits the old member's key.
    pub fn replace(&mut self, index: usize, mut node: Node<'a>) -> Result<()> {
        let members = self.members_for_any("replace")?;
        let len = members.len();
        let Some(slot) = members.get_mut(index) else {
            trace!(index, len, "replace index out of range");
            return Err(Error::IndexOutOfRange { index, len });
        };
        if node.key.is_none() {
            node.key = slot.key.take();
        }
        **slot = node;
        Ok(())
    }

    pub fn replace_by_id(&mut self, id: NodeId, node: Node<'a>) -> Result<()> {
        let index = self.find_id(id).ok_or(Error::NodeNotFound)?;
        self.replace(index, node)
    }

    /// Replaces the first object member matching `key`.
    ///
    /// The replacement is stored under an owned copy of `key`.
    pub fn replace_by_key(&mut self, key: &str, case: KeyCase, mut node: Node<'a>) -> Result<()> {
        let index = self.require_key(key, case)?;
        node.key = Some(Cow::Owned(owned_text(key)?));
        self.replace(index, node)
    }

    fn require_key(&self, key: &str, case: KeyCase) -> Result<usize> {
        if !self.is_object() {
            return Err(Error::TypeMismatch {
                expected: "object",
                found: self.kind(),
            });
        }
        self.find_key(key, case).ok_or_else(|| Error::KeyNotFound {
            key: key.to_owned(),
        })
    }

    fn members_for(&mut self, kind: Kind, op: &'static str) -> Result<&mut Vec<Box<Node<'a>>>> {
        self.owned_members_mut(Some(kind)).inspect_err(|err| {
            trace!(op, error = %err, "mutator rejected");
        })
    }

    fn members_for_any(&mut self, op: &'static str) -> Result<&mut Vec<Box<Node<'a>>>> {
        self.owned_members_mut(None).inspect_err(|err| {
            trace!(op, error = %err, "mutator rejected");
        })
    }
}

/// Makes room for one more member without aborting on allocation failure.
fn reserve_slot<T>(members: &mut Vec<T>) -> Result<()> {
    members.try_reserve(1).map_err(|_| Error::Allocation {
        requested: std::mem::size_of::<T>(),
    })
}

/// Copies `text` into a fresh `String`, reporting allocation failure.
fn owned_text(text: &str) -> Result<String> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(text.len())
        .map_err(|_| Error::Allocation {
            requested: text.len(),
        })?;
    owned.push_str(text);
    Ok(owned)
}
