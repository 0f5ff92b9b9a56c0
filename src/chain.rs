//! Chain: the doubly-linked list that backs each table bucket.
//!
//! Nodes live in a `SlotMap` arena and link to their neighbors by key, so the
//! whole structure is plain owned data: no `Rc` cycles, no raw pointers.
//! `NodeHandle` wraps the arena key; the generational keys make a handle to a
//! removed node inert instead of aliasing whatever reuses its slot.
//!
//! Both `next` and `prev` links are maintained symmetrically by every
//! mutation, which is what makes `remove_node` O(1) and backward navigation
//! trustworthy.

use slotmap::{DefaultKey, SlotMap};
use std::fmt;
use std::mem;
use thiserror::Error;

/// Failure of a value-addressed operation (`remove`, `replace`) when no node
/// carries an equal payload. Always recoverable; the chain is untouched.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("item not found in chain")]
pub struct ItemNotFound;

/// Stable reference to one chain node.
///
/// A handle stays valid until its node is removed; afterwards every accessor
/// returns `None`, even if the underlying slot has been reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle(DefaultKey);

impl NodeHandle {
    pub(crate) fn new(key: DefaultKey) -> Self {
        NodeHandle(key)
    }

    pub(crate) fn raw(&self) -> DefaultKey {
        self.0
    }

    /// Borrow the node's payload.
    pub fn data<'a, T>(&self, chain: &'a Chain<T>) -> Option<&'a T> {
        chain.node_data(*self)
    }

    /// Mutably borrow the node's payload for in-place update.
    pub fn data_mut<'a, T>(&self, chain: &'a mut Chain<T>) -> Option<&'a mut T> {
        chain.node_data_mut(*self)
    }

    /// Handle of the successor node, if any.
    pub fn next<T>(&self, chain: &Chain<T>) -> Option<NodeHandle> {
        chain.node_next(*self)
    }

    /// Handle of the predecessor node, if any. Navigation only; `prev` links
    /// never carry ownership.
    pub fn prev<T>(&self, chain: &Chain<T>) -> Option<NodeHandle> {
        chain.node_prev(*self)
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    data: T,
    next: Option<DefaultKey>,
    prev: Option<DefaultKey>,
}

/// An ordered, mutable sequence of payloads with head/tail tracking.
///
/// O(1): `len`, `push_back`, `push_front`, `remove_node`, `pop_front`,
/// `pop_back`. O(n): the value- and predicate-addressed searches.
pub struct Chain<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Chain<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::new(),
            head: None,
            tail: None,
        }
    }

    /// Pre-size the node arena; the chain itself starts empty.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Node count. Maintained by the arena, never recomputed by traversal.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn head(&self) -> Option<NodeHandle> {
        self.head.map(NodeHandle::new)
    }

    #[inline]
    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(NodeHandle::new)
    }

    /// Borrow the first payload.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|key| &self.nodes[key].data)
    }

    /// Borrow the last payload.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|key| &self.nodes[key].data)
    }

    /// Insert `data` at the tail. O(1).
    pub fn push_back(&mut self, data: T) -> NodeHandle {
        let key = self.nodes.insert(Node {
            data,
            next: None,
            prev: self.tail,
        });
        match self.tail {
            Some(old_tail) => self.nodes[old_tail].next = Some(key),
            // Empty chain: the new node is head and tail at once.
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        NodeHandle::new(key)
    }

    /// Insert `data` at the head. O(1). Counts like any other insert.
    pub fn push_front(&mut self, data: T) -> NodeHandle {
        let key = self.nodes.insert(Node {
            data,
            next: self.head,
            prev: None,
        });
        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
        NodeHandle::new(key)
    }

    /// First payload satisfying `predicate`, walking head to tail with early
    /// exit. Absence is `None`, never an error.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            if predicate(&node.data) {
                return Some(&node.data);
            }
            cursor = node.next;
        }
        None
    }

    /// As `find`, but returns the matching node's handle so the caller can
    /// mutate or unlink it later.
    pub fn find_node_by<P>(&self, mut predicate: P) -> Option<NodeHandle>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            if predicate(&node.data) {
                return Some(NodeHandle::new(key));
            }
            cursor = node.next;
        }
        None
    }

    /// Unlink the node behind `handle` and return its payload. O(1); both
    /// neighbor links and head/tail are patched in one step. Stale handles
    /// return `None`.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Option<T> {
        let node = self.nodes.remove(handle.raw())?;
        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.data)
    }

    /// Remove and return the head payload.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head()?;
        self.remove_node(head)
    }

    /// Remove and return the tail payload.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail()?;
        self.remove_node(tail)
    }

    /// Drop every node. Keeps the arena's allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Borrowing head-to-tail traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            chain: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Fresh snapshot of the payloads in chain order, not a live view.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub(crate) fn node_data(&self, handle: NodeHandle) -> Option<&T> {
        self.nodes.get(handle.raw()).map(|node| &node.data)
    }

    pub(crate) fn node_data_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        self.nodes.get_mut(handle.raw()).map(|node| &mut node.data)
    }

    pub(crate) fn node_next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes
            .get(handle.raw())
            .and_then(|node| node.next)
            .map(NodeHandle::new)
    }

    pub(crate) fn node_prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes
            .get(handle.raw())
            .and_then(|node| node.prev)
            .map(NodeHandle::new)
    }
}

impl<T: PartialEq> Chain<T> {
    /// True if some payload equals `data`.
    pub fn contains(&self, data: &T) -> bool {
        self.find(|candidate| candidate == data).is_some()
    }

    /// Handle of the first node whose payload equals `data`.
    pub fn find_node(&self, data: &T) -> Option<NodeHandle> {
        self.find_node_by(|candidate| candidate == data)
    }

    /// Unlink the first node whose payload equals `data` and return the
    /// payload. O(n) search, O(1) splice; a miss after full traversal fails
    /// with `ItemNotFound` and mutates nothing.
    pub fn remove(&mut self, data: &T) -> Result<T, ItemNotFound> {
        let handle = self.find_node(data).ok_or(ItemNotFound)?;
        Ok(self
            .remove_node(handle)
            .expect("handle returned by find_node is live"))
    }

    /// Overwrite the payload of the first node equal to `old` with `new`,
    /// returning the displaced payload. The node itself stays in place;
    /// handles to it remain valid. Fails with `ItemNotFound` if no node
    /// matches.
    pub fn replace(&mut self, old: &T, new: T) -> Result<T, ItemNotFound> {
        let handle = self.find_node(old).ok_or(ItemNotFound)?;
        let slot = self
            .node_data_mut(handle)
            .expect("handle returned by find_node is live");
        Ok(mem::replace(slot, new))
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Chain<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Chain::new();
        chain.extend(iter);
        chain
    }
}

impl<T> Extend<T> for Chain<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.push_back(data);
        }
    }
}

/// Borrowing iterator over a chain's payloads, head to tail.
pub struct Iter<'a, T> {
    chain: &'a Chain<T>,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = &self.chain.nodes[key];
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator draining the chain front to back.
pub struct IntoIter<T> {
    chain: Chain<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.chain.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.chain.len();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}
