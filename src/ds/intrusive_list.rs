//! Ordered doubly linked list over a [`SlotArena`].
//!
//! The ordered container behind FIFO, LRU and LFU. Each node carries the
//! [`SlotId`]s of its neighbours, so a handle returned by a push can later
//! move or remove that node in O(1) without searching.
//!
//! ```text
//!        front                                 back
//!   head ──► ( X ) ◄────► ( Y ) ◄────► ( Z ) ◄── tail
//!           slot 2        slot 0       slot 5
//!
//!   move_to_back(slot 2):   ( Y ) ◄──► ( Z ) ◄──► ( X )
//!   pop_front():            returns Y, frees slot 0
//! ```
//!
//! Every operation is O(1) except [`iter`](IntrusiveList::iter). A handle is
//! only meaningful for the list that issued it; after the node is removed the
//! slot may be reused by a later push.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl<T> Node<T> {
    fn unlinked(value: T) -> Self {
        Self {
            value,
            prev: None,
            next: None,
        }
    }
}

/// Doubly linked list whose nodes are addressed by stable [`SlotId`]s.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Iterates values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Inserts `value` at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node::unlinked(value));
        self.link(id, None, self.head);
        id
    }

    /// Inserts `value` at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node::unlinked(value));
        self.link(id, self.tail, None);
        id
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.head.and_then(|id| self.remove(id))
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.and_then(|id| self.remove(id))
    }

    /// Unlinks node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.unlink(id).is_none() {
            return false;
        }
        self.link(id, None, self.head);
        true
    }

    /// Moves an existing node to the back; returns `false` if `id` is not present.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if self.unlink(id).is_none() {
            return false;
        }
        self.link(id, self.tail, None);
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Splices the detached node `id` in between `prev` and `next`, which must
    /// be adjacent (or the list end).
    fn link(&mut self, id: SlotId, prev: Option<SlotId>, next: Option<SlotId>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = prev;
            node.next = next;
        }
        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = Some(id),
            None => self.head = Some(id),
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = Some(id),
            None => self.tail = Some(id),
        }
    }

    /// Detaches `id` from its neighbours, leaving it in the arena.
    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev.and_then(|p| self.arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Walks the list front to back checking link symmetry and length.
    ///
    /// Panics on the first inconsistency.
    pub fn debug_validate_invariants(&self) {
        assert_eq!(
            self.head.is_none(),
            self.tail.is_none(),
            "head and tail disagree on emptiness"
        );

        let mut walked = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("linked slot is vacant");
            assert_eq!(node.prev, prev, "broken back link at slot {}", id.index());
            walked += 1;
            assert!(walked <= self.len(), "cycle through slot {}", id.index());
            prev = Some(id);
            current = node.next;
        }

        assert_eq!(self.tail, prev, "tail is not the last reachable node");
        assert_eq!(walked, self.len(), "unreachable nodes in arena");
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over an [`IntrusiveList`].
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn pushes_order_front_to_back() {
        let mut list = IntrusiveList::new();
        let mid = list.push_back(2);
        list.push_back(3);
        list.push_front(1);

        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(mid), Some(&2));
        assert_eq!((list.front(), list.back()), (Some(&1), Some(&3)));
        list.debug_validate_invariants();
    }

    #[test]
    fn pops_drain_from_either_end() {
        let mut list = IntrusiveList::new();
        for i in 0..4 {
            list.push_back(i);
        }
        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(collect(&list), vec![1, 2]);
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
        list.debug_validate_invariants();
    }

    #[test]
    fn moves_reorder_without_changing_handles() {
        let mut list = IntrusiveList::new();
        let x = list.push_back('x');
        let y = list.push_back('y');
        let z = list.push_back('z');

        assert!(list.move_to_back(x));
        assert_eq!(collect(&list), vec!['y', 'z', 'x']);
        assert!(list.move_to_front(z));
        assert_eq!(collect(&list), vec!['z', 'y', 'x']);
        // already in place
        assert!(list.move_to_front(z));
        assert!(list.move_to_back(x));
        assert_eq!(collect(&list), vec!['z', 'y', 'x']);

        assert_eq!(list.front_id(), Some(z));
        assert_eq!(list.back_id(), Some(x));
        assert_eq!(list.get(y), Some(&'y'));
        list.debug_validate_invariants();
    }

    #[test]
    fn single_node_moves_are_noops() {
        let mut list = IntrusiveList::new();
        let only = list.push_front("only");
        assert!(list.move_to_back(only));
        assert!(list.move_to_front(only));
        assert_eq!(list.front_id(), Some(only));
        assert_eq!(list.back_id(), Some(only));
        list.debug_validate_invariants();
    }

    #[test]
    fn removed_handles_are_rejected() {
        let mut list = IntrusiveList::new();
        let gone = list.push_back(1);
        let kept = list.push_back(2);
        assert_eq!(list.remove(gone), Some(1));

        assert!(!list.contains(gone));
        assert!(!list.move_to_front(gone));
        assert!(!list.move_to_back(gone));
        assert_eq!(list.remove(gone), None);
        assert_eq!(collect(&list), vec![2]);
        assert!(list.contains(kept));
        list.debug_validate_invariants();
    }

    #[test]
    fn remove_interior_relinks_neighbours() {
        let mut list = IntrusiveList::with_capacity(3);
        list.push_back("a");
        let b = list.push_back("b");
        list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(collect(&list), vec!["a", "c"]);
        if let Some(value) = list.front_id().and_then(|id| list.get_mut(id)) {
            *value = "A";
        }
        assert_eq!(collect(&list), vec!["A", "c"]);
        list.debug_validate_invariants();
    }

    #[test]
    fn clear_then_reuse() {
        let mut list = IntrusiveList::new();
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);

        list.push_front(3);
        assert_eq!(collect(&list), vec![3]);
        list.debug_validate_invariants();
    }
}
