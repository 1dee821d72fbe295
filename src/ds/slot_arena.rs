//! Slot storage with stable integer handles.
//!
//! A [`SlotId`] names one slot of a [`SlotArena`] and stays valid until that
//! slot is removed, so linked structures can store indices instead of
//! pointers. Vacant slots form a singly linked free list threaded through the
//! storage itself; the most recently freed slot is reused first.
//!
//! ```text
//!   slots:  [ Occupied(A) | Vacant(None) | Occupied(C) | Vacant(Some(1)) ]
//!                                ▲                            │
//!   free_head = Some(3) ─────────┼────────────────────────────┘
//!                                └── end of free list
//! ```

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    /// Index of the next vacant slot.
    Vacant(Option<usize>),
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            occupied: 0,
        }
    }

    /// Stores `value`, reusing a vacant slot when one is available.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        match self.free_head {
            Some(index) => {
                let slot = std::mem::replace(&mut self.slots[index], Slot::Occupied(value));
                if let Slot::Vacant(next_free) = slot {
                    self.free_head = next_free;
                }
                SlotId(index)
            },
            None => {
                self.slots.push(Slot::Occupied(value));
                SlotId(self.slots.len() - 1)
            },
        }
    }

    /// Vacates the slot and returns its value; `None` if it was already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant(_)) {
            return None;
        }
        match std::mem::replace(slot, Slot::Vacant(self.free_head)) {
            Slot::Occupied(value) => {
                self.free_head = Some(id.0);
                self.occupied -= 1;
                Some(value)
            },
            Slot::Vacant(_) => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant(_) => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Drops every value and forgets all handles.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.occupied = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
