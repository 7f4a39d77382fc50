//! # Slot Arena
//!
//! Type-safe slot storage with index-based references and a free list,
//! used as the backing store for list nodes instead of one heap
//! allocation per node.
//!
//! ## Benefits over `Box`-per-node chains
//!
//! - One contiguous allocation, grown geometrically
//! - Released slots are recycled by later allocations
//! - Links are plain integers, so a node may point at itself
//! - Dropping the arena releases every slot at once
//!
//! ## Example
//!
//! ```
//! use slist::arena::{Arena, ArenaId};
//!
//! #[derive(Debug)]
//! struct Node {
//!     value: i64,
//!     next: Option<ArenaId<Node>>,
//! }
//!
//! let mut arena: Arena<Node> = Arena::new();
//!
//! let first = arena.alloc(Node { value: 1, next: None });
//! let second = arena.alloc(Node { value: 2, next: Some(first) });
//! assert_eq!(arena.get(second).next, Some(first));
//!
//! // Freed slots go back on the free list and are handed out again.
//! assert_eq!(arena.free(first).map(|n| n.value), Some(1));
//! let third = arena.alloc(Node { value: 3, next: None });
//! assert_eq!(third, first);
//! assert_eq!(arena.len(), 2);
//! ```

use std::collections::TryReserveError;
use std::marker::PhantomData;

/// A type-safe index into an [`Arena`].
///
/// `ArenaId<T>` is a lightweight handle (just a `usize`) that references
/// a slot holding a `T`. The `PhantomData<T>` keeps ids of different
/// element types apart at compile time.
#[derive(Debug)]
pub struct ArenaId<T> {
    index: usize,
    _marker: PhantomData<T>,
}

// Manual implementations to avoid requiring T: Clone/Copy/etc.
impl<T> Clone for ArenaId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaId<T> {}

impl<T> PartialEq for ArenaId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for ArenaId<T> {}

impl<T> std::hash::Hash for ArenaId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> ArenaId<T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the raw slot index of this id.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Slot storage for values of type `T`.
///
/// Values are stored contiguously and referenced by [`ArenaId<T>`].
/// Freeing a value vacates its slot and threads it onto an internal free
/// list; the next allocation takes the most recently freed slot.
///
/// An id stays valid until its slot is freed. After that the id may be
/// handed out again for an unrelated value, so callers must not keep
/// stale ids around.
#[derive(Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Creates a new arena with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Makes sure the next `additional` allocations will not need to grow
    /// the slot vector.
    ///
    /// Vacant slots count towards `additional`, so this only asks the
    /// allocator for what the free list cannot cover.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let vacant = self.slots.len() - self.len;
        match additional.checked_sub(vacant) {
            Some(missing) if missing > 0 => self.slots.try_reserve(missing),
            _ => Ok(()),
        }
    }

    /// Allocates a new value in the arena and returns its id.
    ///
    /// # Example
    ///
    /// ```
    /// use slist::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let id = arena.alloc(42);
    /// assert_eq!(arena.get(id), &42);
    /// ```
    pub fn alloc(&mut self, value: T) -> ArenaId<T> {
        self.alloc_with(|_| value)
    }

    /// Allocates a value built from its own id.
    ///
    /// Useful for self-referencing values such as a node whose link
    /// points back at itself.
    ///
    /// ```
    /// use slist::arena::{Arena, ArenaId};
    ///
    /// #[derive(Debug)]
    /// struct Loop(ArenaId<Loop>);
    ///
    /// let mut arena = Arena::new();
    /// let id = arena.alloc_with(Loop);
    /// assert_eq!(arena.get(id).0, id);
    /// ```
    pub fn alloc_with(&mut self, make: impl FnOnce(ArenaId<T>) -> T) -> ArenaId<T> {
        let index = match self.free_head {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free_head = next_free;
                }
                index
            }
            None => {
                self.slots.push(Slot::Vacant { next_free: None });
                self.slots.len() - 1
            }
        };
        let id = ArenaId::new(index);
        self.slots[index] = Slot::Occupied(make(id));
        self.len += 1;
        id
    }

    /// Vacates the slot behind `id` and returns the value it held.
    ///
    /// Returns `None` if the slot is already vacant or out of range.
    pub fn free(&mut self, id: ArenaId<T>) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacated = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.index);
        self.len -= 1;
        match vacated {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns a reference to the value at the given id.
    ///
    /// # Panics
    ///
    /// Panics if the slot is vacant or the id is out of range.
    #[must_use]
    pub fn get(&self, id: ArenaId<T>) -> &T {
        match &self.slots[id.index] {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => panic!("arena slot {} is vacant", id.index),
        }
    }

    /// Returns a mutable reference to the value at the given id.
    ///
    /// # Panics
    ///
    /// Panics if the slot is vacant or the id is out of range.
    #[must_use]
    pub fn get_mut(&mut self, id: ArenaId<T>) -> &mut T {
        match &mut self.slots[id.index] {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => panic!("arena slot {} is vacant", id.index),
        }
    }

    /// Tries to get a reference to the value, returning `None` if the id
    /// does not name an occupied slot.
    #[must_use]
    pub fn try_get(&self, id: ArenaId<T>) -> Option<&T> {
        match self.slots.get(id.index)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns how many values the arena can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every value and forgets every slot, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena: Arena<i64> = Arena::new();
        let id1 = arena.alloc(10);
        let id2 = arena.alloc(20);
        let id3 = arena.alloc(30);

        assert_eq!(arena.get(id1), &10);
        assert_eq!(arena.get(id2), &20);
        assert_eq!(arena.get(id3), &30);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new();
        let id = arena.alloc(String::from("hello"));

        arena.get_mut(id).push_str(" world");
        assert_eq!(arena.get(id), "hello world");
    }

    #[test]
    fn test_self_reference() {
        #[derive(Debug)]
        struct Node {
            next: ArenaId<Node>,
        }

        let mut arena: Arena<Node> = Arena::new();
        let tail = arena.alloc_with(|me| Node { next: me });
        let head = arena.alloc(Node { next: tail });

        assert_eq!(arena.get(tail).next, tail);
        assert_eq!(arena.get(head).next, tail);
    }

    #[test]
    fn test_free_reuses_most_recent_slot() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let c = arena.alloc('c');

        assert_eq!(arena.free(a), Some('a'));
        assert_eq!(arena.free(c), Some('c'));
        assert_eq!(arena.len(), 1);

        // LIFO: c's slot comes back first, then a's.
        assert_eq!(arena.alloc('d'), c);
        assert_eq!(arena.alloc('e'), a);
        assert_eq!(arena.get(b), &'b');
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut arena = Arena::new();
        let id = arena.alloc(1u8);
        assert_eq!(arena.free(id), Some(1));
        assert_eq!(arena.free(id), None);
        assert_eq!(arena.try_get(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "vacant")]
    fn test_get_vacant_panics() {
        let mut arena = Arena::new();
        let id = arena.alloc(1u8);
        arena.free(id);
        let _ = arena.get(id);
    }

    #[test]
    fn test_try_reserve_counts_vacant_slots() {
        let mut arena: Arena<u32> = Arena::new();
        arena.try_reserve(4).unwrap();
        assert!(arena.capacity() >= 4);

        let ids: Vec<_> = (0..4).map(|n| arena.alloc(n)).collect();
        for id in &ids {
            arena.free(*id);
        }
        let capacity = arena.capacity();
        arena.try_reserve(4).unwrap();
        assert_eq!(arena.capacity(), capacity);
    }

    #[test]
    fn test_arena_id_is_copy() {
        let mut arena: Arena<i64> = Arena::new();
        let id = arena.alloc(42);

        let id_copy = id;
        assert_eq!(arena.get(id), arena.get(id_copy));
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut arena: Arena<i64> = Arena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);

        let first = arena.alloc(1);
        arena.alloc(2);
        assert_eq!(arena.len(), 2);

        arena.free(first);
        assert_eq!(arena.len(), 1);

        arena.clear();
        assert!(arena.is_empty());
    }
}
