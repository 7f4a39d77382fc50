//! # Sentinel-Bounded Linked List
//!
//! A singly linked list whose interior nodes sit between two permanent
//! sentinel nodes. All nodes, sentinels included, live in one
//! [`Arena`]; links are typed slot indices, so the tail sentinel can
//! point at itself without any shared ownership.
//!
//! ```text
//! [head] -> [a] -> [b] -> [c] -> [tail] -+
//!                                  ^     |
//!                                  +-----+
//! ```
//!
//! Positions are 0-based and count interior nodes only. Access is
//! positional: `get`, `set`, `insert` and `remove` walk from the head
//! sentinel, while `add` appends in O(1) through a cached pointer to the
//! last interior node.
//!
//! ## Example
//!
//! ```
//! use slist::LinkedList;
//!
//! let mut list = LinkedList::new();
//! list.add("x")?;
//! list.add("y")?;
//! list.insert(1, "z")?;
//!
//! assert_eq!(list.count(), 3);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["x", "z", "y"]);
//! assert_eq!(list.remove(0)?, "x");
//! # Ok::<(), slist::ListError>(())
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::arena::{Arena, ArenaId};
use crate::error::{ListError, Operation, Result};
use crate::render::{DisplayWith, Render};

const SENTINELS: usize = 2;

type NodeId<T> = ArenaId<Node<T>>;

#[derive(Debug)]
struct Node<T> {
    /// `None` only on the two sentinels.
    data: Option<T>,
    next: NodeId<T>,
}

impl<T> Node<T> {
    fn sentinel(next: NodeId<T>) -> Self {
        Self { data: None, next }
    }

    fn interior(data: T, next: NodeId<T>) -> Self {
        Self {
            data: Some(data),
            next,
        }
    }
}

fn rejected(err: ListError) -> ListError {
    log::warn!("{err}");
    err
}

fn sentinel_in_chain(op: Operation) -> ListError {
    rejected(ListError::Corrupted {
        op,
        reason: "sentinel found inside the interior chain",
    })
}

/// A generic singly linked list with head and tail sentinels.
///
/// The list owns every node it creates and every payload stored in it.
/// Callers that want the list to hold borrowed data can store references
/// (`LinkedList<&T>`); the borrow checker then keeps the referents alive
/// for as long as they are stored.
///
/// Not internally synchronized: wrap a list in a lock to share it
/// between threads.
pub struct LinkedList<T> {
    nodes: Arena<Node<T>>,
    head: NodeId<T>,
    tail: NodeId<T>,
    /// Last interior node, or `head` while the list is empty.
    last: NodeId<T>,
    count: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Creates an empty list with both sentinels wired up.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` elements before the
    /// node storage has to grow.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_arena(Arena::with_capacity(capacity.saturating_add(SENTINELS)))
    }

    /// Fallible counterpart of [`LinkedList::new`].
    ///
    /// # Errors
    ///
    /// [`ListError::Allocation`] if the sentinel storage cannot be reserved.
    pub fn try_new() -> Result<Self> {
        Self::try_with_capacity(0)
    }

    /// Fallible counterpart of [`LinkedList::with_capacity`].
    ///
    /// # Errors
    ///
    /// [`ListError::Allocation`] if storage for the sentinels plus
    /// `capacity` elements cannot be reserved. Nothing stays allocated in
    /// that case.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut nodes = Arena::new();
        nodes
            .try_reserve(capacity.saturating_add(SENTINELS))
            .map_err(|_| {
                rejected(ListError::Allocation {
                    op: Operation::Create,
                })
            })?;
        Ok(Self::from_arena(nodes))
    }

    fn from_arena(mut nodes: Arena<Node<T>>) -> Self {
        let tail = nodes.alloc_with(Node::sentinel);
        let head = nodes.alloc(Node::sentinel(tail));
        Self {
            nodes,
            head,
            tail,
            last: head,
            count: 0,
        }
    }

    /// Releases every interior node, then both sentinels, and returns how
    /// many interior nodes were released.
    ///
    /// Dropping a list releases everything as well; `destroy` additionally
    /// checks the sentinel linkage first and reports what it released.
    ///
    /// # Errors
    ///
    /// [`ListError::Corrupted`] if the chain fails [`LinkedList::verify`].
    /// The storage is released either way.
    pub fn destroy(mut self) -> Result<usize> {
        self.verify_for(Operation::Destroy)?;
        let mut released = 0;
        while self.count > 0 {
            self.unlink_after(self.head, Operation::Destroy)?;
            released += 1;
        }
        log::debug!("destroy: released {released} nodes and both sentinels");
        Ok(released)
    }

    /// Number of elements, excluding the sentinels. O(1).
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Alias of [`LinkedList::count`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// How many elements fit before `add` or `insert` has to grow the node
    /// storage. Slots released by `remove` count as free room.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity() - SENTINELS
    }

    /// Appends `data` just before the tail sentinel.
    ///
    /// # Errors
    ///
    /// [`ListError::Allocation`] if no node slot can be reserved; the list
    /// is unchanged in that case.
    pub fn add(&mut self, data: T) -> Result<()> {
        self.reserve_node(Operation::Add)?;
        self.link_last(data);
        Ok(())
    }

    /// Inserts `data` so that it becomes the element at `index`, shifting
    /// the former occupant and everything after it one position later.
    ///
    /// Only existing positions are accepted: `index` must be below
    /// [`count`](LinkedList::count), so this never appends and always
    /// fails on an empty list. Use [`LinkedList::add`] to append.
    ///
    /// ```
    /// use slist::{LinkedList, ListError};
    ///
    /// let mut list: LinkedList<_> = [1, 3].into_iter().collect();
    /// list.insert(1, 2)?;
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// assert!(matches!(list.insert(3, 4), Err(ListError::IndexOutOfBounds { .. })));
    /// # Ok::<(), ListError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`], [`ListError::IndexOutOfBounds`] or
    /// [`ListError::Allocation`].
    pub fn insert(&mut self, index: usize, data: T) -> Result<()> {
        self.check_index(Operation::Insert, index)?;
        self.reserve_node(Operation::Insert)?;

        let prev = self.walk(self.head, index);
        let next = self.nodes.get(prev).next;
        let node = self.nodes.alloc(Node::interior(data, next));
        self.nodes.get_mut(prev).next = node;
        self.count += 1;
        log::trace!("insert: linked slot {} at position {index}", node.index());
        Ok(())
    }

    /// Returns the element at `index`. O(index).
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`] or [`ListError::IndexOutOfBounds`].
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(Operation::Get, index)?;
        let node = self.walk(self.head, index + 1);
        self.nodes
            .get(node)
            .data
            .as_ref()
            .ok_or_else(|| sentinel_in_chain(Operation::Get))
    }

    /// Mutable access to the element at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`LinkedList::get`].
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(Operation::Get, index)?;
        self.payload_mut(index, Operation::Get)
    }

    /// Replaces the element at `index` with `data` and returns the previous
    /// element. Never allocates.
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`] or [`ListError::IndexOutOfBounds`].
    pub fn set(&mut self, index: usize, data: T) -> Result<T> {
        self.check_index(Operation::Set, index)?;
        let slot = self.payload_mut(index, Operation::Set)?;
        Ok(std::mem::replace(slot, data))
    }

    /// Unlinks the element at `index`, releases its node and returns the
    /// element.
    ///
    /// # Errors
    ///
    /// [`ListError::Empty`] or [`ListError::IndexOutOfBounds`].
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_index(Operation::Remove, index)?;
        let prev = self.walk(self.head, index);
        self.unlink_after(prev, Operation::Remove)
    }

    /// Releases every element, keeping the sentinels and the storage.
    pub fn clear(&mut self) {
        let released = self.count;
        let mut nodes = std::mem::take(&mut self.nodes);
        nodes.clear();
        *self = Self::from_arena(nodes);
        log::debug!("clear: released {released} nodes");
    }

    /// Walks the chain and checks every structural invariant: both
    /// sentinels present and payload-free, `tail` looping to itself,
    /// exactly `count` interior nodes between them, the cached last node
    /// up to date, and no unreachable slots left behind.
    ///
    /// # Errors
    ///
    /// [`ListError::Corrupted`] describing the first violation found.
    pub fn verify(&self) -> Result<()> {
        self.verify_for(Operation::Verify)
    }

    /// Borrowing iterator from the first element to the last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cursor: self.nodes.get(self.head).next,
            remaining: self.count,
        }
    }

    /// Lazily renders each element through `render`, front to back.
    ///
    /// `render` runs once per element, only as the returned iterator is
    /// advanced. The iterator is consumed by the walk; call `render` again
    /// for a fresh one.
    ///
    /// ```
    /// use slist::LinkedList;
    ///
    /// let list: LinkedList<u8> = (1..=3).collect();
    /// let parts: Vec<String> = list.render(|n| format!("#{n}")).collect();
    /// assert_eq!(parts, ["#1", "#2", "#3"]);
    /// ```
    pub fn render<F>(&self, render: F) -> Render<'_, T, F>
    where
        F: Fn(&T) -> String,
    {
        Render::new(self.iter(), render)
    }

    /// Formats the whole chain, sentinels included, as
    /// `[head]->[a]->[b]->[tail]`, rendering each element through `render`.
    ///
    /// ```
    /// use slist::LinkedList;
    ///
    /// let list: LinkedList<&str> = ["a", "b"].into_iter().collect();
    /// let shown = list.display_with(|s| s.to_uppercase()).to_string();
    /// assert_eq!(shown, "[head]->[A]->[B]->[tail]");
    /// ```
    pub fn display_with<F>(&self, render: F) -> DisplayWith<'_, T, F>
    where
        F: Fn(&T) -> String,
    {
        DisplayWith::new(self, render)
    }

    fn check_index(&self, op: Operation, index: usize) -> Result<()> {
        if self.count == 0 {
            return Err(rejected(ListError::Empty { op }));
        }
        if index >= self.count {
            return Err(rejected(ListError::IndexOutOfBounds {
                op,
                index,
                len: self.count,
            }));
        }
        Ok(())
    }

    fn reserve_node(&mut self, op: Operation) -> Result<()> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| rejected(ListError::Allocation { op }))
    }

    /// Id of the node `steps` links after `from`.
    fn walk(&self, from: NodeId<T>, steps: usize) -> NodeId<T> {
        (0..steps).fold(from, |id, _| self.nodes.get(id).next)
    }

    fn payload_mut(&mut self, index: usize, op: Operation) -> Result<&mut T> {
        let node = self.walk(self.head, index + 1);
        self.nodes
            .get_mut(node)
            .data
            .as_mut()
            .ok_or_else(|| sentinel_in_chain(op))
    }

    fn link_last(&mut self, data: T) {
        let node = self.nodes.alloc(Node::interior(data, self.tail));
        self.nodes.get_mut(self.last).next = node;
        self.last = node;
        self.count += 1;
        log::trace!("add: linked slot {} at position {}", node.index(), self.count - 1);
    }

    /// Detaches the interior node following `prev` and frees its slot.
    fn unlink_after(&mut self, prev: NodeId<T>, op: Operation) -> Result<T> {
        let node = self.nodes.get(prev).next;
        if node == self.tail {
            return Err(sentinel_in_chain(op));
        }
        let next = self.nodes.get(node).next;
        self.nodes.get_mut(prev).next = next;
        if node == self.last {
            self.last = prev;
        }
        self.count -= 1;
        log::trace!("{op}: unlinked slot {}", node.index());
        self.nodes
            .free(node)
            .and_then(|node| node.data)
            .ok_or_else(|| sentinel_in_chain(op))
    }

    fn verify_for(&self, op: Operation) -> Result<()> {
        let corrupted = |reason: &'static str| rejected(ListError::Corrupted { op, reason });

        let head = self
            .nodes
            .try_get(self.head)
            .ok_or_else(|| corrupted("head sentinel is missing"))?;
        let tail = self
            .nodes
            .try_get(self.tail)
            .ok_or_else(|| corrupted("tail sentinel is missing"))?;
        if head.data.is_some() || tail.data.is_some() {
            return Err(corrupted("sentinel carries a payload"));
        }
        if tail.next != self.tail {
            return Err(corrupted("tail does not loop to itself"));
        }

        let mut prev = self.head;
        let mut cursor = head.next;
        let mut steps = 0;
        while cursor != self.tail {
            if steps == self.count {
                return Err(corrupted("chain is longer than the element count"));
            }
            let node = self
                .nodes
                .try_get(cursor)
                .ok_or_else(|| corrupted("chain links to a vacant slot"))?;
            if node.data.is_none() {
                return Err(corrupted("sentinel found inside the interior chain"));
            }
            prev = cursor;
            cursor = node.next;
            steps += 1;
        }

        if steps != self.count {
            return Err(corrupted("chain is shorter than the element count"));
        }
        if prev != self.last {
            return Err(corrupted("cached last node is stale"));
        }
        if self.nodes.len() != self.count + SENTINELS {
            return Err(corrupted("storage holds unreachable nodes"));
        }
        Ok(())
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.count);
        list.extend(self.iter().cloned());
        list
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for data in iter {
            self.link_last(data);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Borrowing iterator returned by [`LinkedList::iter`].
pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    cursor: NodeId<T>,
    remaining: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.cursor);
        self.cursor = node.next;
        self.remaining -= 1;
        node.data.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; each step detaches the first element in O(1).
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.list.is_empty() {
            return None;
        }
        let head = self.list.head;
        let data = self.list.unlink_after(head, Operation::Remove);
        debug_assert!(data.is_ok(), "owning iteration hit broken linkage");
        if data.is_err() {
            // Stop for good so `size_hint` agrees with what is left to yield.
            self.list.count = 0;
        }
        data.ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.count, Some(self.list.count))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
