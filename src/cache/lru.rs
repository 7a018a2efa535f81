//! Recency List Module
//!
//! Arena-backed doubly-linked list used to track recency for LRU eviction.

// == Slot ==
#[derive(Debug)]
struct Slot<T> {
    item: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for LRU eviction strategy.
///
/// Items live in a slot array addressed by index, linked through intrusive
/// prev/next slot numbers:
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Freed slots are recycled, so a handle returned by `push_front` stays valid
/// until that item is removed.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Slot<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an item at the front and returns its slot handle.
    pub fn push_front(&mut self, item: T) -> usize {
        let slot = Slot {
            item,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(slot);
                idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };
        self.attach_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks a slot as most recently used.
    ///
    /// Returns false if the handle does not refer to a live slot.
    pub fn move_to_front(&mut self, idx: usize) -> bool {
        if !self.is_live(idx) {
            return false;
        }
        if self.head != Some(idx) {
            self.detach(idx);
            self.attach_front(idx);
        }
        true
    }

    // == Remove ==
    /// Removes a slot and returns its item.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if !self.is_live(idx) {
            return None;
        }
        self.detach(idx);
        self.len -= 1;
        self.free.push(idx);
        self.slots[idx].take().map(|slot| slot.item)
    }

    // == Pop Back ==
    /// Removes and returns the least recently used item.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Accessors ==
    /// Returns the most recently used item.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|idx| self.get(idx))
    }

    /// Returns the item stored at a slot handle.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots
            .get(idx)
            .and_then(Option::as_ref)
            .map(|slot| &slot.item)
    }

    /// Returns a mutable reference to the item stored at a slot handle.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots
            .get_mut(idx)
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.item)
    }

    /// Iterates items from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Length ==
    /// Returns the number of live items.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every item and releases all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Link Maintenance ==
    fn is_live(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Some(_)))
    }

    fn links(&self, idx: usize) -> (Option<usize>, Option<usize>) {
        match &self.slots[idx] {
            Some(slot) => (slot.prev, slot.next),
            None => (None, None),
        }
    }

    fn set_prev(&mut self, idx: usize, prev: Option<usize>) {
        if let Some(slot) = self.slots[idx].as_mut() {
            slot.prev = prev;
        }
    }

    fn set_next(&mut self, idx: usize, next: Option<usize>) {
        if let Some(slot) = self.slots[idx].as_mut() {
            slot.next = next;
        }
    }

    /// Unlinks a live slot from its neighbours, leaving the slot itself in place.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = self.links(idx);

        match prev {
            Some(p) => self.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.tail = prev,
        }

        self.set_prev(idx, None);
        self.set_next(idx, None);
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        self.set_prev(idx, None);
        self.set_next(idx, old_head);

        match old_head {
            Some(h) => self.set_prev(h, Some(idx)),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let slot = self.list.slots.get(idx)?.as_ref()?;
        self.cursor = slot.next;
        Some(&slot.item)
    }
}
