//! Location-aware adaptable binary min-heap.
//!
//! Entries live in an arena of generation-tagged slots; the heap itself is a
//! vector of arena indices. Each live entry records its current heap slot,
//! updated on every swap, so `replace_key`, `replace_value`, and `remove`
//! run in O(log n) against an arbitrary entry handle. At all times
//! `heap[entry.position] == entry.index` for every live entry.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{GraphError, Result};

/// Handle to a live entry in an [`AdaptablePriorityQueue`].
///
/// Becomes stale once the entry is deleted or removed; stale handles fail
/// validation with [`GraphError::InvalidEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}g{}", self.index, self.generation)
    }
}

struct EntryRecord<K, V> {
    key: K,
    value: V,
    /// Current slot within the heap vector.
    position: usize,
}

struct EntrySlot<K, V> {
    generation: u32,
    record: Option<EntryRecord<K, V>>,
}

type KeyComparator<K> = Box<dyn Fn(&K, &K) -> Ordering>;

/// Array-backed binary min-heap whose entries are addressable through
/// self-locating handles.
///
/// Keys are ordered by `K`'s natural order, or by a comparison function
/// supplied at construction. Ties are broken arbitrarily by heap structure;
/// there is no stability guarantee.
pub struct AdaptablePriorityQueue<K, V> {
    slots: Vec<EntrySlot<K, V>>,
    free_slots: Vec<u32>,
    heap: Vec<u32>,
    comparator: Option<KeyComparator<K>>,
}

impl<K, V> fmt::Debug for AdaptablePriorityQueue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptablePriorityQueue")
            .field("len", &self.heap.len())
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}

impl<K: Ord, V> AdaptablePriorityQueue<K, V> {
    /// Creates an empty queue ordered by the key type's natural order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_slots: Vec::new(),
            heap: Vec::new(),
            comparator: None,
        }
    }

    /// Creates an empty queue ordered by the supplied comparison function.
    #[must_use]
    pub fn with_comparator(comparator: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        Self {
            slots: Vec::new(),
            free_slots: Vec::new(),
            heap: Vec::new(),
            comparator: Some(Box::new(comparator)),
        }
    }

    /// Returns the number of entries in the queue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the queue holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Inserts a new (key, value) entry and returns its handle.
    pub fn insert(&mut self, key: K, value: V) -> EntryId {
        let position = self.heap.len();
        let record = EntryRecord {
            key,
            value,
            position,
        };
        let id = if let Some(index) = self.free_slots.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(record);
            EntryId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(EntrySlot {
                generation: 0,
                record: Some(record),
            });
            EntryId {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        };
        self.heap.push(id.index);
        self.up_heap(position);
        id
    }

    /// Returns the minimum (key, value) without removing it, or `None` if
    /// the queue is empty.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let index = *self.heap.first()?;
        let record = self.slots[index as usize].record.as_ref()?;
        Some((&record.key, &record.value))
    }

    /// Removes and returns the minimum (key, value), or `None` if the queue
    /// is empty.
    pub fn delete_min(&mut self) -> Option<(K, V)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let index = self.heap.pop().expect("heap is non-empty");
        if !self.heap.is_empty() {
            self.down_heap(0);
        }
        let record = self.release(index);
        Some((record.key, record.value))
    }

    /// Replaces the key of the given entry, returning the old key. The heap
    /// invariant is re-established by bubbling from the entry's current
    /// slot, in either direction.
    pub fn replace_key(&mut self, entry: EntryId, key: K) -> Result<K> {
        let position = self.validate(entry)?;
        let record = self.slots[entry.index as usize]
            .record
            .as_mut()
            .expect("validated entry is live");
        let old = std::mem::replace(&mut record.key, key);
        self.bubble(position);
        Ok(old)
    }

    /// Replaces the value of the given entry in O(1), returning the old
    /// value.
    pub fn replace_value(&mut self, entry: EntryId, value: V) -> Result<V> {
        self.validate(entry)?;
        let record = self.slots[entry.index as usize]
            .record
            .as_mut()
            .expect("validated entry is live");
        Ok(std::mem::replace(&mut record.value, value))
    }

    /// Removes an arbitrary entry, returning its (key, value).
    pub fn remove(&mut self, entry: EntryId) -> Result<(K, V)> {
        let position = self.validate(entry)?;
        let last = self.heap.len() - 1;
        self.swap(position, last);
        self.heap.pop();
        if position < self.heap.len() {
            self.bubble(position);
        }
        let record = self.release(entry.index);
        Ok((record.key, record.value))
    }

    /// Returns a reference to the key of a live entry.
    pub fn key(&self, entry: EntryId) -> Result<&K> {
        self.validate(entry)?;
        let record = self.slots[entry.index as usize]
            .record
            .as_ref()
            .expect("validated entry is live");
        Ok(&record.key)
    }

    /// Returns a reference to the value of a live entry.
    pub fn value(&self, entry: EntryId) -> Result<&V> {
        self.validate(entry)?;
        let record = self.slots[entry.index as usize]
            .record
            .as_ref()
            .expect("validated entry is live");
        Ok(&record.value)
    }

    /// Returns true if the handle refers to a live entry of this queue.
    #[must_use]
    pub fn contains(&self, entry: EntryId) -> bool {
        self.validate(entry).is_ok()
    }

    /// Checks that the handle refers to a live entry still resident at its
    /// recorded heap slot, and returns that slot.
    fn validate(&self, entry: EntryId) -> Result<usize> {
        let slot = self
            .slots
            .get(entry.index as usize)
            .filter(|slot| slot.generation == entry.generation)
            .ok_or(GraphError::InvalidEntry(entry))?;
        let record = slot
            .record
            .as_ref()
            .ok_or(GraphError::InvalidEntry(entry))?;
        if self.heap.get(record.position) != Some(&entry.index) {
            return Err(GraphError::InvalidEntry(entry));
        }
        Ok(record.position)
    }

    /// Takes the record out of a slot and retires the handle generation.
    fn release(&mut self, index: u32) -> EntryRecord<K, V> {
        let slot = &mut self.slots[index as usize];
        let record = slot.record.take().expect("released entry is live");
        slot.generation += 1;
        self.free_slots.push(index);
        record
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        match &self.comparator {
            Some(cmp) => cmp(a, b),
            None => a.cmp(b),
        }
    }

    fn key_at(&self, position: usize) -> &K {
        let index = self.heap[position] as usize;
        let record = self.slots[index]
            .record
            .as_ref()
            .expect("heap references live entries");
        &record.key
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let index_a = self.heap[a] as usize;
        let index_b = self.heap[b] as usize;
        self.slots[index_a]
            .record
            .as_mut()
            .expect("heap references live entries")
            .position = a;
        self.slots[index_b]
            .record
            .as_mut()
            .expect("heap references live entries")
            .position = b;
    }

    fn up_heap(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if self.compare(self.key_at(position), self.key_at(parent)) != Ordering::Less {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn down_heap(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            if left >= self.heap.len() {
                break;
            }
            let mut smallest = left;
            let right = left + 1;
            if right < self.heap.len()
                && self.compare(self.key_at(right), self.key_at(left)) == Ordering::Less
            {
                smallest = right;
            }
            if self.compare(self.key_at(smallest), self.key_at(position)) != Ordering::Less {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }

    /// Restores the heap invariant from an arbitrary slot, bubbling up or
    /// down as required. Never assumes the entry must rise.
    fn bubble(&mut self, position: usize) {
        if position > 0 {
            let parent = (position - 1) / 2;
            if self.compare(self.key_at(position), self.key_at(parent)) == Ordering::Less {
                self.up_heap(position);
                return;
            }
        }
        self.down_heap(position);
    }
}

impl<K: Ord, V> Default for AdaptablePriorityQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
