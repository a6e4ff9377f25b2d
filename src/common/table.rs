// MIT License
//
// Copyright (c) 2020 Gregory Meyer
//
// Permission is hereby granted, free of charge, to any person
// obtaining a copy of this software and associated documentation files
// (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of the Software,
// and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
// BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
// ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! A single-threaded, insertion-ordered open addressing hash table.
//!
//! Entries live in flat `keys` and `values` arrays and are found by linear
//! probing. Slots are vacant when their key is the empty marker, so removal
//! uses backward shifting instead of tombstones. The empty-marker key itself
//! is stored in a dedicated sentinel slot at index `capacity`, guarded by
//! `contains_empty_key`.
//!
//! Insertion order is kept by a doubly linked list threaded through `links`:
//! one `u64` per slot, the previous slot in the high half and the next slot in
//! the low half, [`NIL`] marking the list ends.
//!
//! [`NIL`]: constant.NIL.html

pub(crate) mod insert;
pub(crate) mod modify;
pub(crate) mod rehash;
pub(crate) mod remove;

pub(crate) use rehash::{array_size, max_fill};

use crate::key::Key;

#[cfg(test)]
use std::hash::BuildHasher;

/// Slot index meaning "no neighbor".
pub(crate) const NIL: u32 = u32::MAX;

const NIL_LINK: u64 = u64::MAX;

#[derive(Clone)]
pub(crate) struct Table<K, V> {
    keys: Box<[K]>,
    values: Box<[V]>,
    links: Box<[u64]>,
    first: u32,
    last: u32,
    mask: usize,
    len: usize,
    max_fill: usize,
    min_capacity: usize,
    load_factor: f32,
    contains_empty_key: bool,
    filler: V,
}

/// The outcome of looking a key up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// The key is stored in this slot.
    Found(usize),
    /// The key is absent; this is the slot it would be inserted into.
    Vacant(usize),
}

/// The position of a live cursor within one table's list.
///
/// Backward shifting relocates entries, so any code that holds slot indices
/// across a removal must pass its cursor to the table to have it re-homed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub(crate) prev: u32,
    pub(crate) next: u32,
}

impl ListCursor {
    pub(crate) fn relocate(&mut self, from: usize, to: usize) {
        if self.prev as usize == from {
            self.prev = to as u32;
        }

        if self.next as usize == from {
            self.next = to as u32;
        }
    }
}

/// An entry together with its list neighbors.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Visit<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prev: u32,
    pub(crate) next: u32,
}

#[inline]
fn pack(prev: u32, next: u32) -> u64 {
    (u64::from(prev) << 32) | u64::from(next)
}

#[inline]
fn prev_of(link: u64) -> u32 {
    (link >> 32) as u32
}

#[inline]
fn next_of(link: u64) -> u32 {
    link as u32
}

impl<K: Key, V: Copy> Table<K, V> {
    /// Creates a table with `capacity` slots. `capacity` also becomes the
    /// size below which the table never shrinks on removal.
    pub(crate) fn new(capacity: usize, load_factor: f32, filler: V) -> Self {
        assert!(capacity >= 2 && capacity.is_power_of_two());

        Self {
            keys: vec![K::EMPTY; capacity + 1].into_boxed_slice(),
            values: vec![filler; capacity + 1].into_boxed_slice(),
            links: vec![NIL_LINK; capacity + 1].into_boxed_slice(),
            first: NIL,
            last: NIL,
            mask: capacity - 1,
            len: 0,
            max_fill: max_fill(capacity, load_factor),
            min_capacity: capacity,
            load_factor,
            contains_empty_key: false,
            filler,
        }
    }

    pub(crate) fn find(&self, hash: u64, key: K) -> Probe {
        if key.is_empty_marker() {
            let sentinel = self.capacity();

            return if self.contains_empty_key {
                Probe::Found(sentinel)
            } else {
                Probe::Vacant(sentinel)
            };
        }

        let mut pos = hash as usize & self.mask;

        loop {
            let current = self.keys[pos];

            if current.is_empty_marker() {
                return Probe::Vacant(pos);
            }

            if current.bits_eq(key) {
                return Probe::Found(pos);
            }

            pos = (pos + 1) & self.mask;
        }
    }

    #[inline]
    pub(crate) fn key_at(&self, slot: usize) -> K {
        self.keys[slot]
    }

    #[inline]
    pub(crate) fn value_at(&self, slot: usize) -> V {
        self.values[slot]
    }

    #[inline]
    pub(crate) fn set_value_at(&mut self, slot: usize, value: V) {
        self.values[slot] = value;
    }

    /// Returns `true` if `slot` is in bounds and holds an entry.
    pub(crate) fn is_occupied(&self, slot: usize) -> bool {
        let sentinel = self.capacity();

        if slot == sentinel {
            self.contains_empty_key
        } else {
            slot < sentinel && !self.keys[slot].is_empty_marker()
        }
    }

    /// Reads the entry in `slot` along with its list neighbors, or `None` if
    /// the slot is vacant or out of bounds.
    pub(crate) fn visit(&self, slot: usize) -> Option<Visit<K, V>> {
        if !self.is_occupied(slot) {
            return None;
        }

        let link = self.links[slot];

        Some(Visit {
            key: self.keys[slot],
            value: self.values[slot],
            prev: prev_of(link),
            next: next_of(link),
        })
    }

    pub(crate) fn first_slot(&self) -> Option<usize> {
        (self.first != NIL).then(|| self.first as usize)
    }

    pub(crate) fn last_slot(&self) -> Option<usize> {
        (self.last != NIL).then(|| self.last as usize)
    }

    pub(crate) fn next_slot(&self, slot: usize) -> Option<usize> {
        let next = next_of(self.links[slot]);

        (next != NIL).then(|| next as usize)
    }

    /// Iterates over occupied slots in insertion order.
    pub(crate) fn slots(&self) -> Slots<'_, K, V> {
        Slots {
            table: self,
            next: self.first,
        }
    }

    pub(crate) fn contains_value(&self, value: V) -> bool
    where
        V: PartialEq,
    {
        self.slots().any(|slot| self.values[slot] == value)
    }

    /// Removes every entry without releasing any memory.
    pub(crate) fn clear(&mut self) {
        if self.is_empty() {
            return;
        }

        self.keys.fill(K::EMPTY);
        self.links.fill(NIL_LINK);
        self.contains_empty_key = false;
        self.first = NIL;
        self.last = NIL;
        self.len = 0;
    }

    /// Checks every structural invariant of the table, panicking on the first
    /// violation.
    #[cfg(test)]
    pub(crate) fn assert_consistent<H: BuildHasher>(&self, build_hasher: &H) {
        let capacity = self.capacity();

        assert!(self.len <= self.max_fill);
        assert!(self.max_fill < capacity);

        let occupied = (0..capacity)
            .filter(|&slot| !self.keys[slot].is_empty_marker())
            .count()
            + usize::from(self.contains_empty_key);
        assert_eq!(occupied, self.len);

        for slot in (0..capacity).filter(|&slot| !self.keys[slot].is_empty_marker()) {
            let mut pos = crate::hash::hash(build_hasher, self.keys[slot]) as usize & self.mask;

            while pos != slot {
                assert!(
                    !self.keys[pos].is_empty_marker(),
                    "probe path of slot {} crosses vacant slot {}",
                    slot,
                    pos
                );

                pos = (pos + 1) & self.mask;
            }
        }

        let mut seen = vec![false; capacity + 1];
        let mut previous = NIL;
        let mut walked = 0;

        for slot in self.slots() {
            assert!(self.is_occupied(slot), "list reaches vacant slot {}", slot);
            assert!(!seen[slot], "list revisits slot {}", slot);
            assert_eq!(prev_of(self.links[slot]), previous);

            seen[slot] = true;
            previous = slot as u32;
            walked += 1;
        }

        assert_eq!(walked, self.len);
        assert_eq!(self.last, previous);
    }
}

impl<K, V> Table<K, V> {
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.mask + 1
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn set_prev(&mut self, slot: usize, prev: u32) {
        self.links[slot] = (self.links[slot] & 0xffff_ffff) | (u64::from(prev) << 32);
    }

    #[inline]
    fn set_next(&mut self, slot: usize, next: u32) {
        self.links[slot] = (self.links[slot] & !0xffff_ffff) | u64::from(next);
    }
}

pub(crate) struct Slots<'a, K, V> {
    table: &'a Table<K, V>,
    next: u32,
}

impl<K, V> Iterator for Slots<'_, K, V> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next == NIL {
            return None;
        }

        let slot = self.next as usize;
        self.next = next_of(self.table.links[slot]);

        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::hash::{self, BitsState};

    use std::hash::Hasher;

    /// Hashes every key to the same native hash.
    #[derive(Clone, Copy, Default)]
    struct Collide(u64);

    impl BuildHasher for Collide {
        type Hasher = CollideHasher;

        fn build_hasher(&self) -> CollideHasher {
            CollideHasher(self.0)
        }
    }

    struct CollideHasher(u64);

    impl Hasher for CollideHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, _: &[u8]) {}
    }

    fn put<H: BuildHasher>(table: &mut Table<i64, i64>, build_hasher: &H, key: i64, value: i64) {
        table.put(hash::hash(build_hasher, key), key, value, build_hasher);
    }

    fn remove<H: BuildHasher>(table: &mut Table<i64, i64>, build_hasher: &H, key: i64) -> Option<i64> {
        table.remove(hash::hash(build_hasher, key), key, build_hasher)
    }

    fn keys(table: &Table<i64, i64>) -> Vec<i64> {
        table.slots().map(|slot| table.key_at(slot)).collect()
    }

    #[test]
    fn find_reports_insertion_point() {
        let table: Table<i64, i64> = Table::new(16, 0.75, 0);
        let hash = hash::hash(&BitsState, 5i64);

        assert_eq!(table.find(hash, 5), Probe::Vacant(hash as usize & 15));
        assert_eq!(table.find(0, 0), Probe::Vacant(16));
    }

    #[test]
    fn empty_marker_uses_sentinel_slot() {
        let mut table = Table::new(16, 0.75, 0);

        put(&mut table, &BitsState, 1, 10);
        put(&mut table, &BitsState, 0, 20);
        put(&mut table, &BitsState, 2, 30);

        assert_eq!(table.find(0, 0), Probe::Found(16));
        assert_eq!(table.keys[..16].iter().filter(|&&k| k != 0).count(), 2);
        assert_eq!(keys(&table), vec![1, 0, 2]);
        table.assert_consistent(&BitsState);

        assert_eq!(remove(&mut table, &BitsState, 0), Some(20));
        assert_eq!(table.find(0, 0), Probe::Vacant(16));
        assert_eq!(keys(&table), vec![1, 2]);
        table.assert_consistent(&BitsState);
    }

    #[test]
    fn backward_shift_closes_collision_cluster() {
        let collide = Collide(7);
        let mut table = Table::new(16, 0.75, 0);

        for key in 1..=6 {
            put(&mut table, &collide, key, key * 10);
        }

        table.assert_consistent(&collide);

        assert_eq!(remove(&mut table, &collide, 2), Some(20));
        assert_eq!(remove(&mut table, &collide, 5), Some(50));
        table.assert_consistent(&collide);

        for key in [1, 3, 4, 6] {
            let hash = hash::hash(&collide, key);
            assert!(matches!(table.find(hash, key), Probe::Found(_)));
        }

        assert_eq!(keys(&table), vec![1, 3, 4, 6]);
    }

    #[test]
    fn wrapping_cluster_is_repaired() {
        let native = (0..).find(|&h| hash::mix(h) & 7 == 6).unwrap();
        let collide = Collide(native);
        let mut table = Table::new(8, 0.75, 0);

        for key in 1..=5 {
            put(&mut table, &collide, key, key);
        }

        assert_eq!(table.find(hash::hash(&collide, 5i64), 5), Probe::Found(2));
        assert_eq!(remove(&mut table, &collide, 1), Some(1));
        table.assert_consistent(&collide);
        assert_eq!(table.find(hash::hash(&collide, 5i64), 5), Probe::Found(1));
        assert_eq!(keys(&table), vec![2, 3, 4, 5]);
    }

    #[test]
    fn reinsertion_keeps_position() {
        let mut table = Table::new(16, 0.75, 0);

        for key in 1..=4 {
            put(&mut table, &BitsState, key, key);
        }

        put(&mut table, &BitsState, 2, 200);
        assert_eq!(keys(&table), vec![1, 2, 3, 4]);

        remove(&mut table, &BitsState, 2);
        put(&mut table, &BitsState, 2, 2);
        assert_eq!(keys(&table), vec![1, 3, 4, 2]);
    }

    #[test]
    fn grow_then_shrink() {
        let mut table = Table::new(16, 0.75, 0);
        assert_eq!(table.max_fill, 12);

        for key in 1..=12 {
            put(&mut table, &BitsState, key, key);
        }

        assert_eq!(table.capacity(), 16);

        put(&mut table, &BitsState, 13, 13);
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.max_fill, 24);
        table.assert_consistent(&BitsState);
        assert_eq!(keys(&table), (1..=13).collect::<Vec<_>>());

        let mut capacities = vec![];

        for key in 1..=10 {
            remove(&mut table, &BitsState, key);
            capacities.push(table.capacity());
        }

        assert_eq!(table.len(), 3);
        assert_eq!(table.capacity(), 16);
        assert_eq!(capacities.iter().filter(|&&c| c == 16).count(), 3);
        table.assert_consistent(&BitsState);
        assert_eq!(keys(&table), vec![11, 12, 13]);
    }

    #[test]
    fn clear_resets_list() {
        let mut table = Table::new(4, 0.5, 0);

        for key in 0..10 {
            put(&mut table, &BitsState, key, key);
        }

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.first_slot(), None);
        assert_eq!(table.last_slot(), None);
        table.assert_consistent(&BitsState);
    }
}
