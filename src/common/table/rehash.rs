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

use super::{pack, Table, NIL, NIL_LINK};

use crate::{error::MAX_CAPACITY, hash, key::Key};

use std::hash::BuildHasher;

use tracing::{debug, warn};

/// Returns the fill limit of a table with `capacity` slots.
pub(crate) fn max_fill(capacity: usize, load_factor: f32) -> usize {
    let limit = (capacity as f64 * f64::from(load_factor)).floor() as usize;

    limit.clamp(1, capacity - 1)
}

/// Returns the smallest table capacity that can hold `expected` entries.
///
/// # Panics
///
/// Panics if the capacity would exceed the largest supported table.
pub(crate) fn array_size(expected: usize, load_factor: f32) -> usize {
    match checked_array_size(expected, load_factor) {
        Some(capacity) => capacity,
        None => panic!(
            "table too large: {} entries at load factor {}",
            expected, load_factor
        ),
    }
}

/// Like [`array_size`], but returns `None` past the largest supported table.
pub(crate) fn checked_array_size(expected: usize, load_factor: f32) -> Option<usize> {
    let capacity = (expected as f64 / f64::from(load_factor)).ceil();

    if capacity > MAX_CAPACITY as f64 {
        return None;
    }

    Some((capacity as usize).max(2).next_power_of_two())
}

struct Arrays<K, V> {
    keys: Box<[K]>,
    values: Box<[V]>,
    links: Box<[u64]>,
}

fn try_boxed_slice<T: Copy>(len: usize, fill: T) -> Option<Box<[T]>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len).ok()?;
    vec.resize(len, fill);

    Some(vec.into_boxed_slice())
}

impl<K: Key, V: Copy> Table<K, V> {
    /// Moves every entry into a fresh table with `new_capacity` slots,
    /// preserving insertion order.
    pub(crate) fn rehash<H: BuildHasher>(&mut self, new_capacity: usize, build_hasher: &H) {
        let arrays = Arrays {
            keys: vec![K::EMPTY; new_capacity + 1].into_boxed_slice(),
            values: vec![self.filler; new_capacity + 1].into_boxed_slice(),
            links: vec![NIL_LINK; new_capacity + 1].into_boxed_slice(),
        };

        self.rehash_into(arrays, build_hasher);
    }

    /// Like [`rehash`], but returns `false` and leaves the table untouched if
    /// the new arrays cannot be allocated.
    ///
    /// [`rehash`]: #method.rehash
    pub(crate) fn try_rehash<H: BuildHasher>(&mut self, new_capacity: usize, build_hasher: &H) -> bool {
        let arrays = try_boxed_slice(new_capacity + 1, K::EMPTY).and_then(|keys| {
            let values = try_boxed_slice(new_capacity + 1, self.filler)?;
            let links = try_boxed_slice(new_capacity + 1, NIL_LINK)?;

            Some(Arrays {
                keys,
                values,
                links,
            })
        });

        match arrays {
            Some(arrays) => {
                self.rehash_into(arrays, build_hasher);

                true
            }
            None => {
                warn!(new_capacity, len = self.len, "could not allocate table while trimming");

                false
            }
        }
    }

    /// Shrinks the table to the smallest capacity that holds `max(n, len)`
    /// entries.
    ///
    /// Returns `true` if the table is already small enough or was shrunk, and
    /// `false` if the smaller table could not be allocated.
    pub(crate) fn trim<H: BuildHasher>(&mut self, n: usize, build_hasher: &H) -> bool {
        let expected = n.max(self.len);

        if expected >= self.capacity() {
            return true;
        }

        let new_capacity = match checked_array_size(expected, self.load_factor) {
            Some(capacity) => capacity,
            None => return true,
        };

        if new_capacity >= self.capacity() || self.len > max_fill(new_capacity, self.load_factor) {
            return true;
        }

        self.try_rehash(new_capacity, build_hasher)
    }

    fn rehash_into<H: BuildHasher>(&mut self, arrays: Arrays<K, V>, build_hasher: &H) {
        let Arrays {
            mut keys,
            mut values,
            mut links,
        } = arrays;

        let old_capacity = self.capacity();
        let new_capacity = keys.len() - 1;
        let new_mask = new_capacity - 1;

        let mut first = NIL;
        let mut previous = NIL;

        for slot in self.slots() {
            let key = self.keys[slot];

            let pos = if slot == old_capacity {
                new_capacity
            } else {
                let mut pos = hash::hash(build_hasher, key) as usize & new_mask;

                while !keys[pos].is_empty_marker() {
                    pos = (pos + 1) & new_mask;
                }

                pos
            };

            keys[pos] = key;
            values[pos] = self.values[slot];

            if previous == NIL {
                first = pos as u32;
                links[pos] = pack(NIL, NIL);
            } else {
                let prev = previous as usize;

                links[prev] = (links[prev] & !0xffff_ffff) | pos as u64;
                links[pos] = pack(previous, NIL);
            }

            previous = pos as u32;
        }

        self.keys = keys;
        self.values = values;
        self.links = links;
        self.first = first;
        self.last = previous;
        self.mask = new_mask;
        self.max_fill = max_fill(new_capacity, self.load_factor);

        debug!(old_capacity, new_capacity, len = self.len, "rehashed table");
    }
}
