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

use super::{max_fill, pack, Table, NIL};

use crate::key::Key;

use std::hash::BuildHasher;

impl<K: Key, V: Copy> Table<K, V> {
    /// Stores a new entry in the vacant `slot` returned by [`find`] and
    /// appends it to the insertion order.
    ///
    /// Grows the table before returning if it is now over its fill limit. A
    /// grow that cannot allocate aborts instead of leaving a half-moved table.
    ///
    /// [`find`]: struct.Table.html#method.find
    pub(crate) fn insert_at<H: BuildHasher>(
        &mut self,
        slot: usize,
        key: K,
        value: V,
        build_hasher: &H,
    ) {
        if slot == self.capacity() {
            self.contains_empty_key = true;
        }

        self.keys[slot] = key;
        self.values[slot] = value;
        self.link_last(slot);
        self.len += 1;

        if self.len > self.max_fill {
            let new_capacity = super::array_size(self.len + 1, self.load_factor);
            self.rehash(new_capacity, build_hasher);

            debug_assert!(self.len <= max_fill(self.capacity(), self.load_factor));
        }
    }

    fn link_last(&mut self, slot: usize) {
        if self.last == NIL {
            self.first = slot as u32;
            self.links[slot] = pack(NIL, NIL);
        } else {
            let last = self.last as usize;

            self.set_next(last, slot as u32);
            self.links[slot] = pack(self.last, NIL);
        }

        self.last = slot as u32;
    }
}
