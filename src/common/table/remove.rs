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

use super::{max_fill, next_of, prev_of, ListCursor, Table, NIL};

use crate::{hash, key::Key};

use std::hash::BuildHasher;

impl<K: Key, V: Copy> Table<K, V> {
    /// Removes the entry in the occupied `slot` and returns its value.
    ///
    /// Shrinks the table by half if it has grown past its initial capacity
    /// and is now less than a quarter of its fill limit.
    pub(crate) fn remove_at<H: BuildHasher>(&mut self, slot: usize, build_hasher: &H) -> V {
        let value = self.remove_slot(slot, None, build_hasher);
        self.shrink_if_sparse(build_hasher);

        value
    }

    /// Halves the table until it is back at its initial capacity or holds at
    /// least a quarter of its fill limit.
    ///
    /// Returns `true` if the table was rehashed, which moves every slot.
    pub(crate) fn shrink_if_sparse<H: BuildHasher>(&mut self, build_hasher: &H) -> bool {
        let mut new_capacity = self.capacity();

        while new_capacity > self.min_capacity
            && self.len < max_fill(new_capacity, self.load_factor) / 4
        {
            new_capacity /= 2;
        }

        if new_capacity == self.capacity() {
            return false;
        }

        self.rehash(new_capacity, build_hasher);

        true
    }

    /// Removes the entry in `slot` on behalf of a cursor positioned next to
    /// it, returning the removed entry.
    ///
    /// The cursor side that pointed at `slot` is replaced by that slot's own
    /// neighbor, read from the list rather than trusted from the cursor, and
    /// both sides follow any entry the backward shift relocates. This never
    /// shrinks the table, so the cursor stays valid; the cursor calls
    /// [`shrink_if_sparse`] once it is done with the table.
    ///
    /// [`shrink_if_sparse`]: #method.shrink_if_sparse
    pub(crate) fn remove_tracked<H: BuildHasher>(
        &mut self,
        slot: usize,
        cursor: &mut ListCursor,
        build_hasher: &H,
    ) -> (K, V) {
        let link = self.links[slot];

        if cursor.prev as usize == slot {
            cursor.prev = prev_of(link);
        }

        if cursor.next as usize == slot {
            cursor.next = next_of(link);
        }

        let key = self.keys[slot];
        let value = self.remove_slot(slot, Some(cursor), build_hasher);

        (key, value)
    }

    fn remove_slot<H: BuildHasher>(
        &mut self,
        slot: usize,
        cursor: Option<&mut ListCursor>,
        build_hasher: &H,
    ) -> V {
        let value = self.values[slot];

        self.unlink(slot);
        self.len -= 1;

        if slot == self.capacity() {
            self.contains_empty_key = false;
            self.values[slot] = self.filler;
        } else {
            self.shift_keys(slot, cursor, build_hasher);
        }

        value
    }

    /// Closes the gap at `gap` by moving later members of its probe cluster
    /// backwards, then marks the final gap vacant.
    fn shift_keys<H: BuildHasher>(
        &mut self,
        mut gap: usize,
        mut cursor: Option<&mut ListCursor>,
        build_hasher: &H,
    ) {
        let mask = self.mask;

        loop {
            let mut pos = (gap + 1) & mask;

            let key = loop {
                let key = self.keys[pos];

                if key.is_empty_marker() {
                    self.keys[gap] = K::EMPTY;
                    self.values[gap] = self.filler;

                    return;
                }

                let ideal = hash::hash(build_hasher, key) as usize & mask;

                // an entry stays put while its ideal slot lies in (gap, pos]
                let stays = if gap <= pos {
                    gap < ideal && ideal <= pos
                } else {
                    gap < ideal || ideal <= pos
                };

                if !stays {
                    break key;
                }

                pos = (pos + 1) & mask;
            };

            self.keys[gap] = key;
            self.values[gap] = self.values[pos];
            self.on_moved(pos, gap, cursor.as_deref_mut());

            gap = pos;
        }
    }

    /// Fixes up every reference to an entry that moved from `from` to `to`:
    /// its neighbors' links, the list ends, and a live cursor if there is one.
    fn on_moved(&mut self, from: usize, to: usize, cursor: Option<&mut ListCursor>) {
        let link = self.links[from];
        let prev = prev_of(link);
        let next = next_of(link);

        if prev == NIL {
            self.first = to as u32;
        } else {
            self.set_next(prev as usize, to as u32);
        }

        if next == NIL {
            self.last = to as u32;
        } else {
            self.set_prev(next as usize, to as u32);
        }

        self.links[to] = link;

        if let Some(cursor) = cursor {
            cursor.relocate(from, to);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let link = self.links[slot];
        let prev = prev_of(link);
        let next = next_of(link);

        if prev == NIL {
            self.first = next;
        } else {
            self.set_next(prev as usize, next);
        }

        if next == NIL {
            self.last = prev;
        } else {
            self.set_prev(next as usize, prev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::hash::BitsState;

    #[test]
    fn tracked_removal_rehomes_cursor() {
        let mut table: Table<u32, u32> = Table::new(64, 0.75, 0);

        for key in 1..=40 {
            table.put(hash::hash(&BitsState, key), key, key, &BitsState);
        }

        let order: Vec<_> = table.slots().collect();
        let mut cursor = ListCursor {
            prev: order[10] as u32,
            next: order[11] as u32,
        };

        let removed = table.remove_tracked(order[10], &mut cursor, &BitsState);
        assert_eq!(removed, (11, 11));

        table.assert_consistent(&BitsState);
        assert_eq!(table.visit(cursor.prev as usize).map(|v| v.key), Some(10));
        assert_eq!(table.visit(cursor.next as usize).map(|v| v.key), Some(12));
        assert_eq!(table.capacity(), 64);
    }

    #[test]
    fn tracked_removal_of_last_entry_empties_list() {
        let mut table: Table<u32, u32> = Table::new(4, 0.75, 0);
        table.put(hash::hash(&BitsState, 9u32), 9, 1, &BitsState);

        let slot = table.first_slot().unwrap();
        let mut cursor = ListCursor {
            prev: slot as u32,
            next: NIL,
        };

        assert_eq!(table.remove_tracked(slot, &mut cursor, &BitsState), (9, 1));
        assert_eq!(cursor, ListCursor { prev: NIL, next: NIL });
        assert!(table.is_empty());
        table.assert_consistent(&BitsState);
    }

    #[test]
    fn sparse_table_shrinks_back_after_tracked_removals() {
        let mut table: Table<u32, u32> = Table::new(16, 0.75, 0);

        for key in 1..=500 {
            table.put(hash::hash(&BitsState, key), key, key, &BitsState);
        }

        assert_eq!(table.capacity(), 1024);
        assert!(!table.shrink_if_sparse(&BitsState));

        let mut cursor = ListCursor {
            prev: NIL,
            next: table.first_slot().unwrap() as u32,
        };

        while cursor.next != NIL {
            let slot = cursor.next as usize;

            if table.key_at(slot) > 3 {
                table.remove_tracked(slot, &mut cursor, &BitsState);
            } else {
                cursor.prev = slot as u32;
                cursor.next = table.visit(slot).unwrap().next;
            }
        }

        assert_eq!(table.len(), 3);
        assert_eq!(table.capacity(), 1024);

        assert!(table.shrink_if_sparse(&BitsState));
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.slots().map(|slot| table.key_at(slot)).collect::<Vec<_>>(), [1, 2, 3]);
        table.assert_consistent(&BitsState);
    }
}
