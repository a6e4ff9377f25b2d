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

//! Keyed operations, each a single [`find`] followed by at most one insert,
//! update, or removal.
//!
//! [`find`]: ../struct.Table.html#method.find

use super::{Probe, Table};

use crate::key::Key;

use std::{hash::BuildHasher, ops::Add};

impl<K: Key, V: Copy> Table<K, V> {
    pub(crate) fn get(&self, hash: u64, key: K) -> Option<V> {
        match self.find(hash, key) {
            Probe::Found(slot) => Some(self.values[slot]),
            Probe::Vacant(_) => None,
        }
    }

    pub(crate) fn put<H: BuildHasher>(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        build_hasher: &H,
    ) -> Option<V> {
        match self.find(hash, key) {
            Probe::Found(slot) => Some(std::mem::replace(&mut self.values[slot], value)),
            Probe::Vacant(slot) => {
                self.insert_at(slot, key, value, build_hasher);

                None
            }
        }
    }

    pub(crate) fn put_if_absent<H: BuildHasher>(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        build_hasher: &H,
    ) -> Option<V> {
        match self.find(hash, key) {
            Probe::Found(slot) => Some(self.values[slot]),
            Probe::Vacant(slot) => {
                self.insert_at(slot, key, value, build_hasher);

                None
            }
        }
    }

    pub(crate) fn replace(&mut self, hash: u64, key: K, value: V) -> Option<V> {
        match self.find(hash, key) {
            Probe::Found(slot) => Some(std::mem::replace(&mut self.values[slot], value)),
            Probe::Vacant(_) => None,
        }
    }

    pub(crate) fn replace_if_equals(&mut self, hash: u64, key: K, old_value: V, new_value: V) -> bool
    where
        V: PartialEq,
    {
        match self.find(hash, key) {
            Probe::Found(slot) if self.values[slot] == old_value => {
                self.values[slot] = new_value;

                true
            }
            _ => false,
        }
    }

    pub(crate) fn remove<H: BuildHasher>(&mut self, hash: u64, key: K, build_hasher: &H) -> Option<V> {
        match self.find(hash, key) {
            Probe::Found(slot) => Some(self.remove_at(slot, build_hasher)),
            Probe::Vacant(_) => None,
        }
    }

    pub(crate) fn remove_if_equals<H: BuildHasher>(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        build_hasher: &H,
    ) -> bool
    where
        V: PartialEq,
    {
        match self.find(hash, key) {
            Probe::Found(slot) if self.values[slot] == value => {
                self.remove_at(slot, build_hasher);

                true
            }
            _ => false,
        }
    }

    /// Adds `increment` to the value of `key`, treating an absent key as
    /// `default`. Returns the value before the addition.
    pub(crate) fn add_to<H: BuildHasher>(
        &mut self,
        hash: u64,
        key: K,
        increment: V,
        default: V,
        build_hasher: &H,
    ) -> V
    where
        V: Add<Output = V>,
    {
        match self.find(hash, key) {
            Probe::Found(slot) => {
                let old_value = self.values[slot];
                self.values[slot] = old_value + increment;

                old_value
            }
            Probe::Vacant(slot) => {
                self.insert_at(slot, key, default + increment, build_hasher);

                default
            }
        }
    }

    pub(crate) fn compute_if_absent<H: BuildHasher, F: FnOnce(K) -> V>(
        &mut self,
        hash: u64,
        key: K,
        mapping: F,
        build_hasher: &H,
    ) -> V {
        match self.find(hash, key) {
            Probe::Found(slot) => self.values[slot],
            Probe::Vacant(slot) => {
                let value = mapping(key);
                self.insert_at(slot, key, value, build_hasher);

                value
            }
        }
    }

    /// Remaps the value of a present key; `None` from `remapping` removes it.
    pub(crate) fn compute_if_present<H: BuildHasher, F: FnOnce(K, V) -> Option<V>>(
        &mut self,
        hash: u64,
        key: K,
        remapping: F,
        build_hasher: &H,
    ) -> Option<V> {
        let slot = match self.find(hash, key) {
            Probe::Found(slot) => slot,
            Probe::Vacant(_) => return None,
        };

        match remapping(key, self.values[slot]) {
            Some(value) => {
                self.values[slot] = value;

                Some(value)
            }
            None => {
                self.remove_at(slot, build_hasher);

                None
            }
        }
    }

    pub(crate) fn compute<H: BuildHasher, F: FnOnce(K, Option<V>) -> Option<V>>(
        &mut self,
        hash: u64,
        key: K,
        remapping: F,
        build_hasher: &H,
    ) -> Option<V> {
        match self.find(hash, key) {
            Probe::Found(slot) => match remapping(key, Some(self.values[slot])) {
                Some(value) => {
                    self.values[slot] = value;

                    Some(value)
                }
                None => {
                    self.remove_at(slot, build_hasher);

                    None
                }
            },
            Probe::Vacant(slot) => {
                let value = remapping(key, None)?;
                self.insert_at(slot, key, value, build_hasher);

                Some(value)
            }
        }
    }

    pub(crate) fn merge<H: BuildHasher, F: FnOnce(V, V) -> Option<V>>(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        remapping: F,
        build_hasher: &H,
    ) -> Option<V> {
        match self.find(hash, key) {
            Probe::Found(slot) => match remapping(self.values[slot], value) {
                Some(merged) => {
                    self.values[slot] = merged;

                    Some(merged)
                }
                None => {
                    self.remove_at(slot, build_hasher);

                    None
                }
            },
            Probe::Vacant(slot) => {
                self.insert_at(slot, key, value, build_hasher);

                Some(value)
            }
        }
    }

    /// Like [`compute`], with absent keys read as `default` and a result equal
    /// to `default` meaning "no entry".
    ///
    /// [`compute`]: #method.compute
    pub(crate) fn compute_non_default<H: BuildHasher, F: FnOnce(K, V) -> V>(
        &mut self,
        hash: u64,
        key: K,
        default: V,
        remapping: F,
        build_hasher: &H,
    ) -> V
    where
        V: PartialEq,
    {
        match self.find(hash, key) {
            Probe::Found(slot) => {
                let value = remapping(key, self.values[slot]);

                if value == default {
                    self.remove_at(slot, build_hasher);
                } else {
                    self.values[slot] = value;
                }

                value
            }
            Probe::Vacant(slot) => {
                let value = remapping(key, default);

                if value != default {
                    self.insert_at(slot, key, value, build_hasher);
                }

                value
            }
        }
    }

    pub(crate) fn compute_if_present_non_default<H: BuildHasher, F: FnOnce(K, V) -> V>(
        &mut self,
        hash: u64,
        key: K,
        default: V,
        remapping: F,
        build_hasher: &H,
    ) -> V
    where
        V: PartialEq,
    {
        let slot = match self.find(hash, key) {
            Probe::Found(slot) => slot,
            Probe::Vacant(_) => return default,
        };

        let value = remapping(key, self.values[slot]);

        if value == default {
            self.remove_at(slot, build_hasher);
        } else {
            self.values[slot] = value;
        }

        value
    }

    pub(crate) fn merge_non_default<H: BuildHasher, F: FnOnce(V, V) -> V>(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        default: V,
        remapping: F,
        build_hasher: &H,
    ) -> V
    where
        V: PartialEq,
    {
        match self.find(hash, key) {
            Probe::Found(slot) => {
                let merged = remapping(self.values[slot], value);

                if merged == default {
                    self.remove_at(slot, build_hasher);
                } else {
                    self.values[slot] = merged;
                }

                merged
            }
            Probe::Vacant(slot) => {
                if value != default {
                    self.insert_at(slot, key, value, build_hasher);
                }

                value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::hash::{self, BitsState};

    fn h(key: i32) -> u64 {
        hash::hash(&BitsState, key)
    }

    #[test]
    fn compute_family() {
        let mut table: Table<i32, i32> = Table::new(16, 0.75, 0);

        assert_eq!(table.compute_if_absent(h(1), 1, |k| k * 10, &BitsState), 10);
        assert_eq!(table.compute_if_absent(h(1), 1, |_| 99, &BitsState), 10);

        assert_eq!(table.compute_if_present(h(2), 2, |_, v| Some(v + 1), &BitsState), None);
        assert_eq!(table.compute_if_present(h(1), 1, |_, v| Some(v + 1), &BitsState), Some(11));
        assert_eq!(table.compute_if_present(h(1), 1, |_, _| None, &BitsState), None);
        assert_eq!(table.get(h(1), 1), None);

        assert_eq!(table.compute(h(3), 3, |_, v| v.or(Some(5)), &BitsState), Some(5));
        assert_eq!(table.compute(h(3), 3, |_, v| v.map(|v| v * 2), &BitsState), Some(10));
        assert_eq!(table.compute(h(4), 4, |_, _| None, &BitsState), None);
        assert_eq!(table.len(), 1);

        assert_eq!(table.merge(h(3), 3, 1, |a, b| Some(a + b), &BitsState), Some(11));
        assert_eq!(table.merge(h(5), 5, 7, |a, b| Some(a + b), &BitsState), Some(7));
        assert_eq!(table.merge(h(5), 5, 7, |_, _| None, &BitsState), None);
        assert_eq!(table.len(), 1);

        table.assert_consistent(&BitsState);
    }

    #[test]
    fn non_default_family_drops_default_values() {
        let mut table: Table<i32, i32> = Table::new(16, 0.75, 0);
        let default = -1;

        assert_eq!(table.compute_non_default(h(1), 1, default, |_, v| v + 1, &BitsState), 0);
        assert_eq!(table.get(h(1), 1), Some(0));

        assert_eq!(table.compute_non_default(h(1), 1, default, |_, v| v - 1, &BitsState), -1);
        assert_eq!(table.get(h(1), 1), None);

        assert_eq!(table.compute_non_default(h(2), 2, default, |_, v| v, &BitsState), -1);
        assert!(table.is_empty());

        assert_eq!(table.merge_non_default(h(3), 3, -1, default, |a, b| a + b, &BitsState), -1);
        assert!(table.is_empty());
        assert_eq!(table.merge_non_default(h(3), 3, 4, default, |a, b| a + b, &BitsState), 4);
        assert_eq!(table.merge_non_default(h(3), 3, -5, default, |a, b| a + b, &BitsState), -1);
        assert!(table.is_empty());

        assert_eq!(table.compute_if_present_non_default(h(4), 4, default, |_, v| v, &BitsState), -1);
        table.put(h(4), 4, 8, &BitsState);
        assert_eq!(table.compute_if_present_non_default(h(4), 4, default, |_, v| v * 2, &BitsState), 16);
        assert_eq!(table.compute_if_present_non_default(h(4), 4, default, |_, _| -1, &BitsState), -1);
        assert!(table.is_empty());

        table.assert_consistent(&BitsState);
    }

    #[test]
    fn add_to_starts_from_default() {
        let mut table: Table<i32, i64> = Table::new(16, 0.75, 0);

        assert_eq!(table.add_to(h(7), 7, 5, 100, &BitsState), 100);
        assert_eq!(table.add_to(h(7), 7, 5, 100, &BitsState), 105);
        assert_eq!(table.get(h(7), 7), Some(110));
    }
}
