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

//! Borrowed views of a map's keys, values and entries.
//!
//! Views read through to the map and, where removal makes sense, write
//! through to it, using the same per-segment locking as direct calls. A
//! value view has no keyed removal, so it offers no mutators at all.

use super::{Entries, Entry, HashMap, Iter, Keys, Values};

use crate::key::Key;

use std::{
    fmt::{self, Debug, Formatter},
    hash::BuildHasher,
};

/// The keys of a [`HashMap`], as a set.
///
/// [`HashMap`]: ../struct.HashMap.html
pub struct KeySet<'a, K, V, S> {
    map: &'a HashMap<K, V, S>,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> KeySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a HashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.map.contains_key(key)
    }

    /// Removes `key` and its value from the map. Returns `true` if it was
    /// present.
    pub fn remove(&self, key: K) -> bool {
        self.map.remove_entry(key).is_some()
    }

    /// Removes every key, and so every entry, from the map.
    pub fn clear(&self) {
        self.map.clear();
    }

    pub fn iter(&self) -> Keys<'a, K, V, S> {
        Keys::new(self.map.iter())
    }
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> IntoIterator for KeySet<'a, K, V, S> {
    type Item = K;
    type IntoIter = Keys<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> Debug for KeySet<'_, K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The values of a [`HashMap`], as a read-only collection.
///
/// [`HashMap`]: ../struct.HashMap.html
pub struct ValueCollection<'a, K, V, S> {
    map: &'a HashMap<K, V, S>,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> ValueCollection<'a, K, V, S> {
    pub(crate) fn new(map: &'a HashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if any entry has value `value`. This scans the map.
    pub fn contains(&self, value: V) -> bool {
        self.map.contains_value(value)
    }

    pub fn iter(&self) -> Values<'a, K, V, S> {
        Values::new(self.map.iter())
    }
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> IntoIterator
    for ValueCollection<'a, K, V, S>
{
    type Item = V;
    type IntoIter = Values<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Key, V: Copy + PartialEq + Debug, S: BuildHasher> Debug for ValueCollection<'_, K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The entries of a [`HashMap`], as a set of key-value pairs.
///
/// [`HashMap`]: ../struct.HashMap.html
pub struct EntrySet<'a, K, V, S> {
    map: &'a HashMap<K, V, S>,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> EntrySet<'a, K, V, S> {
    pub(crate) fn new(map: &'a HashMap<K, V, S>) -> Self {
        Self { map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if `key` is present with value `value`.
    pub fn contains(&self, key: K, value: V) -> bool {
        self.map.lookup(key) == Some(value)
    }

    /// Removes `key` if it is present with value `value`. Returns `true` if
    /// it was removed.
    pub fn remove(&self, key: K, value: V) -> bool {
        self.map.remove_if_equals(key, value)
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    pub fn iter(&self) -> Entries<'a, K, V, S> {
        Entries::new(self.map.iter())
    }

    /// Iterates over `(key, value)` tuples instead of [`Entry`] values.
    ///
    /// [`Entry`]: struct.Entry.html
    pub fn pairs(&self) -> Iter<'a, K, V, S> {
        self.map.iter()
    }
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> IntoIterator for EntrySet<'a, K, V, S> {
    type Item = Entry<K, V>;
    type IntoIter = Entries<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Key, V: Copy + PartialEq + Debug, S: BuildHasher> Debug for EntrySet<'_, K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
