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

//! A concurrent set of primitive keys, built on [`HashMap`].
//!
//! [`HashMap`]: ../map/struct.HashMap.html

use crate::{
    key::Key,
    map::{DefaultHashBuilder, HashMap, Keys},
};

use std::{
    fmt::{self, Debug, Formatter},
    hash::BuildHasher,
    iter::FromIterator,
};

/// A segmented concurrent hash set that iterates in insertion order.
///
/// This is a [`HashMap`] whose values are `()`; see its documentation for
/// the locking and consistency model.
///
/// [`HashMap`]: ../map/struct.HashMap.html
pub struct HashSet<K, S = DefaultHashBuilder> {
    map: HashMap<K, (), S>,
}

impl<K: Key> HashSet<K, DefaultHashBuilder> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Creates an empty set whose segments each start with space for
    /// `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Creates an empty set with at least `num_segments` segments, each
    /// starting with space for `capacity` slots.
    pub fn with_num_segments_and_capacity(num_segments: usize, capacity: usize) -> Self {
        Self {
            map: HashMap::with_num_segments_and_capacity(num_segments, capacity),
        }
    }
}

impl<K: Key, S: BuildHasher> HashSet<K, S> {
    pub fn with_hasher(build_hasher: S) -> Self {
        Self {
            map: HashMap::with_hasher(build_hasher),
        }
    }

    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn num_segments(&self) -> usize {
        self.map.num_segments()
    }

    pub fn contains(&self, key: K) -> bool {
        self.map.contains_key(key)
    }

    /// Adds `key` to the set, returning `true` if it was not already present.
    pub fn insert(&self, key: K) -> bool {
        self.map.insert_if_absent(key, ()).is_none()
    }

    /// Removes `key` from the set, returning `true` if it was present.
    pub fn remove(&self, key: K) -> bool {
        self.map.remove_entry(key).is_some()
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    /// Shrinks every segment's table as much as its contents allow.
    ///
    /// Returns `false` if any segment could not allocate its smaller table.
    pub fn trim(&self) -> bool {
        self.map.trim()
    }

    /// Returns an iterator over the set's keys, in insertion order within
    /// each segment.
    pub fn iter(&self) -> Keys<'_, K, (), S> {
        self.map.keys().iter()
    }
}

impl<K: Key, S: Clone> Clone for HashSet<K, S> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<K: Key, S: BuildHasher> Debug for HashSet<K, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Key, S: BuildHasher + Default> Default for HashSet<K, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Key, S: BuildHasher + Default> FromIterator<K> for HashSet<K, S> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let set = Self::default();

        for key in iter {
            set.insert(key);
        }

        set
    }
}

impl<'a, K: Key, S: BuildHasher> IntoIterator for &'a HashSet<K, S> {
    type Item = K;
    type IntoIter = Keys<'a, K, (), S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
