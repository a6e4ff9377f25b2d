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

//! Entry handles lent out or returned by traversals.
//!
//! [`Entry`] is an owned copy that stays valid no matter what happens to the
//! map afterwards. [`EntryRef`] is a single handle that a scan reuses for
//! every entry it visits; it is only ever lent to a callback, so it cannot
//! outlive the visit it describes.
//!
//! [`Entry`]: struct.Entry.html
//! [`EntryRef`]: struct.EntryRef.html

/// A copy of one key-value pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K: Copy, V: Copy> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> K {
        self.key
    }

    pub fn value(&self) -> V {
        self.value
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    fn from(entry: Entry<K, V>) -> Self {
        (entry.key, entry.value)
    }
}

/// A recycled view of the entry currently being visited.
///
/// Obtained through [`HashMap::for_each_entry`] and
/// [`HashMap::for_each_entry_mut`]. The same `EntryRef` is reset for each
/// entry, so copy out anything needed after the callback returns.
///
/// [`HashMap::for_each_entry`]: ../struct.HashMap.html#method.for_each_entry
/// [`HashMap::for_each_entry_mut`]: ../struct.HashMap.html#method.for_each_entry_mut
#[derive(Debug)]
pub struct EntryRef<K, V> {
    key: K,
    value: V,
    modified: bool,
}

impl<K: Copy, V: Copy> EntryRef<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            modified: false,
        }
    }

    pub(crate) fn reset(&mut self, key: K, value: V) {
        self.key = key;
        self.value = value;
        self.modified = false;
    }

    /// Returns the value set through [`set_value`] since the last reset, if
    /// any.
    ///
    /// [`set_value`]: #method.set_value
    pub(crate) fn take_modified(&mut self) -> Option<V> {
        if self.modified {
            self.modified = false;

            Some(self.value)
        } else {
            None
        }
    }

    pub fn key(&self) -> K {
        self.key
    }

    pub fn value(&self) -> V {
        self.value
    }

    /// Replaces the entry's value in the map, returning the previous value.
    pub fn set_value(&mut self, value: V) -> V {
        self.modified = true;

        std::mem::replace(&mut self.value, value)
    }

    /// Copies the entry out into an [`Entry`] that may be kept.
    ///
    /// [`Entry`]: struct.Entry.html
    pub fn to_entry(&self) -> Entry<K, V> {
        Entry::new(self.key, self.value)
    }
}
