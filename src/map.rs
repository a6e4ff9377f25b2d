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

//! A segmented, insertion-ordered concurrent hash map for primitive keys.

pub mod builder;
pub mod entry;
pub mod iter;
pub mod views;


pub use builder::Builder;
pub use entry::{Entry, EntryRef};
pub use iter::{Cursor, Entries, Iter, Keys, Values};
pub use views::{EntrySet, KeySet, ValueCollection};

use crate::{
    common::Table,
    error::ConfigError,
    hash::{self, BitsState},
    key::Key,
    segment::Segment,
};

use std::{
    fmt::{self, Debug, Formatter},
    hash::BuildHasher,
    iter::FromIterator,
    ops::Add,
};

/// Default hasher for `HashMap`.
///
/// This is currently [`BitsState`], which uses a key's bit pattern as its
/// native hash and relies on the map's internal mixing step for distribution.
///
/// [`BitsState`]: ../hash/struct.BitsState.html
pub type DefaultHashBuilder = BitsState;

pub(crate) const DEFAULT_NUM_SEGMENTS: usize = 16;
pub(crate) const DEFAULT_CAPACITY: usize = 16;
pub(crate) const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// A concurrent hash map for primitive keys, partitioned into independently
/// locked segments and iterated in insertion order.
///
/// Each segment owns an open addressing hash table with linear probing and
/// backward-shift deletion, guarded by a reader-writer lock. The
/// most-significant bits of a key's mixed hash select its segment, so writers
/// to different segments never contend. Each keyed operation takes exactly one
/// segment lock exactly once, which makes it linearizable with respect to
/// every other keyed operation; in particular, concurrent [`compute`] and
/// [`merge`] calls on the same key never lose updates.
///
/// Because values may be primitives without a natural "null", absent keys are
/// reported with a configurable *default return value* (see
/// [`default_return_value`]). Use [`contains_key`] to tell "absent" apart from
/// "present with the default value".
///
/// Whole-map operations ([`len`], [`clear`], [`contains_value`], cloning and
/// iteration) visit segments one at a time. Each segment is observed
/// consistently, but the map as a whole may change between segments.
///
/// Keys are compared by bit pattern: see the [`key`] module.
///
/// [`compute`]: #method.compute
/// [`merge`]: #method.merge
/// [`default_return_value`]: #method.default_return_value
/// [`contains_key`]: #method.contains_key
/// [`len`]: #method.len
/// [`clear`]: #method.clear
/// [`contains_value`]: #method.contains_value
/// [`key`]: ../key/index.html
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    segments: Box<[Segment<K, V>]>,
    build_hasher: S,
    default_value: V,
    segment_shift: u32,
}

impl<K: Key, V: Copy + PartialEq + Default> HashMap<K, V, DefaultHashBuilder> {
    /// Creates an empty `HashMap` with the default number of segments.
    ///
    /// Absent keys read as `V::default()`.
    pub fn new() -> Self {
        Self::with_num_segments_capacity_and_hasher(
            DEFAULT_NUM_SEGMENTS,
            DEFAULT_CAPACITY,
            DefaultHashBuilder::default(),
        )
    }

    /// Creates an empty `HashMap` whose segments each start with space for
    /// `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is too large to allocate a table for.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_num_segments_capacity_and_hasher(
            DEFAULT_NUM_SEGMENTS,
            capacity,
            DefaultHashBuilder::default(),
        )
    }

    /// Creates an empty `HashMap` with at least `num_segments` segments.
    ///
    /// # Panics
    ///
    /// Panics if `num_segments` is 0 or rounds up to 65536 or more.
    pub fn with_num_segments(num_segments: usize) -> Self {
        Self::with_num_segments_capacity_and_hasher(
            num_segments,
            DEFAULT_CAPACITY,
            DefaultHashBuilder::default(),
        )
    }

    /// Creates an empty `HashMap` with at least `num_segments` segments, each
    /// starting with space for `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `num_segments` is 0 or rounds up to 65536 or more, or if
    /// `capacity` is too large.
    pub fn with_num_segments_and_capacity(num_segments: usize, capacity: usize) -> Self {
        Self::with_num_segments_capacity_and_hasher(
            num_segments,
            capacity,
            DefaultHashBuilder::default(),
        )
    }

    /// Returns a [`Builder`] for fully configured construction.
    ///
    /// [`Builder`]: builder/struct.Builder.html
    pub fn builder() -> Builder<K, V, DefaultHashBuilder> {
        Builder::new(V::default())
    }

    /// Creates a map from parallel key and value slices, in slice order.
    ///
    /// Returns [`ConfigError::LengthMismatch`] if the slices differ in length.
    ///
    /// [`ConfigError::LengthMismatch`]: ../error/enum.ConfigError.html#variant.LengthMismatch
    pub fn from_slices(keys: &[K], values: &[V]) -> Result<Self, ConfigError> {
        Self::builder().build_from_slices(keys, values)
    }
}

impl<K: Key, V: Copy + PartialEq + Default, S: BuildHasher> HashMap<K, V, S> {
    /// Creates an empty `HashMap` that will use `build_hasher` to hash keys.
    pub fn with_hasher(build_hasher: S) -> Self {
        Self::with_num_segments_capacity_and_hasher(
            DEFAULT_NUM_SEGMENTS,
            DEFAULT_CAPACITY,
            build_hasher,
        )
    }

    /// Creates an empty `HashMap` with at least `num_segments` segments, each
    /// starting with space for `capacity` slots, that will use
    /// `build_hasher` to hash keys.
    ///
    /// # Panics
    ///
    /// Panics if `num_segments` is 0 or rounds up to 65536 or more, or if
    /// `capacity` is too large.
    pub fn with_num_segments_capacity_and_hasher(
        num_segments: usize,
        capacity: usize,
        build_hasher: S,
    ) -> Self {
        Builder::new(V::default())
            .num_segments(num_segments)
            .capacity(capacity)
            .hasher(build_hasher)
            .build()
            .unwrap_or_else(|e| panic!("invalid HashMap configuration: {}", e))
    }
}

impl<K, V, S> HashMap<K, V, S> {
    pub(crate) fn from_parts(segments: Box<[Segment<K, V>]>, build_hasher: S, default_value: V) -> Self {
        assert!(segments.len().is_power_of_two());

        let segment_shift = 64 - segments.len().trailing_zeros();

        Self {
            segments,
            build_hasher,
            default_value,
            segment_shift,
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// Segment sizes are read one at a time, so under concurrent writers the
    /// result need not match the size of the map at any single instant.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Returns `true` if every segment was empty when it was checked.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.len() == 0)
    }

    /// Returns the number of elements the map can hold without any segment
    /// growing, assuming keys are spread evenly: the smallest segment
    /// capacity times the number of segments.
    pub fn capacity(&self) -> usize {
        self.segments
            .iter()
            .map(Segment::capacity)
            .min()
            .unwrap_or(0)
            * self.segments.len()
    }

    /// Returns the number of slots in the table of the `index`-th segment.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`num_segments`].
    ///
    /// [`num_segments`]: #method.num_segments
    pub fn segment_capacity(&self, index: usize) -> usize {
        assert!(index < self.segments.len());

        self.segments[index].capacity()
    }

    /// Returns the number of elements in the `index`-th segment.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`num_segments`].
    ///
    /// [`num_segments`]: #method.num_segments
    pub fn segment_len(&self, index: usize) -> usize {
        assert!(index < self.segments.len());

        self.segments[index].len()
    }

    /// Returns the number of segments in the map.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Returns a reference to the map's [`BuildHasher`].
    ///
    /// [`BuildHasher`]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
    pub fn hasher(&self) -> &S {
        &self.build_hasher
    }

    /// Returns the value reported for absent keys.
    pub fn default_return_value(&self) -> V
    where
        V: Copy,
    {
        self.default_value
    }

    /// Sets the value reported for absent keys.
    ///
    /// This also changes what the `*_non_default` operations treat as "no
    /// entry". Existing entries are not affected.
    pub fn set_default_return_value(&mut self, value: V) {
        self.default_value = value;
    }

    #[inline]
    fn segment_index_from_hash(&self, hash: u64) -> usize {
        if self.segment_shift == 64 {
            0
        } else {
            (hash >> self.segment_shift) as usize
        }
    }

    #[inline]
    fn segment_for(&self, hash: u64) -> &Segment<K, V> {
        &self.segments[self.segment_index_from_hash(hash)]
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> HashMap<K, V, S> {
    /// Returns the index of the segment that `key` belongs to.
    pub fn segment_index(&self, key: K) -> usize {
        self.segment_index_from_hash(self.hash(key))
    }

    /// Returns the value corresponding to `key`, or the default return value
    /// if `key` is absent.
    #[inline]
    pub fn get(&self, key: K) -> V {
        self.lookup(key).unwrap_or(self.default_value)
    }

    /// Returns the value corresponding to `key`, or `default` if `key` is
    /// absent.
    #[inline]
    pub fn get_or_default(&self, key: K, default: V) -> V {
        self.lookup(key).unwrap_or(default)
    }

    /// Returns `true` if the map contains an entry for `key`.
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns `true` if any entry has value `value`.
    ///
    /// Values are not indexed, so this scans every segment in turn.
    pub fn contains_value(&self, value: V) -> bool {
        self.segments
            .iter()
            .any(|s| s.read(|table| table.contains_value(value)))
    }

    /// Associates `value` with `key`, returning the previous value or the
    /// default return value if `key` was absent.
    ///
    /// A key that is already present keeps its position in iteration order.
    pub fn put(&self, key: K, value: V) -> V {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.put(hash, key, value, &self.build_hasher))
            .unwrap_or(self.default_value)
    }

    /// Associates `value` with `key` only if `key` is absent. Returns the
    /// existing value, or the default return value if `value` was inserted.
    pub fn put_if_absent(&self, key: K, value: V) -> V {
        self.insert_if_absent(key, value)
            .unwrap_or(self.default_value)
    }

    /// Inserts every entry of `entries`, in order.
    pub fn put_all<I: IntoIterator<Item = (K, V)>>(&self, entries: I) {
        for (key, value) in entries {
            self.put(key, value);
        }
    }

    /// Replaces the value of `key` if it is present. Returns the previous
    /// value, or the default return value if `key` was absent.
    pub fn replace(&self, key: K, value: V) -> V {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.replace(hash, key, value))
            .unwrap_or(self.default_value)
    }

    /// Replaces the value of `key` with `new_value` if it is currently
    /// `old_value`. Returns `true` if the value was replaced.
    pub fn replace_if_equals(&self, key: K, old_value: V, new_value: V) -> bool {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.replace_if_equals(hash, key, old_value, new_value))
    }

    /// Removes `key`, returning its value or the default return value if it
    /// was absent.
    ///
    /// The segment's table shrinks if it becomes sparse enough.
    pub fn remove(&self, key: K) -> V {
        self.remove_entry(key).unwrap_or(self.default_value)
    }

    /// Removes `key` if its value is `value`. Returns `true` if it was
    /// removed.
    pub fn remove_if_equals(&self, key: K, value: V) -> bool {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.remove_if_equals(hash, key, value, &self.build_hasher))
    }

    /// Returns the value of `key`, first inserting `mapping(key)` if `key` is
    /// absent.
    ///
    /// `mapping` runs under the segment's write lock and must not access this
    /// map.
    pub fn compute_if_absent<F: FnOnce(K) -> V>(&self, key: K, mapping: F) -> V {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.compute_if_absent(hash, key, mapping, &self.build_hasher))
    }

    /// Replaces the value of a present `key` with `remapping(key, value)`,
    /// removing the entry if it returns `None`.
    ///
    /// Returns the new value, or the default return value if `key` is now
    /// absent. `remapping` runs under the segment's write lock and must not
    /// access this map.
    pub fn compute_if_present<F: FnOnce(K, V) -> Option<V>>(&self, key: K, remapping: F) -> V {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.compute_if_present(hash, key, remapping, &self.build_hasher))
            .unwrap_or(self.default_value)
    }

    /// Sets the entry of `key` to `remapping(key, current)`, where `current`
    /// is `None` if `key` is absent. Returning `None` removes the entry (or
    /// inserts nothing).
    ///
    /// Returns the new value, or the default return value if `key` is now
    /// absent. `remapping` runs under the segment's write lock and must not
    /// access this map.
    pub fn compute<F: FnOnce(K, Option<V>) -> Option<V>>(&self, key: K, remapping: F) -> V {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.compute(hash, key, remapping, &self.build_hasher))
            .unwrap_or(self.default_value)
    }

    /// Inserts `value` if `key` is absent, otherwise replaces the current
    /// value with `remapping(current, value)`. Returning `None` removes the
    /// entry.
    ///
    /// Returns the new value, or the default return value if `key` is now
    /// absent. `remapping` runs under the segment's write lock and must not
    /// access this map.
    pub fn merge<F: FnOnce(V, V) -> Option<V>>(&self, key: K, value: V, remapping: F) -> V {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.merge(hash, key, value, remapping, &self.build_hasher))
            .unwrap_or(self.default_value)
    }

    /// Sets the value of `key` to `remapping(key, current)`, where an absent
    /// key's `current` is the default return value. If the result equals the
    /// default return value, the entry is removed (or never inserted).
    ///
    /// Returns the result of `remapping`.
    pub fn compute_non_default<F: FnOnce(K, V) -> V>(&self, key: K, remapping: F) -> V {
        let hash = self.hash(key);
        let default = self.default_value;

        self.segment_for(hash).write(|table| {
            table.compute_non_default(hash, key, default, remapping, &self.build_hasher)
        })
    }

    /// Like [`compute_non_default`], but does nothing and returns the default
    /// return value if `key` is absent.
    ///
    /// [`compute_non_default`]: #method.compute_non_default
    pub fn compute_if_present_non_default<F: FnOnce(K, V) -> V>(&self, key: K, remapping: F) -> V {
        let hash = self.hash(key);
        let default = self.default_value;

        self.segment_for(hash).write(|table| {
            table.compute_if_present_non_default(hash, key, default, remapping, &self.build_hasher)
        })
    }

    /// Like [`merge`], but an entry whose merged value equals the default
    /// return value is removed, and `value` is not inserted for an absent key
    /// if it equals the default return value.
    ///
    /// Returns the merged (or inserted) value.
    ///
    /// [`merge`]: #method.merge
    pub fn merge_non_default<F: FnOnce(V, V) -> V>(&self, key: K, value: V, remapping: F) -> V {
        let hash = self.hash(key);
        let default = self.default_value;

        self.segment_for(hash).write(|table| {
            table.merge_non_default(hash, key, value, default, remapping, &self.build_hasher)
        })
    }

    /// Removes every entry, one segment at a time.
    ///
    /// Entries inserted into already-cleared segments by other threads while
    /// this runs are kept.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.write(Table::clear);
        }

        tracing::trace!(segments = self.segments.len(), "cleared map");
    }

    /// Shrinks every segment's table as much as its contents allow.
    ///
    /// Returns `false` if any segment could not allocate its smaller table;
    /// such segments are left unchanged.
    pub fn trim(&self) -> bool {
        self.trim_to(0)
    }

    /// Shrinks every segment's table to the smallest size that holds
    /// `max(n, len)` entries, where `len` is the segment's own size.
    ///
    /// Returns `false` if any segment could not allocate its smaller table;
    /// such segments are left unchanged.
    pub fn trim_to(&self, n: usize) -> bool {
        self.segments
            .iter()
            .map(|s| s.write(|table| table.trim(n, &self.build_hasher)))
            .fold(true, |all, trimmed| all && trimmed)
    }

    /// Returns a copy of the first entry in iteration order.
    pub fn first_entry(&self) -> Option<Entry<K, V>> {
        self.segments.iter().find_map(|s| {
            s.read(|table| {
                table
                    .first_slot()
                    .map(|slot| Entry::new(table.key_at(slot), table.value_at(slot)))
            })
        })
    }

    /// Returns a copy of the last entry in iteration order.
    pub fn last_entry(&self) -> Option<Entry<K, V>> {
        self.segments.iter().rev().find_map(|s| {
            s.read(|table| {
                table
                    .last_slot()
                    .map(|slot| Entry::new(table.key_at(slot), table.value_at(slot)))
            })
        })
    }

    /// Calls `visit` with every entry in iteration order.
    ///
    /// A single [`EntryRef`] is reused for every call, and is only valid for
    /// the duration of the call. Each segment is scanned under its read lock,
    /// so `visit` may read this map but must not modify it.
    ///
    /// [`EntryRef`]: entry/struct.EntryRef.html
    pub fn for_each_entry<F: FnMut(&EntryRef<K, V>)>(&self, mut visit: F) {
        let mut entry = EntryRef::new(K::EMPTY, self.default_value);

        for segment in self.segments.iter() {
            segment.scan(|table| {
                for slot in table.slots() {
                    entry.reset(table.key_at(slot), table.value_at(slot));
                    visit(&entry);
                }
            });
        }
    }

    /// Calls `visit` with every entry in iteration order, writing back any
    /// value set through [`EntryRef::set_value`].
    ///
    /// Each segment is scanned under its write lock, so `visit` must not
    /// access this map.
    ///
    /// [`EntryRef::set_value`]: entry/struct.EntryRef.html#method.set_value
    pub fn for_each_entry_mut<F: FnMut(&mut EntryRef<K, V>)>(&self, mut visit: F) {
        let mut entry = EntryRef::new(K::EMPTY, self.default_value);

        for segment in self.segments.iter() {
            segment.write(|table| {
                let mut next = table.first_slot();

                while let Some(slot) = next {
                    entry.reset(table.key_at(slot), table.value_at(slot));
                    visit(&mut entry);

                    if let Some(value) = entry.take_modified() {
                        table.set_value_at(slot, value);
                    }

                    next = table.next_slot(slot);
                }
            });
        }
    }

    /// Returns an iterator over copies of every entry, in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter::new(self.cursor())
    }

    /// Returns a bidirectional cursor positioned before the first entry.
    pub fn cursor(&self) -> Cursor<'_, K, V, S> {
        Cursor::front(self)
    }

    /// Returns a bidirectional cursor positioned after the last entry.
    pub fn cursor_back(&self) -> Cursor<'_, K, V, S> {
        Cursor::back(self)
    }

    /// Returns a view of the map's keys.
    pub fn keys(&self) -> KeySet<'_, K, V, S> {
        KeySet::new(self)
    }

    /// Returns a view of the map's values.
    pub fn values(&self) -> ValueCollection<'_, K, V, S> {
        ValueCollection::new(self)
    }

    /// Returns a view of the map's entries.
    pub fn entries(&self) -> EntrySet<'_, K, V, S> {
        EntrySet::new(self)
    }

    pub(crate) fn lookup(&self, key: K) -> Option<V> {
        let hash = self.hash(key);

        self.segment_for(hash).read(|table| table.get(hash, key))
    }

    pub(crate) fn insert_if_absent(&self, key: K, value: V) -> Option<V> {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.put_if_absent(hash, key, value, &self.build_hasher))
    }

    pub(crate) fn remove_entry(&self, key: K) -> Option<V> {
        let hash = self.hash(key);

        self.segment_for(hash)
            .write(|table| table.remove(hash, key, &self.build_hasher))
    }

    pub(crate) fn segments(&self) -> &[Segment<K, V>] {
        &self.segments
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (index, segment) in self.segments.iter().enumerate() {
            segment.read(|table| {
                table.assert_consistent(&self.build_hasher);

                for slot in table.slots() {
                    assert_eq!(self.segment_index(table.key_at(slot)), index);
                }
            });
        }
    }

    #[inline]
    fn hash(&self, key: K) -> u64 {
        hash::hash(&self.build_hasher, key)
    }
}

impl<K: Key, V: Copy + PartialEq + Add<Output = V>, S: BuildHasher> HashMap<K, V, S> {
    /// Adds `increment` to the value of `key`, treating an absent key as
    /// having the default return value. Returns the value before the
    /// addition.
    pub fn add_to(&self, key: K, increment: V) -> V {
        let hash = self.hash(key);
        let default = self.default_value;

        self.segment_for(hash)
            .write(|table| table.add_to(hash, key, increment, default, &self.build_hasher))
    }
}

impl<K: Key, V: Copy, S: Clone> Clone for HashMap<K, V, S> {
    /// Copies the map one segment at a time.
    ///
    /// Each segment is copied under its read lock, so every segment of the
    /// copy is a consistent snapshot, but different segments may reflect
    /// different moments.
    fn clone(&self) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|s| Segment::new(s.snapshot()))
            .collect();

        Self {
            segments,
            build_hasher: self.build_hasher.clone(),
            default_value: self.default_value,
            segment_shift: self.segment_shift,
        }
    }
}

impl<K: Key, V: Copy + PartialEq + Debug, S: BuildHasher> Debug for HashMap<K, V, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> PartialEq for HashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.lookup(key) == Some(value))
    }
}

impl<K: Key, V: Copy + PartialEq + Default, S: BuildHasher + Default> Default for HashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Key, V: Copy + PartialEq + Default, S: BuildHasher + Default> FromIterator<(K, V)>
    for HashMap<K, V, S>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Self::default();
        map.put_all(iter);

        map
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> Extend<(K, V)> for HashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let hash = self.hash(key);
            let index = self.segment_index_from_hash(hash);
            let build_hasher = &self.build_hasher;

            self.segments[index]
                .get_mut()
                .put(hash, key, value, build_hasher);
        }
    }
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
