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

//! Insertion-order traversal across segments.

use super::{Entry, HashMap};

use crate::{
    common::{ListCursor, NIL},
    key::Key,
};

use std::hash::BuildHasher;

/// A bidirectional cursor over every entry of a [`HashMap`].
///
/// Entries are visited segment by segment in segment-index order, and in
/// insertion order within each segment. The cursor sits *between* two
/// entries: [`move_next`] returns the entry after it and [`move_prev`] the
/// entry before it, so alternating the two returns the same entry twice.
///
/// No lock is held between calls; each step takes one segment's lock at a
/// time for the duration of the step. If another thread mutates the segment the cursor is
/// in, later steps may skip or repeat entries, but never read out of bounds.
///
/// [`HashMap`]: ../struct.HashMap.html
/// [`move_next`]: #method.move_next
/// [`move_prev`]: #method.move_prev
pub struct Cursor<'a, K, V, S> {
    map: &'a HashMap<K, V, S>,
    segment: usize,
    position: ListCursor,
    last_returned: Option<usize>,
    removed: bool,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> Cursor<'a, K, V, S> {
    pub(crate) fn front(map: &'a HashMap<K, V, S>) -> Self {
        let next = map.segments()[0].read(|table| table.first_slot());

        Self {
            map,
            segment: 0,
            position: ListCursor {
                prev: NIL,
                next: next.map_or(NIL, |slot| slot as u32),
            },
            last_returned: None,
            removed: false,
        }
    }

    pub(crate) fn back(map: &'a HashMap<K, V, S>) -> Self {
        let segment = map.num_segments() - 1;
        let prev = map.segments()[segment].read(|table| table.last_slot());

        Self {
            map,
            segment,
            position: ListCursor {
                prev: prev.map_or(NIL, |slot| slot as u32),
                next: NIL,
            },
            last_returned: None,
            removed: false,
        }
    }

    /// Advances past the next entry and returns a copy of it, or `None` if
    /// the cursor is at the end.
    pub fn move_next(&mut self) -> Option<(K, V)> {
        if self.position.next != NIL {
            let slot = self.position.next as usize;

            let visited = self.map.segments()[self.segment].read(|table| table.visit(slot));

            if let Some(visit) = visited {
                self.position = ListCursor {
                    prev: slot as u32,
                    next: visit.next,
                };
                self.last_returned = Some(slot);

                return Some((visit.key, visit.value));
            }
        }

        self.leave_segment(true);

        for index in self.segment + 1..self.map.num_segments() {
            let found = self.map.segments()[index].read(|table| {
                table
                    .first_slot()
                    .and_then(|slot| table.visit(slot).map(|visit| (slot, visit)))
            });

            if let Some((slot, visit)) = found {
                self.segment = index;
                self.position = ListCursor {
                    prev: slot as u32,
                    next: visit.next,
                };
                self.last_returned = Some(slot);

                return Some((visit.key, visit.value));
            }
        }

        self.last_returned = None;

        None
    }

    /// Steps back over the previous entry and returns a copy of it, or
    /// `None` if the cursor is at the start.
    pub fn move_prev(&mut self) -> Option<(K, V)> {
        if self.position.prev != NIL {
            let slot = self.position.prev as usize;

            let visited = self.map.segments()[self.segment].read(|table| table.visit(slot));

            if let Some(visit) = visited {
                self.position = ListCursor {
                    prev: visit.prev,
                    next: slot as u32,
                };
                self.last_returned = Some(slot);

                return Some((visit.key, visit.value));
            }
        }

        self.leave_segment(false);

        for index in (0..self.segment).rev() {
            let found = self.map.segments()[index].read(|table| {
                table
                    .last_slot()
                    .and_then(|slot| table.visit(slot).map(|visit| (slot, visit)))
            });

            if let Some((slot, visit)) = found {
                self.segment = index;
                self.position = ListCursor {
                    prev: visit.prev,
                    next: slot as u32,
                };
                self.last_returned = Some(slot);

                return Some((visit.key, visit.value));
            }
        }

        self.last_returned = None;

        None
    }

    /// Removes the entry most recently returned by [`move_next`] or
    /// [`move_prev`] and returns it.
    ///
    /// Returns `None` if the cursor has not returned an entry since it was
    /// created or last removed one.
    ///
    /// Removal keeps the segment's table at its current size while the cursor
    /// is inside it. Once the cursor moves out of the segment, or runs off
    /// either end while in it, the table shrinks if removals left it sparse.
    /// A cursor dropped part way through a segment leaves that to
    /// [`HashMap::trim`].
    ///
    /// [`HashMap::trim`]: ../struct.HashMap.html#method.trim
    /// [`move_next`]: #method.move_next
    /// [`move_prev`]: #method.move_prev
    pub fn remove(&mut self) -> Option<(K, V)> {
        let slot = self.last_returned.take()?;
        let position = &mut self.position;
        let build_hasher = self.map.hasher();

        let removed = self.map.segments()[self.segment].write(|table| {
            if table.is_occupied(slot) {
                Some(table.remove_tracked(slot, position, build_hasher))
            } else {
                None
            }
        });

        self.removed |= removed.is_some();

        removed
    }

    /// Returns the index of the segment the cursor is currently in.
    pub fn segment(&self) -> usize {
        self.segment
    }

    // Called on the way out of the current segment, forwards or backwards.
    // Shrinks it if this cursor removed from it and re-anchors the position
    // at the list end it left through, since a rehash moves every slot.
    fn leave_segment(&mut self, forward: bool) {
        if !std::mem::take(&mut self.removed) {
            return;
        }

        let build_hasher = self.map.hasher();
        let ends = self.map.segments()[self.segment].write(|table| {
            if table.shrink_if_sparse(build_hasher) {
                Some((table.first_slot(), table.last_slot()))
            } else {
                None
            }
        });

        if let Some((first, last)) = ends {
            self.position = if forward {
                ListCursor {
                    prev: last.map_or(NIL, |slot| slot as u32),
                    next: NIL,
                }
            } else {
                ListCursor {
                    prev: NIL,
                    next: first.map_or(NIL, |slot| slot as u32),
                }
            };
        }
    }
}

/// An iterator over copies of a [`HashMap`]'s entries, in insertion order
/// within each segment.
///
/// [`HashMap`]: ../struct.HashMap.html
pub struct Iter<'a, K, V, S> {
    cursor: Cursor<'a, K, V, S>,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> Iter<'a, K, V, S> {
    pub(crate) fn new(cursor: Cursor<'a, K, V, S>) -> Self {
        Self { cursor }
    }

    /// Removes the entry most recently yielded by this iterator.
    ///
    /// See [`Cursor::remove`].
    ///
    /// [`Cursor::remove`]: struct.Cursor.html#method.remove
    pub fn remove(&mut self) -> Option<(K, V)> {
        self.cursor.remove()
    }

    /// Converts the iterator into the cursor it is built on.
    pub fn into_cursor(self) -> Cursor<'a, K, V, S> {
        self.cursor
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> Iterator for Iter<'_, K, V, S> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.cursor.move_next()
    }
}

/// An iterator over a [`HashMap`]'s keys.
///
/// [`HashMap`]: ../struct.HashMap.html
pub struct Keys<'a, K, V, S> {
    inner: Iter<'a, K, V, S>,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> Keys<'a, K, V, S> {
    pub(crate) fn new(inner: Iter<'a, K, V, S>) -> Self {
        Self { inner }
    }

    /// Removes the entry whose key was most recently yielded.
    pub fn remove(&mut self) -> Option<K> {
        self.inner.remove().map(|(key, _)| key)
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> Iterator for Keys<'_, K, V, S> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// An iterator over a [`HashMap`]'s values.
///
/// [`HashMap`]: ../struct.HashMap.html
pub struct Values<'a, K, V, S> {
    inner: Iter<'a, K, V, S>,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> Values<'a, K, V, S> {
    pub(crate) fn new(inner: Iter<'a, K, V, S>) -> Self {
        Self { inner }
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> Iterator for Values<'_, K, V, S> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, value)| value)
    }
}

/// An iterator over owned [`Entry`] copies.
///
/// [`Entry`]: struct.Entry.html
pub struct Entries<'a, K, V, S> {
    inner: Iter<'a, K, V, S>,
}

impl<'a, K: Key, V: Copy + PartialEq, S: BuildHasher> Entries<'a, K, V, S> {
    pub(crate) fn new(inner: Iter<'a, K, V, S>) -> Self {
        Self { inner }
    }

    /// Removes the entry most recently yielded.
    pub fn remove(&mut self) -> Option<Entry<K, V>> {
        self.inner
            .remove()
            .map(|(key, value)| Entry::new(key, value))
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> Iterator for Entries<'_, K, V, S> {
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Entry<K, V>> {
        self.inner
            .next()
            .map(|(key, value)| Entry::new(key, value))
    }
}
