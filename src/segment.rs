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

//! Segments: the unit of concurrency.
//!
//! A segment owns one [`Table`] behind a reader-writer lock. Keyed operations
//! touch exactly one segment, take its lock once, and release it before
//! returning. Mutations, along with any grow or shrink they trigger, run
//! under the write lock; lookups and scans run under the read lock.
//!
//! A scan calls back into user code while it holds a read lock, and that
//! code may look entries up again. `parking_lot` read locks queue behind
//! waiting writers, so a second plain read on the same thread could wait
//! forever for a writer that is itself waiting for the scan. While a scan is
//! running on a thread, every read that thread takes is recursive instead.
//!
//! [`Table`]: ../common/table/struct.Table.html

use crate::common::Table;

use parking_lot::RwLock;

use std::cell::Cell;

// Number of scans currently running on this thread.
thread_local! {
    static SCAN_DEPTH: Cell<usize> = Cell::new(0);
}

struct ScanGuard;

impl ScanGuard {
    fn enter() -> Self {
        SCAN_DEPTH.with(|depth| depth.set(depth.get() + 1));

        ScanGuard
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        SCAN_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

fn scanning() -> bool {
    SCAN_DEPTH.with(|depth| depth.get() > 0)
}

pub(crate) struct Segment<K, V> {
    table: RwLock<Table<K, V>>,
}

impl<K, V> Segment<K, V> {
    pub(crate) fn new(table: Table<K, V>) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// Runs `f` with shared access to the table.
    #[inline]
    pub(crate) fn read<T, F: FnOnce(&Table<K, V>) -> T>(&self, f: F) -> T {
        if scanning() {
            f(&self.table.read_recursive())
        } else {
            f(&self.table.read())
        }
    }

    /// Runs `f` with shared access to the table, marking this thread as
    /// scanning until `f` returns.
    ///
    /// Reads this thread takes from inside `f`, on this segment or any other,
    /// do not wait behind queued writers.
    pub(crate) fn scan<T, F: FnOnce(&Table<K, V>) -> T>(&self, f: F) -> T {
        let table = self.table.read_recursive();
        let _guard = ScanGuard::enter();

        f(&table)
    }

    /// Runs `f` with exclusive access to the table.
    #[inline]
    pub(crate) fn write<T, F: FnOnce(&mut Table<K, V>) -> T>(&self, f: F) -> T {
        f(&mut self.table.write())
    }

    pub(crate) fn len(&self) -> usize {
        self.read(Table::len)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.read(Table::capacity)
    }

    pub(crate) fn get_mut(&mut self) -> &mut Table<K, V> {
        self.table.get_mut()
    }
}

impl<K: Clone, V: Clone> Segment<K, V> {
    /// Deep-copies the table under the read lock.
    pub(crate) fn snapshot(&self) -> Table<K, V> {
        self.read(Table::clone)
    }
}
