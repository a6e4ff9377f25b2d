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

//! Segmented concurrent hash maps and sets for primitive keys.
//!
//! [`HashMap`] partitions its keys across a fixed number of segments, each an
//! open addressing table behind its own reader-writer lock. Keys and values
//! are stored inline in flat arrays with no per-entry allocation, and entries
//! are iterated in insertion order within each segment.
//!
//! ```
//! use primcht::HashMap;
//!
//! let map: HashMap<u64, u32> = HashMap::new();
//!
//! assert_eq!(map.put(7, 1), 0);
//! map.merge(7, 5, |old, new| Some(old + new));
//!
//! assert_eq!(map.get(7), 6);
//! assert_eq!(map.get(8), 0);
//! assert!(!map.contains_key(8));
//! ```

pub mod error;
pub mod hash;
pub mod key;
pub mod map;
pub mod set;

mod common;
mod segment;

#[cfg(test)]
mod proptests;

pub use error::ConfigError;
pub use key::Key;
pub use map::{Builder, HashMap};
pub use set::HashSet;

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        sync::{Arc, Barrier},
        thread,
    };

    #[test]
    fn hash_map_basics() {
        let map = HashMap::with_capacity(8);

        assert_eq!(map.put(1u32, 5), 0);
        assert_eq!(map.put(2, 10), 0);
        assert_eq!(map.put(3, 15), 0);
        assert_eq!(map.put(4, 20), 0);

        assert_eq!(map.get(1), 5);
        assert_eq!(map.get(2), 10);
        assert_eq!(map.get(3), 15);
        assert_eq!(map.get(4), 20);

        assert_eq!(map.put(4, 5), 20);
        assert_eq!(map.put(3, 10), 15);
        assert_eq!(map.put(2, 15), 10);
        assert_eq!(map.put(1, 20), 5);
    }

    #[test]
    fn hash_map_growth() {
        const MAX_VALUE: i32 = 512;

        let map = HashMap::new();

        for i in 1..MAX_VALUE {
            assert!(!map.contains_key(i));
            assert_eq!(map.put(i, i), 0);
        }

        for i in 1..MAX_VALUE {
            assert_eq!(map.get(i), i);
            assert_eq!(map.put(i, i), i);
        }

        map.assert_consistent();
    }

    #[test]
    fn hash_map_concurrent_insertion() {
        const MAX_VALUE: i32 = 512;
        const NUM_THREADS: usize = 64;
        const MAX_INSERTED_VALUE: i32 = (NUM_THREADS as i32) * MAX_VALUE;

        let map = Arc::new(HashMap::with_capacity(MAX_INSERTED_VALUE as usize));
        let barrier = Arc::new(Barrier::new(NUM_THREADS));

        let threads: Vec<_> = (0..NUM_THREADS)
            .map(|i| {
                let map = map.clone();
                let barrier = barrier.clone();

                thread::spawn(move || {
                    barrier.wait();

                    for j in (0..MAX_VALUE).map(|j| j + (i as i32 * MAX_VALUE)) {
                        assert!(!map.contains_key(j));
                        assert_eq!(map.put(j, j), 0);
                    }
                })
            })
            .collect();

        for result in threads.into_iter().map(|t| t.join()) {
            assert!(result.is_ok());
        }

        assert_eq!(map.len(), MAX_INSERTED_VALUE as usize);

        for i in 0..MAX_INSERTED_VALUE {
            assert_eq!(map.get(i), i);
        }
    }

    #[test]
    fn hash_map_concurrent_growth() {
        const MAX_VALUE: i32 = 512;
        const NUM_THREADS: usize = 64;
        const MAX_INSERTED_VALUE: i32 = (NUM_THREADS as i32) * MAX_VALUE;

        let map = Arc::new(HashMap::with_num_segments_and_capacity(4, 2));
        let barrier = Arc::new(Barrier::new(NUM_THREADS));

        let threads: Vec<_> = (0..NUM_THREADS)
            .map(|i| {
                let map = map.clone();
                let barrier = barrier.clone();

                thread::spawn(move || {
                    barrier.wait();

                    for j in (0..MAX_VALUE).map(|j| j + (i as i32 * MAX_VALUE)) {
                        assert_eq!(map.put(j, j + 1), 0);
                    }
                })
            })
            .collect();

        for result in threads.into_iter().map(|t| t.join()) {
            assert!(result.is_ok());
        }

        assert_eq!(map.len(), MAX_INSERTED_VALUE as usize);

        for i in 0..MAX_INSERTED_VALUE {
            assert_eq!(map.get(i), i + 1);
        }

        map.assert_consistent();
    }

    #[test]
    fn hash_map_removal() {
        const MAX_VALUE: i32 = 512;

        let map = HashMap::new();

        for i in 0..MAX_VALUE {
            assert_eq!(map.put(i, i + 1), 0);
        }

        for i in 0..MAX_VALUE {
            assert_eq!(map.remove(i), i + 1);
        }

        for i in 0..MAX_VALUE {
            assert!(!map.contains_key(i));
            assert_eq!(map.get(i), 0);
        }

        assert!(map.is_empty());
    }

    #[test]
    fn hash_map_concurrent_removal() {
        const MAX_VALUE: i32 = 512;
        const NUM_THREADS: usize = 64;
        const MAX_INSERTED_VALUE: i32 = (NUM_THREADS as i32) * MAX_VALUE;

        let map = Arc::new(HashMap::with_capacity(MAX_INSERTED_VALUE as usize));

        for i in 0..MAX_INSERTED_VALUE {
            assert_eq!(map.put(i, i + 1), 0);
        }

        let barrier = Arc::new(Barrier::new(NUM_THREADS));

        let threads: Vec<_> = (0..NUM_THREADS)
            .map(|i| {
                let map = map.clone();
                let barrier = barrier.clone();

                thread::spawn(move || {
                    barrier.wait();

                    for j in (0..MAX_VALUE).map(|j| j + (i as i32 * MAX_VALUE)) {
                        assert_eq!(map.remove(j), j + 1);
                    }
                })
            })
            .collect();

        for result in threads.into_iter().map(|t| t.join()) {
            assert!(result.is_ok());
        }

        assert_eq!(map.len(), 0);

        for i in 0..MAX_INSERTED_VALUE {
            assert!(!map.contains_key(i));
        }

        map.assert_consistent();
    }

    #[test]
    fn hash_set_basics() {
        let set: HashSet<char> = "hello".chars().collect();

        assert_eq!(set.len(), 4);
        assert!(set.contains('l'));
        assert!(!set.contains('z'));
    }
}
