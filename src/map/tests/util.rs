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

use crate::{hash::mix, key::Key, map::HashMap};

use std::{
    collections::HashMap as StdHashMap,
    hash::{BuildHasher, Hasher},
    sync::Arc,
};

/// A `BuildHasher` whose native hashes are chosen by the test.
///
/// Keys listed in `hashes` hash to their mapped value; any other key hashes
/// to `fallback` if one is set, or to its own bit pattern otherwise.
#[derive(Clone, Debug, Default)]
pub(crate) struct PresetState {
    hashes: Arc<StdHashMap<u64, u64>>,
    fallback: Option<u64>,
}

impl PresetState {
    pub(crate) fn new<K: Key, I: IntoIterator<Item = (K, u64)>>(hashes: I) -> Self {
        Self {
            hashes: Arc::new(hashes.into_iter().map(|(k, h)| (k.to_bits(), h)).collect()),
            fallback: None,
        }
    }

    /// Every key hashes to `hash`, so every key lands in one probe cluster.
    pub(crate) fn constant(hash: u64) -> Self {
        Self {
            hashes: Arc::default(),
            fallback: Some(hash),
        }
    }
}

impl BuildHasher for PresetState {
    type Hasher = PresetHasher;

    fn build_hasher(&self) -> PresetHasher {
        PresetHasher {
            state: self.clone(),
            hash: 0,
        }
    }
}

pub(crate) struct PresetHasher {
    state: PresetState,
    hash: u64,
}

impl Hasher for PresetHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, _: &[u8]) {
        unreachable!("keys are hashed with write_u64");
    }

    fn write_u64(&mut self, bits: u64) {
        self.hash = match (self.state.hashes.get(&bits), self.state.fallback) {
            (Some(&hash), _) => hash,
            (None, Some(fallback)) => fallback,
            (None, None) => bits,
        };
    }
}

/// Returns the `nth` native hash whose mixed value routes to `segment` of a
/// map with `num_segments` segments.
pub(crate) fn native_hash_for_segment(segment: usize, num_segments: usize, nth: usize) -> u64 {
    let shift = 64 - num_segments.trailing_zeros();

    (1u64..)
        .filter(|&h| shift == 64 || (mix(h) >> shift) as usize == segment)
        .nth(nth)
        .unwrap()
}

/// Returns the first `count` positive keys that `map` routes to `segment`.
pub(crate) fn keys_in_segment<V: Copy + PartialEq, S: BuildHasher>(
    map: &HashMap<i64, V, S>,
    segment: usize,
    count: usize,
) -> Vec<i64> {
    (1i64..)
        .filter(|&k| map.segment_index(k) == segment)
        .take(count)
        .collect()
}
