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

//! Validated construction of a [`HashMap`].
//!
//! [`HashMap`]: ../struct.HashMap.html

use super::{HashMap, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, DEFAULT_NUM_SEGMENTS};

use crate::{
    common::Table,
    error::{ConfigError, MAX_CAPACITY, MAX_SEGMENTS},
    hash::BitsState,
    key::Key,
    segment::Segment,
};

use std::{hash::BuildHasher, marker::PhantomData};

/// Configuration for a [`HashMap`], checked when the map is built.
///
/// ```
/// use primcht::HashMap;
///
/// let map: HashMap<u32, u64> = HashMap::builder()
///     .num_segments(4)
///     .capacity(64)
///     .load_factor(0.5)
///     .default_value(u64::MAX)
///     .build()
///     .unwrap();
///
/// assert_eq!(map.num_segments(), 4);
/// assert_eq!(map.get(7), u64::MAX);
/// ```
///
/// [`HashMap`]: ../struct.HashMap.html
#[derive(Clone, Debug)]
pub struct Builder<K, V, S = BitsState> {
    num_segments: usize,
    capacity: usize,
    load_factor: f32,
    default_value: V,
    build_hasher: S,
    _key: PhantomData<K>,
}

impl<K: Key, V: Copy + PartialEq> Builder<K, V, BitsState> {
    /// Starts a configuration with default settings whose maps report
    /// `default_value` for absent keys.
    pub fn new(default_value: V) -> Self {
        Self {
            num_segments: DEFAULT_NUM_SEGMENTS,
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            default_value,
            build_hasher: BitsState,
            _key: PhantomData,
        }
    }
}

impl<K: Key, V: Copy + PartialEq, S: BuildHasher> Builder<K, V, S> {
    /// Sets the number of segments. It is rounded up to a power of two.
    pub fn num_segments(mut self, num_segments: usize) -> Self {
        self.num_segments = num_segments;

        self
    }

    /// Sets the initial number of slots in each segment's table. It is
    /// rounded up to a power of two, and no segment shrinks below it.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;

        self
    }

    /// Sets the fraction of slots that may be occupied before a table grows.
    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;

        self
    }

    /// Sets the value reported for absent keys.
    pub fn default_value(mut self, default_value: V) -> Self {
        self.default_value = default_value;

        self
    }

    /// Sets the hasher used to compute native key hashes.
    pub fn hasher<T: BuildHasher>(self, build_hasher: T) -> Builder<K, V, T> {
        Builder {
            num_segments: self.num_segments,
            capacity: self.capacity,
            load_factor: self.load_factor,
            default_value: self.default_value,
            build_hasher,
            _key: PhantomData,
        }
    }

    /// Validates the configuration and creates an empty map.
    pub fn build(self) -> Result<HashMap<K, V, S>, ConfigError> {
        let num_segments = segment_count(self.num_segments)?;

        if !(self.load_factor > 0.0 && self.load_factor < 1.0) {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }

        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge(self.capacity));
        }

        let capacity = self.capacity.max(2).next_power_of_two();

        let segments = (0..num_segments)
            .map(|_| Segment::new(Table::new(capacity, self.load_factor, self.default_value)))
            .collect();

        tracing::debug!(
            num_segments,
            capacity,
            load_factor = self.load_factor,
            "built map"
        );

        Ok(HashMap::from_parts(
            segments,
            self.build_hasher,
            self.default_value,
        ))
    }

    /// Validates the configuration and creates a map holding `keys[i]` mapped
    /// to `values[i]`, inserted in slice order.
    pub fn build_from_slices(self, keys: &[K], values: &[V]) -> Result<HashMap<K, V, S>, ConfigError> {
        if keys.len() != values.len() {
            return Err(ConfigError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        let mut map = self.build()?;
        map.extend(keys.iter().copied().zip(values.iter().copied()));

        Ok(map)
    }
}

fn segment_count(requested: usize) -> Result<usize, ConfigError> {
    match requested.checked_next_power_of_two() {
        Some(rounded) if requested > 0 && rounded < MAX_SEGMENTS => Ok(rounded),
        _ => Err(ConfigError::InvalidSegmentCount(requested)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let map = Builder::<u32, u32>::new(0).build().unwrap();

        assert_eq!(map.num_segments(), DEFAULT_NUM_SEGMENTS);
        assert_eq!(map.segment_capacity(0), DEFAULT_CAPACITY);
        assert_eq!(map.default_return_value(), 0);
    }

    #[test]
    fn rounds_up_to_powers_of_two() {
        let map = Builder::<u32, u32>::new(0)
            .num_segments(5)
            .capacity(0)
            .build()
            .unwrap();

        assert_eq!(map.num_segments(), 8);
        assert_eq!(map.segment_capacity(7), 2);

        let map = Builder::<u32, u32>::new(0)
            .num_segments(1)
            .capacity(17)
            .build()
            .unwrap();

        assert_eq!(map.num_segments(), 1);
        assert_eq!(map.segment_capacity(0), 32);
    }

    #[test]
    fn rejects_bad_segment_counts() {
        for &count in &[0, MAX_SEGMENTS, MAX_SEGMENTS / 2 + 1, usize::MAX] {
            let result = Builder::<u32, u32>::new(0).num_segments(count).build();

            assert_eq!(result.err(), Some(ConfigError::InvalidSegmentCount(count)));
        }

        assert!(Builder::<u32, u32>::new(0)
            .num_segments(MAX_SEGMENTS / 2)
            .capacity(2)
            .build()
            .is_ok());
    }

    #[test]
    fn rejects_bad_load_factors() {
        for &load_factor in &[0.0, 1.0, -0.5, 1.5, f32::NAN] {
            let result = Builder::<u32, u32>::new(0).load_factor(load_factor).build();

            assert!(matches!(result, Err(ConfigError::InvalidLoadFactor(_))));
        }
    }

    #[test]
    fn rejects_huge_capacity() {
        let result = Builder::<u32, u32>::new(0)
            .capacity(MAX_CAPACITY + 1)
            .build();

        assert_eq!(
            result.err(),
            Some(ConfigError::CapacityTooLarge(MAX_CAPACITY + 1))
        );
    }

    #[test]
    fn slices_must_match() {
        let result = Builder::<u32, u32>::new(0).build_from_slices(&[1, 2, 3], &[1, 2]);

        let error = result.err().unwrap();
        assert_eq!(error, ConfigError::LengthMismatch { keys: 3, values: 2 });
        assert_eq!(error.to_string(), "got 3 keys but 2 values");

        let map = Builder::<u32, u32>::new(0)
            .build_from_slices(&[3, 1, 2], &[30, 10, 20])
            .unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(1), 10);
    }
}
