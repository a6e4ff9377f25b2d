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

use thiserror::Error;

/// Largest per-segment capacity a table can be created with.
///
/// Slot indices are stored in 32 bits, with `u32::MAX` reserved.
pub(crate) const MAX_CAPACITY: usize = 1 << 30;

/// Exclusive upper bound on the number of segments.
pub(crate) const MAX_SEGMENTS: usize = 1 << 16;

/// Construction-time configuration errors.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The segment count was 0, not a power of two, or at least 65536.
    #[error("segment count must be a power of two in [1, 65536), got {0}")]
    InvalidSegmentCount(usize),

    /// The load factor was not strictly between 0 and 1.
    #[error("load factor must be in (0, 1), got {0}")]
    InvalidLoadFactor(f32),

    /// The requested capacity cannot be represented.
    #[error("capacity {0} exceeds the maximum table capacity")]
    CapacityTooLarge(usize),

    /// Bulk construction was given key and value slices of different lengths.
    #[error("got {keys} keys but {values} values")]
    LengthMismatch { keys: usize, values: usize },
}
