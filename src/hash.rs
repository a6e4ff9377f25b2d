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

//! Key hashing.
//!
//! A key's *native hash* is produced by a [`BuildHasher`] fed with the key's
//! bit pattern. Primitive native hashes tend to be badly distributed (small
//! integers hash to themselves), so every native hash is passed through
//! [`mix`] exactly once. The high bits of the mixed hash select a segment and
//! the low bits select a slot inside that segment's table.
//!
//! [`BuildHasher`]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
//! [`mix`]: fn.mix.html

use crate::key::Key;

use std::hash::{BuildHasher, Hasher};

const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c15;

/// Scrambles a native hash so that both its high and low bits depend on every
/// input bit.
#[inline]
pub fn mix(x: u64) -> u64 {
    let h = x.wrapping_mul(GOLDEN_RATIO);
    let h = h ^ (h >> 32);

    h ^ (h >> 16)
}

/// Hashes `key` with `build_hasher`, then mixes the result.
#[inline]
pub(crate) fn hash<K: Key, H: BuildHasher>(build_hasher: &H, key: K) -> u64 {
    let mut hasher = build_hasher.build_hasher();
    hasher.write_u64(key.to_bits());

    mix(hasher.finish())
}

/// The default [`BuildHasher`]: a key's native hash is its bit pattern.
///
/// This is the cheapest possible hasher and relies on [`mix`] for
/// distribution. It provides no protection against HashDoS; use a keyed
/// hasher such as [aHash] if keys are attacker-controlled.
///
/// [`BuildHasher`]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
/// [`mix`]: fn.mix.html
/// [aHash]: https://docs.rs/ahash
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitsState;

impl BuildHasher for BitsState {
    type Hasher = BitsHasher;

    #[inline]
    fn build_hasher(&self) -> BitsHasher {
        BitsHasher(0)
    }
}

/// The [`Hasher`] built by [`BitsState`].
///
/// [`Hasher`]: https://doc.rust-lang.org/std/hash/trait.Hasher.html
/// [`BitsState`]: struct.BitsState.html
#[derive(Clone, Copy, Debug, Default)]
pub struct BitsHasher(u64);

impl Hasher for BitsHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0 ^= i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_spreads_small_integers() {
        let a = mix(1);
        let b = mix(2);

        assert_ne!(a >> 48, b >> 48);
        assert_ne!(a & 0xffff, b & 0xffff);
    }

    #[test]
    fn bits_state_is_identity_before_mixing() {
        let mut hasher = BitsState.build_hasher();
        hasher.write_u64(42);

        assert_eq!(hasher.finish(), 42);
        assert_eq!(hash(&BitsState, 42u32), mix(42));
    }

    #[test]
    fn signed_zeroes_hash_differently() {
        assert_ne!(hash(&BitsState, 0.0f64), hash(&BitsState, -0.0f64));
    }
}
