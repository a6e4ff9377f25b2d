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

//! Fixed-width primitive keys.
//!
//! Keys are compared and hashed by their bit pattern, not by [`PartialEq`].
//! For floating point keys this means that `0.0` and `-0.0` are different
//! keys, and that every NaN payload is its own key.
//!
//! [`PartialEq`]: https://doc.rust-lang.org/std/cmp/trait.PartialEq.html

use std::fmt::Debug;

/// A primitive type that can be used as a key.
///
/// The all-zero bit pattern is the *empty marker*: tables use it to denote a
/// vacant slot. Keys with that bit pattern are still fully supported; they are
/// stored out of band in a dedicated slot.
pub trait Key: Copy + Debug + Send + Sync + 'static {
    /// The key whose bit pattern is all zeroes.
    const EMPTY: Self;

    /// Returns the bit pattern of this key, zero-extended to 64 bits.
    ///
    /// This must be injective, and must return `0` only for [`EMPTY`].
    ///
    /// [`EMPTY`]: #associatedconstant.EMPTY
    fn to_bits(self) -> u64;

    /// Returns `true` if `self` and `other` have identical bit patterns.
    #[inline]
    fn bits_eq(self, other: Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    /// Returns `true` if this key is the empty marker.
    #[inline]
    fn is_empty_marker(self) -> bool {
        self.to_bits() == 0
    }
}

macro_rules! impl_key_unsigned {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                const EMPTY: Self = 0;

                #[inline]
                fn to_bits(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

macro_rules! impl_key_signed {
    ($($t:ty => $u:ty),*) => {
        $(
            impl Key for $t {
                const EMPTY: Self = 0;

                #[inline]
                fn to_bits(self) -> u64 {
                    self as $u as u64
                }
            }
        )*
    };
}

impl_key_unsigned!(u8, u16, u32, u64, usize);
impl_key_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, isize => usize);

impl Key for f32 {
    const EMPTY: Self = 0.0;

    #[inline]
    fn to_bits(self) -> u64 {
        f32::to_bits(self) as u64
    }
}

impl Key for f64 {
    const EMPTY: Self = 0.0;

    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }
}

impl Key for char {
    const EMPTY: Self = '\0';

    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
}

impl Key for bool {
    const EMPTY: Self = false;

    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_markers_have_zero_bits() {
        assert!(0u8.is_empty_marker());
        assert!(0i64.is_empty_marker());
        assert!(0.0f32.is_empty_marker());
        assert!(0.0f64.is_empty_marker());
        assert!('\0'.is_empty_marker());
        assert!(false.is_empty_marker());

        assert!(!(-1i32).is_empty_marker());
        assert!(!(-0.0f64).is_empty_marker());
        assert!(!true.is_empty_marker());
    }

    #[test]
    fn signed_keys_zero_extend() {
        assert_eq!((-1i8).to_bits(), 0xff);
        assert_eq!((-1i32).to_bits(), 0xffff_ffff);
        assert_ne!((-1i32).to_bits(), (-1i64).to_bits());
    }

    #[test]
    fn float_keys_compare_by_bits() {
        assert!(!0.0f64.bits_eq(-0.0));
        assert!(f64::NAN.bits_eq(f64::NAN));

        let other_nan = f64::from_bits(f64::NAN.to_bits() | 1);
        assert!(other_nan.is_nan());
        assert!(!f64::NAN.bits_eq(other_nan));
    }
}
