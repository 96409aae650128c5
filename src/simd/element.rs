//! Per-type scalar traits for lane vectors.
//!
//! [`LaneScalar`] is the minimum a type needs to live in a lane: a raw
//! unsigned word view used by branch-free blending. [`Element`] extends it
//! for the two IEEE754 float types with their bit layout and the integer
//! lane types that carry exponents and raw patterns.

use std::fmt::Debug;

use num::traits::{Float, FloatConst, PrimInt, Signed, Unsigned};

/// A scalar that can occupy one lane of a [`Lanes`](super::Lanes) vector.
pub trait LaneScalar: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Unsigned word with the same width as `Self`.
    type Word: PrimInt + Unsigned + Debug;

    /// Reinterprets the value as its raw word.
    fn to_word(self) -> Self::Word;

    /// Reinterprets a raw word as a value.
    fn from_word(word: Self::Word) -> Self;

    /// All-ones word when `on`, all-zeros otherwise.
    fn fill_word(on: bool) -> Self::Word;
}

macro_rules! impl_lane_scalar_float {
    ($($t:ty => $w:ty),* $(,)?) => {$(
        impl LaneScalar for $t {
            type Word = $w;

            #[inline(always)]
            fn to_word(self) -> $w {
                <$t>::to_bits(self)
            }

            #[inline(always)]
            fn from_word(word: $w) -> $t {
                <$t>::from_bits(word)
            }

            #[inline(always)]
            fn fill_word(on: bool) -> $w {
                (on as $w).wrapping_neg()
            }
        }
    )*};
}

macro_rules! impl_lane_scalar_int {
    ($($t:ty => $w:ty),* $(,)?) => {$(
        impl LaneScalar for $t {
            type Word = $w;

            #[inline(always)]
            fn to_word(self) -> $w {
                self as $w
            }

            #[inline(always)]
            fn from_word(word: $w) -> $t {
                word as $t
            }

            #[inline(always)]
            fn fill_word(on: bool) -> $w {
                (on as $w).wrapping_neg()
            }
        }
    )*};
}

impl_lane_scalar_float!(f32 => u32, f64 => u64);
impl_lane_scalar_int!(u32 => u32, u64 => u64, i32 => u32, i64 => u64);

/// An IEEE754 binary float usable by every kernel in this crate.
///
/// The layout constants describe the binary format. The remaining constants
/// are thresholds the kernels need per precision, kept here so they are
/// never recomputed per call.
pub trait Element: Float + FloatConst + LaneScalar {
    /// Unsigned integer holding the raw bit pattern.
    type Bits: PrimInt + Unsigned + LaneScalar;
    /// Signed integer used for exponents and quadrant counters.
    type Int: PrimInt + Signed + LaneScalar;

    /// Native lane count of a 256-bit register.
    const LANES: usize;
    /// Width of the format in bits.
    const TOTAL_BITS: u32;
    /// Explicit mantissa bits (23 or 52).
    const MANTISSA_BITS: u32;
    /// Exponent bias (127 or 1023).
    const EXPONENT_BIAS: i32;
    /// Smallest unbiased exponent of a normal number.
    const MIN_EXPONENT: i32;
    /// Largest unbiased exponent of a finite number.
    const MAX_EXPONENT: i32;
    /// Sign bit.
    const SIGN_MASK: Self::Bits;
    /// Exponent field.
    const EXPONENT_MASK: Self::Bits;
    /// Mantissa field.
    const MANTISSA_MASK: Self::Bits;
    /// Guard below which a magnitude counts as degenerate.
    const SMALL: Self;
    /// |x| beyond which `tanh(x)` rounds to ±1.
    const TANH_SATURATION: Self;
    /// x beyond which `erfc(x)` underflows to 0.
    const ERFC_CUTOFF: Self;

    fn to_bits(self) -> Self::Bits;
    fn from_bits(bits: Self::Bits) -> Self;

    /// Rounds an `f64` constant to this precision.
    fn constant(value: f64) -> Self;

    /// Rounds an `f64` constant to this precision and also returns what
    /// the rounding dropped, itself rounded.
    fn constant_split(value: f64) -> (Self, Self);

    /// Converts to the signed lane integer, truncating toward zero and
    /// saturating at the integer range. NaN becomes 0.
    fn to_int(self) -> Self::Int;
    fn from_int(value: Self::Int) -> Self;

    /// Widens an `i32` literal to the signed lane integer.
    fn int(value: i32) -> Self::Int;
    /// Widens a `u64` literal to the raw bits type, truncating.
    fn bits(value: u64) -> Self::Bits;

    /// Reinterprets a signed lane integer as raw bits.
    fn int_to_bits(value: Self::Int) -> Self::Bits;
    /// Reinterprets raw bits as a signed lane integer.
    fn bits_to_int(value: Self::Bits) -> Self::Int;
    /// Narrows a non-negative lane integer to a shift amount.
    fn int_as_u32(value: Self::Int) -> u32;
}

impl Element for f32 {
    type Bits = u32;
    type Int = i32;

    const LANES: usize = 8;
    const TOTAL_BITS: u32 = 32;
    const MANTISSA_BITS: u32 = 23;
    const EXPONENT_BIAS: i32 = 127;
    const MIN_EXPONENT: i32 = -126;
    const MAX_EXPONENT: i32 = 127;
    const SIGN_MASK: u32 = 0x8000_0000;
    const EXPONENT_MASK: u32 = 0x7F80_0000;
    const MANTISSA_MASK: u32 = 0x007F_FFFF;
    const SMALL: f32 = f32::EPSILON;
    const TANH_SATURATION: f32 = 9.0;
    const ERFC_CUTOFF: f32 = 10.1;

    #[inline(always)]
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> f32 {
        f32::from_bits(bits)
    }

    #[inline(always)]
    fn constant(value: f64) -> f32 {
        value as f32
    }

    #[inline(always)]
    fn constant_split(value: f64) -> (f32, f32) {
        let hi = value as f32;
        (hi, (value - hi as f64) as f32)
    }

    #[inline(always)]
    fn to_int(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_int(value: i32) -> f32 {
        value as f32
    }

    #[inline(always)]
    fn int(value: i32) -> i32 {
        value
    }

    #[inline(always)]
    fn bits(value: u64) -> u32 {
        value as u32
    }

    #[inline(always)]
    fn int_to_bits(value: i32) -> u32 {
        value as u32
    }

    #[inline(always)]
    fn bits_to_int(value: u32) -> i32 {
        value as i32
    }

    #[inline(always)]
    fn int_as_u32(value: i32) -> u32 {
        value as u32
    }
}

impl Element for f64 {
    type Bits = u64;
    type Int = i64;

    const LANES: usize = 4;
    const TOTAL_BITS: u32 = 64;
    const MANTISSA_BITS: u32 = 52;
    const EXPONENT_BIAS: i32 = 1023;
    const MIN_EXPONENT: i32 = -1022;
    const MAX_EXPONENT: i32 = 1023;
    const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
    const EXPONENT_MASK: u64 = 0x7FF0_0000_0000_0000;
    const MANTISSA_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
    const SMALL: f64 = f64::EPSILON;
    const TANH_SATURATION: f64 = 20.0;
    const ERFC_CUTOFF: f64 = 27.3;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u64) -> f64 {
        f64::from_bits(bits)
    }

    #[inline(always)]
    fn constant(value: f64) -> f64 {
        value
    }

    #[inline(always)]
    fn constant_split(value: f64) -> (f64, f64) {
        (value, 0.0)
    }

    #[inline(always)]
    fn to_int(self) -> i64 {
        self as i64
    }

    #[inline(always)]
    fn from_int(value: i64) -> f64 {
        value as f64
    }

    #[inline(always)]
    fn int(value: i32) -> i64 {
        value as i64
    }

    #[inline(always)]
    fn bits(value: u64) -> u64 {
        value
    }

    #[inline(always)]
    fn int_to_bits(value: i64) -> u64 {
        value as u64
    }

    #[inline(always)]
    fn bits_to_int(value: u64) -> i64 {
        value as i64
    }

    #[inline(always)]
    fn int_as_u32(value: i64) -> u32 {
        value as u32
    }
}
