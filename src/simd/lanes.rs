//! Portable fixed-width lane vector.
//!
//! `Lanes<T, W>` is a plain `[T; W]` with lane-wise arithmetic, comparisons
//! returning a [`Mask`] and a bitwise [`select`](Lanes::select). The loops
//! have a constant trip count, so the optimizer lowers them to native
//! vector instructions at the chosen width. `Lanes<T, 1>` is the scalar
//! path and runs the exact same kernel code.
//!
//! Methods live in three impl blocks:
//!
//! | Block | Bound | Purpose |
//! |-------|-------|---------|
//! | any lane | [`LaneScalar`] | construction, comparisons, blending |
//! | float lanes | [`Element`] | rounding, fused ops, bit views, reductions |
//! | integer lanes | `PrimInt` | shifts and clamping of exponents |

use std::array;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

use num::traits::{Float, PrimInt};

use super::{Element, LaneScalar, Mask};

/// `W` lanes of `T`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lanes<T, const W: usize>(pub [T; W]);

/// Eight `f32` lanes, one 256-bit register.
pub type F32x8 = Lanes<f32, 8>;
/// Four `f64` lanes, one 256-bit register.
pub type F64x4 = Lanes<f64, 4>;

impl<T: LaneScalar, const W: usize> Lanes<T, W> {
    pub const WIDTH: usize = W;

    /// Broadcasts `value` to every lane.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Lanes([value; W])
    }

    #[inline(always)]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Lanes(array::from_fn(f))
    }

    /// Loads the first `W` elements of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than `W`.
    #[inline(always)]
    pub fn from_slice(src: &[T]) -> Self {
        debug_assert!(src.len() >= W, "slice shorter than lane width");
        Lanes(array::from_fn(|i| src[i]))
    }

    /// Stores the lanes into the first `W` elements of `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `W`.
    #[inline(always)]
    pub fn store(self, dst: &mut [T]) {
        dst[..W].copy_from_slice(&self.0);
    }

    #[inline(always)]
    pub fn extract(self, index: usize) -> T {
        self.0[index]
    }

    #[inline(always)]
    pub fn to_array(self) -> [T; W] {
        self.0
    }

    /// Applies `f` to every lane.
    #[inline(always)]
    pub fn map(self, f: impl FnMut(T) -> T) -> Self {
        Lanes(self.0.map(f))
    }

    /// Applies `f` lane-wise to a pair of vectors.
    #[inline(always)]
    pub fn zip_map(self, other: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        Lanes(array::from_fn(|i| f(self.0[i], other.0[i])))
    }

    /// Converts every lane to another lane type.
    #[inline(always)]
    pub fn map_into<U: LaneScalar>(self, f: impl FnMut(T) -> U) -> Lanes<U, W> {
        Lanes(self.0.map(f))
    }

    #[inline(always)]
    fn compare(self, other: Self, mut f: impl FnMut(&T, &T) -> bool) -> Mask<W> {
        Mask(array::from_fn(|i| f(&self.0[i], &other.0[i])))
    }

    #[inline(always)]
    pub fn cmp_lt(self, other: Self) -> Mask<W> {
        self.compare(other, PartialOrd::lt)
    }

    #[inline(always)]
    pub fn cmp_le(self, other: Self) -> Mask<W> {
        self.compare(other, PartialOrd::le)
    }

    #[inline(always)]
    pub fn cmp_gt(self, other: Self) -> Mask<W> {
        self.compare(other, PartialOrd::gt)
    }

    #[inline(always)]
    pub fn cmp_ge(self, other: Self) -> Mask<W> {
        self.compare(other, PartialOrd::ge)
    }

    #[inline(always)]
    pub fn cmp_eq(self, other: Self) -> Mask<W> {
        self.compare(other, PartialEq::eq)
    }

    /// Ordered-or-not inequality: NaN lanes compare unequal.
    #[inline(always)]
    pub fn cmp_ne(self, other: Self) -> Mask<W> {
        self.compare(other, PartialEq::ne)
    }

    /// Lane-wise blend: `a` where `mask` is set, `b` elsewhere.
    ///
    /// Each mask lane becomes an all-ones or all-zeros word and the blend is
    /// `(a & m) | (b & !m)` on the raw words, so no lane takes a branch.
    #[inline(always)]
    pub fn select(mask: Mask<W>, a: Self, b: Self) -> Self {
        Lanes(array::from_fn(|i| {
            let m = T::fill_word(mask.0[i]);
            T::from_word((a.0[i].to_word() & m) | (b.0[i].to_word() & !m))
        }))
    }
}

impl<T: Element, const W: usize> Lanes<T, W> {
    /// Broadcasts an `f64` constant rounded to `T`.
    #[inline(always)]
    pub fn constant(value: f64) -> Self {
        Self::splat(T::constant(value))
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    #[inline(always)]
    pub fn one() -> Self {
        Self::splat(T::one())
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        self.map(Float::abs)
    }

    #[inline(always)]
    pub fn sqrt(self) -> Self {
        self.map(Float::sqrt)
    }

    #[inline(always)]
    pub fn floor(self) -> Self {
        self.map(Float::floor)
    }

    /// Rounds half away from zero.
    #[inline(always)]
    pub fn round(self) -> Self {
        self.map(Float::round)
    }

    #[inline(always)]
    pub fn trunc(self) -> Self {
        self.map(Float::trunc)
    }

    #[inline(always)]
    pub fn recip(self) -> Self {
        self.map(Float::recip)
    }

    /// Lane-wise minimum. A NaN lane yields the other operand.
    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        self.zip_map(other, Float::min)
    }

    /// Lane-wise maximum. A NaN lane yields the other operand.
    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        self.zip_map(other, Float::max)
    }

    /// `self * a + b` with a single rounding.
    #[inline(always)]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        Lanes(array::from_fn(|i| self.0[i].mul_add(a.0[i], b.0[i])))
    }

    #[inline(always)]
    pub fn is_nan(self) -> Mask<W> {
        self.cmp_ne(self)
    }

    /// Set for lanes that are neither infinite nor NaN.
    #[inline(always)]
    pub fn is_finite(self) -> Mask<W> {
        self.abs().cmp_lt(Self::splat(T::infinity()))
    }

    #[inline(always)]
    pub fn to_bits(self) -> Lanes<T::Bits, W> {
        self.map_into(T::to_bits)
    }

    #[inline(always)]
    pub fn from_bits(bits: Lanes<T::Bits, W>) -> Self {
        bits.map_into(T::from_bits)
    }

    /// Truncating conversion to integer lanes, see [`Element::to_int`].
    #[inline(always)]
    pub fn to_int(self) -> Lanes<T::Int, W> {
        self.map_into(T::to_int)
    }

    #[inline(always)]
    pub fn from_int(ints: Lanes<T::Int, W>) -> Self {
        ints.map_into(T::from_int)
    }

    /// Horizontal sum.
    #[inline(always)]
    pub fn reduce_add(self) -> T {
        self.0.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    /// Horizontal maximum, `-inf` when `W == 0`.
    #[inline(always)]
    pub fn reduce_max(self) -> T {
        self.0.iter().fold(T::neg_infinity(), |acc, &x| acc.max(x))
    }

    /// Horizontal minimum, `+inf` when `W == 0`.
    #[inline(always)]
    pub fn reduce_min(self) -> T {
        self.0.iter().fold(T::infinity(), |acc, &x| acc.min(x))
    }
}

impl<T: LaneScalar + PrimInt, const W: usize> Lanes<T, W> {
    /// Shifts every lane left by `n` bits.
    #[inline(always)]
    pub fn shift_left(self, n: u32) -> Self {
        self.map(|v| v << n as usize)
    }

    /// Shifts every lane right by `n` bits. Arithmetic for signed lanes.
    #[inline(always)]
    pub fn shift_right(self, n: u32) -> Self {
        self.map(|v| v >> n as usize)
    }

    /// Shifts each lane left by its own amount.
    #[inline(always)]
    pub fn shift_left_each(self, n: Lanes<u32, W>) -> Self {
        Lanes(array::from_fn(|i| self.0[i] << n.0[i] as usize))
    }

    #[inline(always)]
    pub fn clamp_int(self, lo: T, hi: T) -> Self {
        self.map(|v| v.max(lo).min(hi))
    }
}

macro_rules! impl_lane_binop {
    ($($op:ident::$method:ident),* $(,)?) => {$(
        impl<T: LaneScalar + $op<Output = T>, const W: usize> $op for Lanes<T, W> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Lanes(array::from_fn(|i| $op::$method(self.0[i], rhs.0[i])))
            }
        }
    )*};
}

impl_lane_binop!(
    Add::add,
    Sub::sub,
    Mul::mul,
    Div::div,
    Rem::rem,
    BitAnd::bitand,
    BitOr::bitor,
    BitXor::bitxor,
);

impl<T: LaneScalar + Neg<Output = T>, const W: usize> Neg for Lanes<T, W> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(Neg::neg)
    }
}

impl<T: LaneScalar + Not<Output = T>, const W: usize> Not for Lanes<T, W> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.map(Not::not)
    }
}
