//! Kernels driven by a [`Pipeline`](super::Pipeline).
//!
//! A kernel is generic over the lane width so that one value drives the
//! unrolled blocks, the single-vector remainder and the one-lane tail.

use crate::flux::FluxLimiterType;
use crate::math;
use crate::simd::{Element, Lanes};

/// Element-wise function of one array.
pub trait UnaryKernel<T: Element>: Sync {
    fn apply<const W: usize>(&self, x: Lanes<T, W>) -> Lanes<T, W>;
}

/// Element-wise function of two arrays.
pub trait BinaryKernel<T: Element>: Sync {
    fn apply<const W: usize>(&self, a: Lanes<T, W>, b: Lanes<T, W>) -> Lanes<T, W>;
}

/// Associative, commutative fold of an array to one value.
///
/// `combine` must treat `identity` as a neutral element, since unused
/// accumulators and empty inputs start from it.
pub trait Reduction<T: Element>: Sync {
    fn identity(&self) -> T;

    fn combine<const W: usize>(&self, acc: Lanes<T, W>, x: Lanes<T, W>) -> Lanes<T, W>;

    /// Horizontal fold of one accumulator vector.
    fn finish<const W: usize>(&self, acc: Lanes<T, W>) -> T;

    /// Combines two partial results.
    #[inline(always)]
    fn merge(&self, a: T, b: T) -> T {
        self.finish(self.combine(Lanes([a]), Lanes([b])))
    }
}

macro_rules! unary_kernels {
    ($($(#[$meta:meta])* $name:ident => $f:path;)*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl<T: Element> UnaryKernel<T> for $name {
            #[inline(always)]
            fn apply<const W: usize>(&self, x: Lanes<T, W>) -> Lanes<T, W> {
                $f(x)
            }
        }
    )*};
}

unary_kernels! {
    Abs => math::abs;
    Sqrt => Lanes::sqrt;
    Cbrt => math::cbrt;
    Exp => math::exp;
    Exp2 => math::exp2;
    Exp10 => math::exp10;
    Expm1 => math::expm1;
    /// Natural logarithm.
    Ln => math::ln;
    Log2 => math::log2;
    Log10 => math::log10;
    Log1p => math::log1p;
    Sin => math::sin;
    Cos => math::cos;
    Tan => math::tan;
    Asin => math::asin;
    Acos => math::acos;
    Atan => math::atan;
    Sinh => math::sinh;
    Cosh => math::cosh;
    Tanh => math::tanh;
    Asinh => math::asinh;
    Acosh => math::acosh;
    Atanh => math::atanh;
    Erf => math::erf;
    Erfc => math::erfc;
}

macro_rules! binary_kernels {
    ($($(#[$meta:meta])* $name:ident($a:ident, $b:ident) => $body:expr;)*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl<T: Element> BinaryKernel<T> for $name {
            #[inline(always)]
            fn apply<const W: usize>(&self, $a: Lanes<T, W>, $b: Lanes<T, W>) -> Lanes<T, W> {
                $body
            }
        }
    )*};
}

binary_kernels! {
    Add(a, b) => a + b;
    Sub(a, b) => a - b;
    Mul(a, b) => a * b;
    Div(a, b) => a / b;
    /// `a^b`, see [`math::pow`].
    Pow(a, b) => math::pow(a, b);
    /// `atan2(a, b)` with `a` the ordinate.
    Atan2(a, b) => math::atan2(a, b);
    Min(a, b) => a.min(b);
    Max(a, b) => a.max(b);
    ModMin(a, b) => math::modmin(a, b);
    /// Magnitude of `a` with the sign of `b`.
    Copysign(a, b) => math::copysign(a, b);
}

/// Limiter applied to arrays of consecutive differences `d1`, `d2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FluxLimiter(pub FluxLimiterType);

impl<T: Element> BinaryKernel<T> for FluxLimiter {
    #[inline(always)]
    fn apply<const W: usize>(&self, d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
        self.0.apply(d1, d2)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

impl<T: Element> Reduction<T> for Sum {
    #[inline(always)]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn combine<const W: usize>(&self, acc: Lanes<T, W>, x: Lanes<T, W>) -> Lanes<T, W> {
        acc + x
    }

    #[inline(always)]
    fn finish<const W: usize>(&self, acc: Lanes<T, W>) -> T {
        acc.reduce_add()
    }
}

/// Maximum ignoring NaN; `-inf` for an empty input.
impl<T: Element> Reduction<T> for Max {
    #[inline(always)]
    fn identity(&self) -> T {
        T::neg_infinity()
    }

    #[inline(always)]
    fn combine<const W: usize>(&self, acc: Lanes<T, W>, x: Lanes<T, W>) -> Lanes<T, W> {
        acc.max(x)
    }

    #[inline(always)]
    fn finish<const W: usize>(&self, acc: Lanes<T, W>) -> T {
        acc.reduce_max()
    }
}

/// Minimum ignoring NaN; `+inf` for an empty input.
impl<T: Element> Reduction<T> for Min {
    #[inline(always)]
    fn identity(&self) -> T {
        T::infinity()
    }

    #[inline(always)]
    fn combine<const W: usize>(&self, acc: Lanes<T, W>, x: Lanes<T, W>) -> Lanes<T, W> {
        acc.min(x)
    }

    #[inline(always)]
    fn finish<const W: usize>(&self, acc: Lanes<T, W>) -> T {
        acc.reduce_min()
    }
}
