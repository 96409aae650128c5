//! Slice-level conveniences returning freshly allocated results.
//!
//! Both traits are implemented for `[f32]` and `[f64]` on top of the
//! default [`Pipeline`](crate::array::Pipeline) of each type. The `par_`
//! variants split long inputs across the rayon pool.
//!
//! ```
//! use lanemath::simd::{SimdMath, SimdReduce};
//!
//! let x = vec![0.0f64, 1.0, 2.0];
//! let y = x.simd_exp();
//! assert_eq!(y[0], 1.0);
//! assert_eq!(x.simd_sum(), 3.0);
//! ```

use crate::array::{BinaryKernel, UnaryKernel};
use crate::array::kernels::{
    Abs, Acos, Acosh, Asin, Asinh, Atan, Atan2, Atanh, Cbrt, Cos, Cosh, Erf, Erfc, Exp, Exp10,
    Exp2, Expm1, Ln, Log10, Log1p, Log2, Pow, Sin, Sinh, Sqrt, Tan, Tanh,
};
use crate::error::Result;
use crate::simd::Element;

macro_rules! unary_methods {
    ($($name:ident, $par:ident => $kernel:ident;)*) => {$(
        #[inline]
        fn $name(&self) -> Vec<Self::Elem> {
            self.map_kernel(&$kernel)
        }

        #[inline]
        fn $par(&self) -> Vec<Self::Elem> {
            self.par_map_kernel(&$kernel)
        }
    )*};
}

/// Element-wise math over a whole slice.
pub trait SimdMath {
    type Elem: Element;

    /// Applies `kernel` to every element.
    fn map_kernel<K: UnaryKernel<Self::Elem>>(&self, kernel: &K) -> Vec<Self::Elem>;

    fn par_map_kernel<K: UnaryKernel<Self::Elem>>(&self, kernel: &K) -> Vec<Self::Elem>;

    /// Applies `kernel` to pairs of elements of `self` and `other`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](crate::error::LaneMathError::LengthMismatch) when
    /// the slices differ in length.
    fn zip_kernel<K: BinaryKernel<Self::Elem>>(
        &self,
        kernel: &K,
        other: &[Self::Elem],
    ) -> Result<Vec<Self::Elem>>;

    fn par_zip_kernel<K: BinaryKernel<Self::Elem>>(
        &self,
        kernel: &K,
        other: &[Self::Elem],
    ) -> Result<Vec<Self::Elem>>;

    unary_methods! {
        simd_abs, par_simd_abs => Abs;
        simd_sqrt, par_simd_sqrt => Sqrt;
        simd_cbrt, par_simd_cbrt => Cbrt;
        simd_exp, par_simd_exp => Exp;
        simd_exp2, par_simd_exp2 => Exp2;
        simd_exp10, par_simd_exp10 => Exp10;
        simd_expm1, par_simd_expm1 => Expm1;
        simd_ln, par_simd_ln => Ln;
        simd_log2, par_simd_log2 => Log2;
        simd_log10, par_simd_log10 => Log10;
        simd_log1p, par_simd_log1p => Log1p;
        simd_sin, par_simd_sin => Sin;
        simd_cos, par_simd_cos => Cos;
        simd_tan, par_simd_tan => Tan;
        simd_asin, par_simd_asin => Asin;
        simd_acos, par_simd_acos => Acos;
        simd_atan, par_simd_atan => Atan;
        simd_sinh, par_simd_sinh => Sinh;
        simd_cosh, par_simd_cosh => Cosh;
        simd_tanh, par_simd_tanh => Tanh;
        simd_asinh, par_simd_asinh => Asinh;
        simd_acosh, par_simd_acosh => Acosh;
        simd_atanh, par_simd_atanh => Atanh;
        simd_erf, par_simd_erf => Erf;
        simd_erfc, par_simd_erfc => Erfc;
    }

    /// `self[i]^e[i]`
    fn simd_pow(&self, e: &[Self::Elem]) -> Result<Vec<Self::Elem>> {
        self.zip_kernel(&Pow, e)
    }

    fn par_simd_pow(&self, e: &[Self::Elem]) -> Result<Vec<Self::Elem>> {
        self.par_zip_kernel(&Pow, e)
    }

    /// `atan2(self[i], x[i])`
    fn simd_atan2(&self, x: &[Self::Elem]) -> Result<Vec<Self::Elem>> {
        self.zip_kernel(&Atan2, x)
    }

    fn par_simd_atan2(&self, x: &[Self::Elem]) -> Result<Vec<Self::Elem>> {
        self.par_zip_kernel(&Atan2, x)
    }
}

/// Whole-slice reductions.
pub trait SimdReduce {
    type Elem: Element;

    fn simd_sum(&self) -> Self::Elem;

    /// Maximum ignoring NaN, `-inf` when empty.
    fn simd_max(&self) -> Self::Elem;

    /// Minimum ignoring NaN, `+inf` when empty.
    fn simd_min(&self) -> Self::Elem;

    /// `(max, min)` in one pass.
    fn simd_maxmin(&self) -> (Self::Elem, Self::Elem);

    /// # Errors
    ///
    /// [`LengthMismatch`](crate::error::LaneMathError::LengthMismatch) when
    /// the slices differ in length.
    fn simd_dot(&self, other: &[Self::Elem]) -> Result<Self::Elem>;

    fn par_simd_sum(&self) -> Self::Elem;

    fn par_simd_dot(&self, other: &[Self::Elem]) -> Result<Self::Elem>;
}
