//! Horner and rational evaluators shared by every approximation.
//!
//! Coefficients are plain `f64` tables in ascending degree. Each one is
//! rounded to the element type and broadcast when it is consumed, so a
//! single table serves both precisions.

use crate::simd::{Element, Lanes};

/// Evaluates `c[0] + c[1]·x + … + c[d]·x^d` by Horner's rule.
///
/// An empty table evaluates to 0.
#[inline(always)]
pub fn polynomial<T: Element, const W: usize>(x: Lanes<T, W>, c: &[f64]) -> Lanes<T, W> {
    let Some((&last, rest)) = c.split_last() else {
        return Lanes::zero();
    };
    rest.iter()
        .rev()
        .fold(Lanes::constant(last), |r, &ci| r * x + Lanes::constant(ci))
}

impl<T: Element, const W: usize> Lanes<T, W> {
    /// Method form of [`polynomial`].
    #[inline(always)]
    pub fn polynomial(self, c: &[f64]) -> Self {
        polynomial(self, c)
    }

    /// Evaluates `P(x) / (x·Q(x) + 1)` with a numerator of degree `N`.
    ///
    /// `c` holds the `N + 1` numerator coefficients followed by the
    /// denominator coefficients with the constant term omitted, both
    /// ascending. The denominator degree is therefore `c.len() - N - 1`.
    ///
    /// ```
    /// use lanemath::simd::Lanes;
    ///
    /// // (1 + x) / (1 + x + x²) at x = 2
    /// let r = Lanes([2.0f64]).rational::<1>(&[1.0, 1.0, 1.0, 1.0]);
    /// assert_eq!(r.0[0], 3.0 / 7.0);
    /// ```
    #[inline(always)]
    pub fn rational<const N: usize>(self, c: &[f64]) -> Self {
        debug_assert!(c.len() > N, "rational table shorter than its numerator");
        let (num, den) = c.split_at(N + 1);
        let p = polynomial(self, num);
        if den.is_empty() {
            return p;
        }
        p / (self * polynomial(self, den) + Self::one())
    }
}
