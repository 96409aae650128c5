//! Bounded quadratic and cubic root solvers.
//!
//! Each solver returns the root of the polynomial that lies in the
//! caller interval `[x1, x2]`, lane by lane. Candidates are computed for
//! every lane and blended with [`Lanes::select`], so lanes that take the
//! trigonometric branch of the cubic and lanes that take Cardano's formula
//! can share one vector.
//!
//! When no candidate lies in the interval the returned value is one of the
//! candidates, without any guarantee about which.

use crate::math::{acos, cbrt, sign, sincos, small};
use crate::simd::{Element, Lanes, Mask};

/// `√3 / 2`
const HALF_SQRT_3: f64 = 0.8660254037844386;

#[inline(always)]
fn in_interval<T: Element, const W: usize>(
    x: Lanes<T, W>,
    x1: Lanes<T, W>,
    x2: Lanes<T, W>,
) -> Mask<W> {
    x.cmp_ge(x1) & x.cmp_le(x2)
}

/// Solves `x² + a·x + b = 0` on `[x1, x2]`.
///
/// Returns `-a/2 + √((a/2)² - b)` if it lies in the interval and the other
/// root otherwise. A negative discriminant gives NaN.
#[inline(always)]
pub fn reduced_quadratic<T: Element, const W: usize>(
    a: Lanes<T, W>,
    b: Lanes<T, W>,
    x1: Lanes<T, W>,
    x2: Lanes<T, W>,
) -> Lanes<T, W> {
    let h = -a * Lanes::constant(0.5);
    let d = (h * h - b).sqrt();
    let plus = h + d;
    Lanes::select(in_interval(plus, x1, x2), plus, h - d)
}

/// Solves `a·x² + b·x + c = 0` on `[x1, x2]`.
///
/// Lanes with `|a| < T::SMALL` solve the linear equation `b·x + c = 0`.
#[inline(always)]
pub fn quadratic<T: Element, const W: usize>(
    a: Lanes<T, W>,
    b: Lanes<T, W>,
    c: Lanes<T, W>,
    x1: Lanes<T, W>,
    x2: Lanes<T, W>,
) -> Lanes<T, W> {
    let linear = -c / b;
    let reduced = reduced_quadratic(b / a, c / a, x1, x2);
    Lanes::select(small(a), linear, reduced)
}

/// Solves `x³ + a·x² + b·x + c = 0` on `[x1, x2]`.
///
/// With `q = (a² - 3b)/9`, `r = (2a³ - 9ab + 27c)/54` and `k2 = r² - q³`:
///
/// * `k2 < 0`: three real roots `-2√q·cos((θ + 2πk)/3) - a/3` with
///   `θ = acos(r/√q³)`. The first one inside the interval wins, checked in
///   the order `k = 0, 1, 2`.
/// * `k2 ≥ 0`: one real root `A + q/A - a/3` with
///   `A = -sign(r)·∛(|r| + √k2)`.
#[inline(always)]
pub fn reduced_cubic<T: Element, const W: usize>(
    a: Lanes<T, W>,
    b: Lanes<T, W>,
    c: Lanes<T, W>,
    x1: Lanes<T, W>,
    x2: Lanes<T, W>,
) -> Lanes<T, W> {
    let zero = Lanes::zero();
    let one = Lanes::one();
    let three = Lanes::constant(3.0);
    let a3 = a / three;

    let q = (a * a - three * b) / Lanes::constant(9.0);
    let r = (Lanes::constant(2.0) * a * a * a - Lanes::constant(9.0) * a * b
        + Lanes::constant(27.0) * c)
        / Lanes::constant(54.0);
    let q3 = q * q * q;
    let k2 = r * r - q3;

    // Three real roots.
    let cos_theta = (r / q3.sqrt()).max(-one).min(one);
    let (s, co) = sincos(acos(cos_theta) / three);
    let half_co = co * Lanes::constant(0.5);
    let s = s * Lanes::constant(HALF_SQRT_3);
    let m = Lanes::constant(-2.0) * q.sqrt();
    let root1 = m * co - a3;
    let root2 = m * (-half_co - s) - a3;
    let root3 = m * (s - half_co) - a3;
    let trig = Lanes::select(in_interval(root2, x1, x2), root2, root3);
    let trig = Lanes::select(in_interval(root1, x1, x2), root1, trig);

    // One real root.
    let big_a = -sign(r) * cbrt(r.abs() + k2.sqrt());
    let big_b = Lanes::select(big_a.cmp_eq(zero), zero, q / big_a);
    let cardano = big_a + big_b - a3;

    Lanes::select(k2.cmp_lt(zero), trig, cardano)
}

/// Solves `a·x³ + b·x² + c·x + d = 0` on `[x1, x2]`.
///
/// Lanes with `|a| < T::SMALL` fall back to [`quadratic`] on `b, c, d`.
#[inline(always)]
pub fn cubic<T: Element, const W: usize>(
    a: Lanes<T, W>,
    b: Lanes<T, W>,
    c: Lanes<T, W>,
    d: Lanes<T, W>,
    x1: Lanes<T, W>,
    x2: Lanes<T, W>,
) -> Lanes<T, W> {
    let degenerate = quadratic(b, c, d, x1, x2);
    let reduced = reduced_cubic(b / a, c / a, d / a, x1, x2);
    Lanes::select(small(a), degenerate, reduced)
}

/// Single-value forms of the solvers, run on one-lane vectors.
pub mod scalar {
    use crate::simd::{Element, Lanes};

    pub fn reduced_quadratic<T: Element>(a: T, b: T, x1: T, x2: T) -> T {
        super::reduced_quadratic(Lanes([a]), Lanes([b]), Lanes([x1]), Lanes([x2])).0[0]
    }

    pub fn quadratic<T: Element>(a: T, b: T, c: T, x1: T, x2: T) -> T {
        super::quadratic(Lanes([a]), Lanes([b]), Lanes([c]), Lanes([x1]), Lanes([x2])).0[0]
    }

    pub fn reduced_cubic<T: Element>(a: T, b: T, c: T, x1: T, x2: T) -> T {
        super::reduced_cubic(Lanes([a]), Lanes([b]), Lanes([c]), Lanes([x1]), Lanes([x2])).0[0]
    }

    pub fn cubic<T: Element>(a: T, b: T, c: T, d: T, x1: T, x2: T) -> T {
        super::cubic(
            Lanes([a]),
            Lanes([b]),
            Lanes([c]),
            Lanes([d]),
            Lanes([x1]),
            Lanes([x2]),
        )
        .0[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::F64x4;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_reduced_quadratic_picks_root_in_interval() {
        // x² - 3x + 2 = (x - 1)(x - 2)
        let a = F64x4::splat(-3.0);
        let b = F64x4::splat(2.0);
        let x1 = F64x4::from_slice(&[0.0, 1.5, 0.0, 1.9]);
        let x2 = F64x4::from_slice(&[1.5, 3.0, 1.1, 2.1]);
        let r = reduced_quadratic(a, b, x1, x2);
        assert_eq!(r.0, [1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_quadratic_degenerates_to_linear() {
        let r = scalar::quadratic(0.0f64, 2.0, -3.0, 0.0, 10.0);
        assert_eq!(r, 1.5);
        let r = scalar::quadratic(2.0f64, -6.0, 4.0, 1.5, 3.0);
        assert_close(r, 2.0, 1e-14);
    }

    #[test]
    fn test_cubic_three_real_roots() {
        // (x - 1)(x - 2)(x - 3)
        let one = F64x4::splat(1.0);
        let a = F64x4::splat(-6.0);
        let b = F64x4::splat(11.0);
        let c = F64x4::splat(-6.0);
        let x1 = F64x4::from_slice(&[0.5, 1.5, 2.5, 0.0]);
        let x2 = F64x4::from_slice(&[1.5, 2.5, 3.5, 10.0]);
        let r = cubic(one, a, b, c, x1, x2);
        assert_close(r.0[0], 1.0, 1e-12);
        assert_close(r.0[1], 2.0, 1e-12);
        assert_close(r.0[2], 3.0, 1e-12);
        assert_close(r.0[3], 1.0, 1e-12);
    }

    #[test]
    fn test_cubic_single_real_root() {
        // (x - 1)(x² + 1)
        let r = scalar::reduced_cubic(-1.0f64, 1.0, -1.0, 0.0, 2.0);
        assert_close(r, 1.0, 1e-14);
        // (x - 1)³
        let r = scalar::reduced_cubic(-3.0f64, 3.0, -1.0, 0.0, 2.0);
        assert_close(r, 1.0, 1e-14);
        // 2x³ + 16 = 0
        let r = scalar::cubic(2.0f64, 0.0, 0.0, 16.0, -5.0, 5.0);
        assert_close(r, -2.0, 1e-14);
    }

    #[test]
    fn test_cubic_degenerates_to_quadratic() {
        let r = scalar::cubic(0.0f32, 1.0, -3.0, 2.0, 1.5, 3.0);
        assert!((r - 2.0).abs() < 1e-6);
    }
}
