//! Error function and its complement.
//!
//! Two approximations cover the real line:
//!
//! * `|x| < 1`: `erf(x) = x·R(x²)`, a (5,5) rational, 2 ulp.
//! * `x ≥ 1`: `erfc(x) = e^(-x²)·(1/x)·S(1/x)`, a (9,9) rational in `1/x`,
//!   5 ulp. `x²` is split into its rounded value and the rounding error so
//!   the exponential keeps full relative accuracy.
//!
//! Everything else follows from symmetry: `erf(-x) = -erf(x)` and
//! `erfc(-x) = 2 - erfc(x)`.

use super::bits::copysign;
use super::exp::exp;
use crate::simd::{Element, Lanes};

const ERF_COEFFS: &[f64] = &[
    1.1283791670955126,
    0.14365680354225926,
    0.04550341233827669,
    0.0018829464405230331,
    0.00019709568986621068,
    8.630884557821683e-08,
    0.46064586065696084,
    0.09387496943313837,
    0.010705312056459117,
    0.0006937408723429294,
    2.0866599008372763e-05,
];

const ERFC_COEFFS: &[f64] = &[
    0.5641895835477563,
    6.597556268315468,
    41.93425608936203,
    173.49576037788205,
    501.0632343324624,
    1021.509605056907,
    1431.09049882984,
    1263.7698348942267,
    545.4713991260951,
    -0.00017739026840316965,
    11.693864014341607,
    74.82653369043256,
    313.3601606069919,
    924.7747259235639,
    1958.4883222222081,
    2944.6841475542633,
    3006.127123765243,
    1879.2753940188834,
    545.4695744668983,
];

#[inline(always)]
fn erf_small<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    x * (x * x).rational::<5>(ERF_COEFFS)
}

/// `erfc(a)` for `a ≥ 1`, flushed to 0 beyond `T::ERFC_CUTOFF`.
#[inline(always)]
fn erfc_large<T: Element, const W: usize>(a: Lanes<T, W>) -> Lanes<T, W> {
    let t = a.recip();
    let s = a * a;
    let delta = a.mul_add(a, -s);
    let r = exp(-s) * (Lanes::one() - delta) * t * t.rational::<9>(ERFC_COEFFS);
    Lanes::select(a.cmp_gt(Lanes::splat(T::ERFC_CUTOFF)), Lanes::zero(), r)
}

/// Computes the error function.
#[inline(always)]
pub fn erf<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let a = x.abs();
    let large = copysign(Lanes::one() - erfc_large(a), x);
    Lanes::select(a.cmp_lt(Lanes::one()), erf_small(x), large)
}

/// Computes the complementary error function `1 - erf(x)`.
///
/// Three regions are blended: `x ≤ -1`, `|x| < 1` and `x ≥ 1`. Only the
/// middle region subtracts from 1, where no cancellation is possible since
/// `erf` stays below `0.85`.
#[inline(always)]
pub fn erfc<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let one = Lanes::one();
    let a = x.abs();
    let big = erfc_large(a);
    let r = Lanes::select(x.cmp_lt(Lanes::zero()), Lanes::constant(2.0) - big, big);
    Lanes::select(a.cmp_lt(one), one - erf_small(x), r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::{F32x8, F64x4};

    #[test]
    fn test_erf_symmetry_and_limits() {
        let x = F64x4::from_slice(&[0.0, -0.0, 30.0, -30.0]);
        let r = erf(x);
        assert_eq!(r.0[0], 0.0);
        assert_eq!(r.0[1].to_bits(), (-0.0f64).to_bits());
        assert_eq!(&r.0[2..], &[1.0, -1.0]);

        let e = erfc(x);
        assert_eq!(&e.0, &[1.0, 1.0, 0.0, 2.0]);
        assert!(erf(Lanes([f64::NAN])).0[0].is_nan());
        assert!(erfc(Lanes([f64::NAN])).0[0].is_nan());
        assert_eq!(erfc(Lanes([f64::INFINITY])).0[0], 0.0);
    }

    #[test]
    fn test_erf_plus_erfc_is_one() {
        let mut x = -6.0f64;
        while x < 6.0 {
            let s = erf(Lanes([x])).0[0] + erfc(Lanes([x])).0[0];
            assert!((s - 1.0).abs() <= 2.0 * f64::EPSILON, "x={x} sum={s}");
            x += 0.0173;
        }
    }

    #[test]
    fn test_erfc_reflects_from_minus_one() {
        let r = erfc(F64x4::from_slice(&[-1.0, -2.0, 1.0, -0.999]));
        assert!((r.0[0] - 1.8427007929497148).abs() <= 2.0 * f64::EPSILON, "{}", r.0[0]);
        assert!((r.0[1] - 1.9953222650189528).abs() <= 2.0 * f64::EPSILON, "{}", r.0[1]);
        assert!((r.0[0] + r.0[2] - 2.0).abs() <= 2.0 * f64::EPSILON);
        assert!(r.0[3] > 1.8 && r.0[3] < r.0[0]);
        assert!((erfc(Lanes([-1.0f32])).0[0] - 1.842_700_8).abs() < 1e-6);
    }

    #[test]
    fn test_erf_f32_tail() {
        let x = F32x8::from_slice(&[-4.0, -2.0, -1.0, -0.5, 0.5, 1.0, 2.0, 10.5]);
        let r = erfc(x);
        assert!(r.0.iter().all(|v| (0.0..=2.0).contains(v)));
        assert_eq!(r.0[7], 0.0);
        assert!((r.0[6] - 0.004_677_735).abs() < 1e-8);
    }
}
