use super::bits::{copysign, frexp, ldexp};
use crate::simd::{Element, Lanes};

/// `cbrt(m)` on `[0.5, 1]`, a (6,6) rational (2.6 ulp in f64).
const CBRT_COEFFS: &[f64] = &[
    0.16771941663177178,
    13.716690448730905,
    156.67104419156144,
    482.26362234184234,
    464.84675046495636,
    130.78297187784378,
    7.17929119461009,
    36.527338653670974,
    260.3289740446394,
    541.5542104092309,
    352.7695792439601,
    61.9296028258362,
    1.518384758839169,
];

const CBRT_2: f64 = 1.2599210498948732;
const CBRT_4: f64 = 1.5874010519681996;

/// Computes the real cube root.
///
/// # Algorithm
///
/// 1. `|x| = m·2^e` with [`frexp`], `m ∈ [0.5, 1)`.
/// 2. `e = 3q + r` with `r ∈ {0, 1, 2}` from exact integer division.
/// 3. `cbrt(|x|) = cbrt(m)·cbrt(2^r)·2^q`, where `cbrt(2^r)` is 1, `∛2` or
///    `∛4` selected per lane and `2^q` is applied with [`ldexp`].
///
/// The sign is restored with [`copysign`]. `±0`, `±inf` and NaN pass
/// through unchanged.
#[inline(always)]
pub fn cbrt<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let (m, e) = frexp(x.abs());

    let zero = Lanes::splat(T::int(0));
    let three = Lanes::splat(T::int(3));
    let r = e % three;
    let r = Lanes::select(r.cmp_lt(zero), r + three, r);
    let q = (e - r) / three;

    let scale = Lanes::select(
        r.cmp_eq(Lanes::splat(T::int(1))),
        Lanes::constant(CBRT_2),
        Lanes::one(),
    );
    let scale = Lanes::select(
        r.cmp_eq(Lanes::splat(T::int(2))),
        Lanes::constant(CBRT_4),
        scale,
    );

    let y = ldexp(m.rational::<6>(CBRT_COEFFS) * scale, q);
    let passthrough = x.cmp_eq(Lanes::zero()) | !x.is_finite();
    Lanes::select(passthrough, x, copysign(y, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::{F32x8, F64x4};

    #[test]
    fn test_cbrt_perfect_cubes() {
        let x = F64x4::from_slice(&[8.0, -27.0, 0.125, 1e-300]);
        let r = cbrt(x);
        let expected = [2.0, -3.0, 0.5, 1e-100];
        for (ri, ei) in r.0.iter().zip(expected) {
            assert!(((ri - ei) / ei).abs() <= 6.0 * f64::EPSILON, "{ri} vs {ei}");
        }
    }

    #[test]
    fn test_cbrt_special_values() {
        let x = F32x8::from_slice(&[
            0.0,
            -0.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            f32::from_bits(1),
            -1.0,
            f32::MAX,
        ]);
        let r = cbrt(x);
        assert_eq!(r.0[0].to_bits(), 0.0f32.to_bits());
        assert_eq!(r.0[1].to_bits(), (-0.0f32).to_bits());
        assert_eq!(r.0[2], f32::INFINITY);
        assert_eq!(r.0[3], f32::NEG_INFINITY);
        assert!(r.0[4].is_nan());
        assert!((r.0[5] / f32::from_bits(1).cbrt() - 1.0).abs() < 4.0 * f32::EPSILON);
        assert!((r.0[6] + 1.0).abs() < 4.0 * f32::EPSILON);
        assert!((r.0[7] / f32::MAX.cbrt() - 1.0).abs() < 4.0 * f32::EPSILON);
    }
}
