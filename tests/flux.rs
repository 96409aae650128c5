//! Flux limiter properties over random slope pairs.

use lanemath::flux::{flux_limiter_by_code, mean, FluxLimiterType};
use lanemath::simd::{F32x8, F64x4};
use lanemath::LaneMathError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Limiters whose graph stays inside the second-order TVD region.
const TVD: [FluxLimiterType; 7] = [
    FluxLimiterType::Superbee,
    FluxLimiterType::Minmod,
    FluxLimiterType::VanLeer,
    FluxLimiterType::VanAlbada,
    FluxLimiterType::Minsuper,
    FluxLimiterType::Supermin,
    FluxLimiterType::MonotonizedCentral,
];

/// Limiters with `ψ(r)/r = ψ(1/r)`.
const SYMMETRIC: [FluxLimiterType; 5] = [
    FluxLimiterType::Superbee,
    FluxLimiterType::Minmod,
    FluxLimiterType::VanLeer,
    FluxLimiterType::VanAlbada,
    FluxLimiterType::MonotonizedCentral,
];

fn random_slopes(rng: &mut StdRng) -> F64x4 {
    F64x4::from_fn(|_| {
        let v: f64 = rng.random_range(1e-3..10.0);
        if rng.random() { v } else { -v }
    })
}

#[test]
fn test_opposite_slopes_are_limited_to_zero() {
    let mut rng = StdRng::seed_from_u64(21);

    for _ in 0..1_000 {
        let d1 = random_slopes(&mut rng);
        let d2 = -d1 * F64x4::from_fn(|_| rng.random_range(0.1..10.0));
        for limiter in FluxLimiterType::ALL {
            let psi = limiter.apply(d1, d2);
            let expected = if limiter == FluxLimiterType::Null { 1.0 } else { 0.0 };
            assert_eq!(psi.0, [expected; 4], "{limiter:?} on d1={:?}", d1.0);
        }
    }
}

#[test]
fn test_limiters_stay_in_tvd_region() {
    let mut rng = StdRng::seed_from_u64(22);

    for _ in 0..2_000 {
        let d1 = random_slopes(&mut rng);
        let d2 = F64x4::from_fn(|i| rng.random_range(1e-2..1e2) * d1.0[i].signum());
        let r = d1 / d2;
        for limiter in TVD {
            let psi = limiter.apply(d1, d2);
            for i in 0..4 {
                let (p, ri) = (psi.0[i], r.0[i]);
                assert!(ri > 0.0);
                assert!(
                    (0.0..=2.0).contains(&p) && p <= 2.0 * ri * (1.0 + 1e-15),
                    "{limiter:?}: psi({ri}) = {p}"
                );
            }
        }
    }
}

#[test]
fn test_equal_slopes_give_one() {
    let d = F64x4::from_slice(&[0.5, -3.0, 1e3, -1e-3]);
    for limiter in FluxLimiterType::ALL {
        let psi = limiter.apply(d, d);
        let expected = if limiter == FluxLimiterType::Total { 0.0 } else { 1.0 };
        for p in psi.0 {
            assert!((p - expected).abs() < 1e-15, "{limiter:?}: {p}");
        }
    }
    assert_eq!(mean(d, d).0, [1.0; 4]);
}

#[test]
fn test_symmetric_limiters() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..500 {
        let r = F64x4::from_fn(|_| rng.random_range(0.05..20.0));
        let one = F64x4::splat(1.0);
        for limiter in SYMMETRIC {
            let lhs = limiter.apply(r, one) / r;
            let rhs = limiter.apply(one, r);
            for i in 0..4 {
                assert!(
                    (lhs.0[i] - rhs.0[i]).abs() < 1e-14,
                    "{limiter:?} at r={}: {} vs {}",
                    r.0[i],
                    lhs.0[i],
                    rhs.0[i]
                );
            }
        }
    }
}

#[test]
fn test_known_values_f32() {
    let d1 = F32x8::from_slice(&[0.5, 1.0, 2.0, 3.0, 0.25, 4.0, 1.5, 0.1]);
    let d2 = F32x8::splat(1.0);
    let cases: [(FluxLimiterType, [f32; 8]); 4] = [
        (FluxLimiterType::Minmod, [0.5, 1.0, 1.0, 1.0, 0.25, 1.0, 1.0, 0.1]),
        (FluxLimiterType::Superbee, [1.0, 1.0, 2.0, 2.0, 0.5, 2.0, 1.5, 0.2]),
        (FluxLimiterType::Supermin, [0.5, 1.0, 2.0, 2.0, 0.25, 2.0, 1.5, 0.1]),
        (FluxLimiterType::MonotonizedCentral, [0.75, 1.0, 1.5, 2.0, 0.5, 2.0, 1.25, 0.2]),
    ];
    for (limiter, expected) in cases {
        let psi = limiter.apply(d1, d2);
        for (p, e) in psi.0.iter().zip(expected) {
            assert!((p - e).abs() < 1e-6, "{limiter:?}: {p} vs {e}");
        }
    }
}

#[test]
fn test_codes() {
    for (i, limiter) in FluxLimiterType::ALL.into_iter().enumerate() {
        assert_eq!(limiter.code(), i as i32);
        assert_eq!(FluxLimiterType::try_from(limiter.code()), Ok(limiter));
    }
    assert_eq!(
        FluxLimiterType::try_from(10),
        Err(LaneMathError::UnknownFluxLimiter { code: 10 })
    );
    assert!(FluxLimiterType::try_from(-1).is_err());

    let d1 = F64x4::from_slice(&[3.0, 1.0, -1.0, 0.5]);
    let d2 = F64x4::splat(1.0);
    assert_eq!(flux_limiter_by_code(42, d1, d2).0, mean(d1, d2).0);
    assert_eq!(flux_limiter_by_code(4, d1, d2).0, [1.0, 1.0, 0.0, 0.5]);
}
