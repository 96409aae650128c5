//! Gauss–Legendre rules: exactness on polynomials and convergence on
//! smooth integrands.

use lanemath::math::{exp, polynomial, sin};
use lanemath::simd::{F32x8, F64x4, Lanes};
use lanemath::{GaussLegendre, LaneMathError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_rules_are_exact_up_to_their_degree() {
    for rule in GaussLegendre::ALL {
        let n = rule.order();
        for degree in 0..2 * n {
            let got = rule.integrate_scalar(|x: f64| x.powi(degree as i32), 0.0, 1.0);
            let expected = 1.0 / (degree as f64 + 1.0);
            assert!(
                ((got - expected) / expected).abs() < 1e-14,
                "order {n}, degree {degree}: {got} vs {expected}"
            );
        }
    }
}

#[test]
fn test_rules_are_not_exact_beyond_their_degree() {
    for rule in GaussLegendre::ALL {
        let degree = 2 * rule.order() as i32;
        let got = rule.integrate_scalar(|x: f64| x.powi(degree), -1.0, 1.0);
        let expected = 2.0 / (degree as f64 + 1.0);
        assert!((got - expected).abs() > 1e-6, "order {}", rule.order());
    }
}

#[test]
fn test_constants_integrate_to_their_area() {
    let mut rng = StdRng::seed_from_u64(50);

    for rule in GaussLegendre::ALL {
        let k = F64x4::from_fn(|_| rng.random_range(-5.0..5.0));
        let x1 = F64x4::from_fn(|_| rng.random_range(-10.0..10.0));
        let x2 = F64x4::from_fn(|_| rng.random_range(-10.0..10.0));
        let r = rule.integrate(|_| k, x1, x2);
        let expected = k * (x2 - x1);
        for i in 0..4 {
            assert!(
                (r.0[i] - expected.0[i]).abs() <= 1e-13 * expected.0[i].abs().max(1.0),
                "order {}: {} vs {}",
                rule.order(),
                r.0[i],
                expected.0[i]
            );
        }
    }
}

#[test]
fn test_per_lane_intervals() {
    let mut rng = StdRng::seed_from_u64(51);
    // 1 + 2x - x² + 0.5x³
    let coeffs = [1.0, 2.0, -1.0, 0.5];
    let antiderivative = |x: f64| x + x * x - x * x * x / 3.0 + x.powi(4) / 8.0;

    for _ in 0..500 {
        let x1 = F64x4::from_fn(|_| rng.random_range(-3.0..3.0));
        let x2 = F64x4::from_fn(|_| rng.random_range(-3.0..3.0));
        let r = GaussLegendre::N2.integrate(|x| polynomial(x, &coeffs), x1, x2);
        for i in 0..4 {
            let expected = antiderivative(x2.0[i]) - antiderivative(x1.0[i]);
            assert!(
                (r.0[i] - expected).abs() < 1e-12 * expected.abs().max(1.0),
                "[{}, {}]: {} vs {expected}",
                x1.0[i],
                x2.0[i],
                r.0[i]
            );
        }
    }
}

#[test]
fn test_convergence_on_smooth_integrands() {
    let x1 = F64x4::from_slice(&[0.0, 0.0, -1.0, 1.0]);
    let x2 = F64x4::from_slice(&[std::f64::consts::PI, 1.0, 1.0, 0.0]);
    let expected_sin = 2.0;
    let expected_exp = [std::f64::consts::E - 1.0, std::f64::consts::E - 1.0 / std::f64::consts::E];

    let r = GaussLegendre::N10.integrate(sin, x1, x2);
    assert!((r.0[0] - expected_sin).abs() < 1e-14, "{}", r.0[0]);
    assert!((r.0[2]).abs() < 1e-15, "odd integrand: {}", r.0[2]);
    // Reversed bounds flip the sign.
    assert!((r.0[3] + r.0[1]).abs() < 1e-15);

    let r = GaussLegendre::N10.integrate(exp, x1, x2);
    assert!((r.0[1] - expected_exp[0]).abs() < 1e-14, "{}", r.0[1]);
    assert!((r.0[2] - expected_exp[1]).abs() < 1e-14, "{}", r.0[2]);

    let errors: Vec<f64> = GaussLegendre::ALL
        .iter()
        .map(|rule| (rule.integrate(sin, Lanes([0.0]), Lanes([3.0])).0[0] - (1.0 - 3f64.cos())).abs())
        .collect();
    assert!(errors[9] < errors[3] && errors[3] < errors[0], "{errors:?}");
}

#[test]
fn test_single_precision() {
    let x1 = F32x8::splat(0.0);
    let x2 = F32x8::from_fn(|i| i as f32 + 1.0);
    let r = GaussLegendre::N3.integrate(|x| x * x, x1, x2);
    for i in 0..8 {
        let b = x2.0[i];
        assert!((r.0[i] - b * b * b / 3.0).abs() < 1e-5 * b * b * b, "lane {i}: {}", r.0[i]);
    }
}

#[test]
fn test_order_lookup() {
    assert_eq!(GaussLegendre::of_order(4), Ok(GaussLegendre::N4));
    assert_eq!(GaussLegendre::of_order(10).map(|r| r.order()), Ok(10));
    assert_eq!(
        GaussLegendre::of_order(0),
        Err(LaneMathError::UnsupportedQuadratureOrder { order: 0 })
    );
    assert!(GaussLegendre::of_order(11).is_err());

    for rule in GaussLegendre::ALL {
        let total: f64 = rule
            .abscissas()
            .iter()
            .zip(rule.weights())
            .map(|(&x, &w)| if x == 0.0 { w } else { 2.0 * w })
            .sum();
        assert!((total - 2.0).abs() < 1e-14, "order {} weights sum to {total}", rule.order());
    }
}
