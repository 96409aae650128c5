//! Fixed-order Gauss–Legendre quadrature over per-lane intervals.
//!
//! Tables store the non-negative abscissas on `[-1, 1]` in ascending order
//! with their weights. Each positive abscissa stands for the symmetric
//! pair `±ξ`; a zero abscissa (odd orders) is evaluated once.

use crate::error::{unsupported_order, Result};
use crate::simd::{Element, Lanes};

/// Abscissas and weights of one Gauss–Legendre rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussLegendre {
    order: usize,
    abscissas: &'static [f64],
    weights: &'static [f64],
}

impl GaussLegendre {
    pub const N1: GaussLegendre = GaussLegendre {
        order: 1,
        abscissas: &[0.0],
        weights: &[2.0],
    };

    pub const N2: GaussLegendre = GaussLegendre {
        order: 2,
        abscissas: &[0.5773502691896257],
        weights: &[1.0],
    };

    pub const N3: GaussLegendre = GaussLegendre {
        order: 3,
        abscissas: &[0.0, 0.7745966692414834],
        weights: &[0.8888888888888888, 0.5555555555555556],
    };

    pub const N4: GaussLegendre = GaussLegendre {
        order: 4,
        abscissas: &[0.33998104358485626, 0.8611363115940526],
        weights: &[0.6521451548625461, 0.34785484513745385],
    };

    pub const N5: GaussLegendre = GaussLegendre {
        order: 5,
        abscissas: &[0.0, 0.5384693101056831, 0.906179845938664],
        weights: &[0.5688888888888889, 0.47862867049936647, 0.23692688505618908],
    };

    pub const N6: GaussLegendre = GaussLegendre {
        order: 6,
        abscissas: &[0.2386191860831969, 0.6612093864662645, 0.932469514203152],
        weights: &[0.46791393457269104, 0.3607615730481386, 0.17132449237917036],
    };

    pub const N7: GaussLegendre = GaussLegendre {
        order: 7,
        abscissas: &[
            0.0,
            0.4058451513773972,
            0.7415311855993945,
            0.9491079123427585,
        ],
        weights: &[
            0.4179591836734694,
            0.3818300505051189,
            0.27970539148927664,
            0.1294849661688697,
        ],
    };

    pub const N8: GaussLegendre = GaussLegendre {
        order: 8,
        abscissas: &[
            0.1834346424956498,
            0.525532409916329,
            0.7966664774136267,
            0.9602898564975363,
        ],
        weights: &[
            0.362683783378362,
            0.31370664587788727,
            0.22238103445337448,
            0.10122853629037626,
        ],
    };

    pub const N9: GaussLegendre = GaussLegendre {
        order: 9,
        abscissas: &[
            0.0,
            0.3242534234038089,
            0.6133714327005904,
            0.8360311073266358,
            0.9681602395076261,
        ],
        weights: &[
            0.3302393550012598,
            0.31234707704000286,
            0.26061069640293544,
            0.1806481606948574,
            0.08127438836157441,
        ],
    };

    pub const N10: GaussLegendre = GaussLegendre {
        order: 10,
        abscissas: &[
            0.14887433898163122,
            0.4333953941292472,
            0.6794095682990244,
            0.8650633666889845,
            0.9739065285171717,
        ],
        weights: &[
            0.29552422471475287,
            0.26926671930999635,
            0.21908636251598204,
            0.1494513491505806,
            0.06667134430868814,
        ],
    };

    /// Every built-in rule, indexed by `order - 1`.
    pub const ALL: [GaussLegendre; 10] = [
        Self::N1,
        Self::N2,
        Self::N3,
        Self::N4,
        Self::N5,
        Self::N6,
        Self::N7,
        Self::N8,
        Self::N9,
        Self::N10,
    ];

    /// Looks up the rule with `order` points.
    ///
    /// # Errors
    ///
    /// [`UnsupportedQuadratureOrder`](crate::error::LaneMathError::UnsupportedQuadratureOrder)
    /// unless `1 <= order <= 10`.
    pub fn of_order(order: usize) -> Result<Self> {
        order
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| unsupported_order(order))
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Non-negative abscissas, ascending.
    pub fn abscissas(&self) -> &'static [f64] {
        self.abscissas
    }

    pub fn weights(&self) -> &'static [f64] {
        self.weights
    }

    /// Integrates `f` over `[x1, x2]`, each lane with its own interval.
    ///
    /// `f` is called once per abscissa with all lanes mapped into their
    /// interval. The result is exact for polynomials of degree up to
    /// `2·order - 1`.
    #[inline]
    pub fn integrate<T, const W: usize, F>(&self, f: F, x1: Lanes<T, W>, x2: Lanes<T, W>) -> Lanes<T, W>
    where
        T: Element,
        F: Fn(Lanes<T, W>) -> Lanes<T, W>,
    {
        let half = Lanes::constant(0.5);
        let mid = (x1 + x2) * half;
        let radius = (x2 - x1) * half;

        let sum = self
            .abscissas
            .iter()
            .zip(self.weights)
            .fold(Lanes::zero(), |sum, (&xi, &w)| {
                let w = Lanes::constant(w);
                if xi == 0.0 {
                    return w.mul_add(f(mid), sum);
                }
                let d = radius * Lanes::constant(xi);
                w.mul_add(f(mid + d) + f(mid - d), sum)
            });
        sum * radius
    }

    /// Integrates a scalar function over `[x1, x2]`.
    pub fn integrate_scalar<T: Element>(&self, f: impl Fn(T) -> T, x1: T, x2: T) -> T {
        self.integrate(|x: Lanes<T, 1>| x.map(&f), Lanes([x1]), Lanes([x2]))
            .0[0]
    }
}
