//! TVD flux limiters for finite-volume schemes.
//!
//! Every limiter takes the two consecutive differences `d1` and `d2` of a
//! reconstruction and returns the limiter value `ψ(r)` with `r = d1/d2`.
//! Apart from [`total`] and [`null`], a limiter is 0 wherever
//! `d1·d2 ≤ T::SMALL`: the differences disagree in sign or vanish, so there
//! is no monotone slope to keep.
//!
//! Host code selects a limiter by integer code through
//! [`FluxLimiterType`]:
//!
//! ```
//! use lanemath::flux::FluxLimiterType;
//! use lanemath::simd::F64x4;
//!
//! let limiter = FluxLimiterType::try_from(5).unwrap();
//! assert_eq!(limiter, FluxLimiterType::VanLeer);
//!
//! let d1 = F64x4::from_slice(&[1.0, 2.0, -1.0, 0.5]);
//! let d2 = F64x4::splat(1.0);
//! let psi = limiter.apply(d1, d2);
//! assert_eq!(psi.0[2], 0.0);
//! ```

use log::warn;

use crate::error::{unknown_flux_limiter, LaneMathError};
use crate::simd::{Element, Lanes};

/// Flux limiter selector with its host code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FluxLimiterType {
    /// Always 0, first-order upwind.
    Total = 0,
    /// Always 1, unlimited second order.
    Null = 1,
    /// `r`
    Centred = 2,
    Superbee = 3,
    Minmod = 4,
    VanLeer = 5,
    VanAlbada = 6,
    /// `min(2r, 1)`
    Minsuper = 7,
    /// `min(r, 2)`
    Supermin = 8,
    MonotonizedCentral = 9,
}

impl FluxLimiterType {
    /// Every limiter, in code order.
    pub const ALL: [FluxLimiterType; 10] = [
        FluxLimiterType::Total,
        FluxLimiterType::Null,
        FluxLimiterType::Centred,
        FluxLimiterType::Superbee,
        FluxLimiterType::Minmod,
        FluxLimiterType::VanLeer,
        FluxLimiterType::VanAlbada,
        FluxLimiterType::Minsuper,
        FluxLimiterType::Supermin,
        FluxLimiterType::MonotonizedCentral,
    ];

    /// Host code of the limiter.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Evaluates the limiter lane-wise.
    #[inline(always)]
    pub fn apply<T: Element, const W: usize>(self, d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
        match self {
            FluxLimiterType::Total => total(d1, d2),
            FluxLimiterType::Null => null(d1, d2),
            FluxLimiterType::Centred => centred(d1, d2),
            FluxLimiterType::Superbee => superbee(d1, d2),
            FluxLimiterType::Minmod => minmod(d1, d2),
            FluxLimiterType::VanLeer => van_leer(d1, d2),
            FluxLimiterType::VanAlbada => van_albada(d1, d2),
            FluxLimiterType::Minsuper => minsuper(d1, d2),
            FluxLimiterType::Supermin => supermin(d1, d2),
            FluxLimiterType::MonotonizedCentral => monotonized_central(d1, d2),
        }
    }

    /// Evaluates the limiter on a single pair of differences.
    pub fn apply_scalar<T: Element>(self, d1: T, d2: T) -> T {
        self.apply(Lanes([d1]), Lanes([d2])).0[0]
    }
}

impl TryFrom<i32> for FluxLimiterType {
    type Error = LaneMathError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| unknown_flux_limiter(code))
    }
}

/// Runs `psi(r)` where the slopes agree and returns 0 elsewhere.
#[inline(always)]
fn limited<T: Element, const W: usize>(
    d1: Lanes<T, W>,
    d2: Lanes<T, W>,
    psi: impl FnOnce(Lanes<T, W>) -> Lanes<T, W>,
) -> Lanes<T, W> {
    let monotone = (d1 * d2).cmp_gt(Lanes::splat(T::SMALL));
    Lanes::select(monotone, psi(d1 / d2), Lanes::zero())
}

#[inline(always)]
pub fn total<T: Element, const W: usize>(_d1: Lanes<T, W>, _d2: Lanes<T, W>) -> Lanes<T, W> {
    Lanes::zero()
}

#[inline(always)]
pub fn null<T: Element, const W: usize>(_d1: Lanes<T, W>, _d2: Lanes<T, W>) -> Lanes<T, W> {
    Lanes::one()
}

/// `d1/d2`, guarded against a vanishing `d2`.
#[inline(always)]
pub fn centred<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| r)
}

/// `max(min(2r, 1), min(r, 2))`
#[inline(always)]
pub fn superbee<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| {
        let one = Lanes::one();
        let two = Lanes::constant(2.0);
        (r * two).min(one).max(r.min(two))
    })
}

/// `min(r, 1)`
#[inline(always)]
pub fn minmod<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| r.min(Lanes::one()))
}

/// `2r / (1 + r)`
#[inline(always)]
pub fn van_leer<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| (r + r) / (Lanes::one() + r))
}

/// `(r² + r) / (r² + 1)`
#[inline(always)]
pub fn van_albada<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| {
        let r2 = r * r;
        (r2 + r) / (r2 + Lanes::one())
    })
}

#[inline(always)]
pub fn minsuper<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| (r + r).min(Lanes::one()))
}

#[inline(always)]
pub fn supermin<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| r.min(Lanes::constant(2.0)))
}

/// `min(2r, (1 + r)/2, 2)`
#[inline(always)]
pub fn monotonized_central<T: Element, const W: usize>(
    d1: Lanes<T, W>,
    d2: Lanes<T, W>,
) -> Lanes<T, W> {
    limited(d1, d2, |r| {
        let centre = (Lanes::one() + r) * Lanes::constant(0.5);
        (r + r).min(centre).min(Lanes::constant(2.0))
    })
}

/// `(1 + r)/2`, the fallback for unrecognised codes.
#[inline(always)]
pub fn mean<T: Element, const W: usize>(d1: Lanes<T, W>, d2: Lanes<T, W>) -> Lanes<T, W> {
    limited(d1, d2, |r| (Lanes::one() + r) * Lanes::constant(0.5))
}

/// Evaluates the limiter selected by a raw host code.
///
/// Unknown codes fall back to [`mean`] instead of failing, matching how
/// solver configurations treat an unset limiter. Use
/// [`FluxLimiterType::try_from`] to reject them instead.
pub fn flux_limiter_by_code<T: Element, const W: usize>(
    code: i32,
    d1: Lanes<T, W>,
    d2: Lanes<T, W>,
) -> Lanes<T, W> {
    match FluxLimiterType::try_from(code) {
        Ok(limiter) => limiter.apply(d1, d2),
        Err(_) => {
            warn!("flux limiter code {code} unknown, using mean");
            mean(d1, d2)
        }
    }
}
