//! Lane-wise elementary functions.
//!
//! Every function takes and returns [`Lanes<T, W>`](crate::simd::Lanes) for
//! any [`Element`](crate::simd::Element) and any width, never branches per
//! lane and never panics on numeric input: out-of-domain arguments give
//! NaN, overflow gives infinities, exactly as the IEEE754 scalar functions
//! do.
//!
//! # Function Reference
//!
//! | Function | Domain | Max error (f64) |
//! |----------|--------|-----------------|
//! | `cbrt` | all reals | 3.3 ulp |
//! | `exp`, `exp2`, `exp10`, `expm1` | all reals | 2 ulp |
//! | `log2`, `ln`, `log10`, `log1p` | `[0, +∞]` | 3 ulp |
//! | `pow` | see [`pow`] | grows with `|e·log2 x|` |
//! | `sin`, `cos`, `tan`, `sincos` | `|x| < 2^24·π/2` | 2 ulp absolute |
//! | `atan`, `atan2`, `asin`, `acos` | all reals / `[-1, 1]` | 3 ulp |
//! | `sinh`, `cosh`, `tanh` | all reals | 3 ulp |
//! | `asinh`, `acosh`, `atanh` | reals / `[1, ∞)` / `[-1, 1]` | 3 ulp |
//! | `erf`, `erfc` | all reals | 5 ulp |

pub mod bits;
mod cbrt;
mod erf;
mod exp;
mod hyperbolic;
mod log;
pub mod poly;
mod pow;
mod trig;

pub use bits::{abs, copysign, exp2n, frexp, ldexp, modmin, sign, sign_bit, small};
pub use cbrt::cbrt;
pub use erf::{erf, erfc};
pub use exp::{exp, exp10, exp2, expm1};
pub use hyperbolic::{acosh, asinh, atanh, cosh, sinh, tanh};
pub use log::{ln, log10, log1p, log2};
pub use poly::polynomial;
pub use pow::{pow, pown};
pub use trig::{acos, asin, atan, atan2, cos, sin, sincos, tan};
