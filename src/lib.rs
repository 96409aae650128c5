//! # lanemath
//!
//! Lane-parallel numeric kernels written once against a portable
//! fixed-width vector, [`Lanes<T, W>`](simd::Lanes), and instantiated for
//! `f32` and `f64` at any width.
//!
//! ## Layers
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`simd`] | `Lanes`, `Mask`, the `Element` trait and slice conveniences |
//! | [`math`] | bit decomposition, polynomial evaluators and transcendentals |
//! | [`roots`] | bounded quadratic and cubic solvers |
//! | [`flux`] | TVD flux limiters selected by code |
//! | [`quadrature`] | Gauss–Legendre rules of order 1 to 10 |
//! | [`array`] | unrolled, prefetching map/reduce/dot pipelines |
//!
//! Numeric kernels never branch per lane: both sides of every case are
//! evaluated and blended with [`Lanes::select`](simd::Lanes::select).
//! Out-of-domain input yields NaN or infinities as IEEE754 prescribes.
//!
//! ## Example
//!
//! ```
//! use lanemath::math::{exp, ln};
//! use lanemath::simd::F64x4;
//!
//! let x = F64x4::from_slice(&[0.5, 1.0, 2.0, 4.0]);
//! let y = exp(ln(x));
//! for (a, b) in x.0.iter().zip(y.0) {
//!     assert!((a - b).abs() < 1e-15 * a);
//! }
//! ```

pub mod array;
pub mod error;
pub mod flux;
pub mod math;
pub mod quadrature;
pub mod roots;
pub mod simd;

pub use error::{LaneMathError, Result};
pub use flux::FluxLimiterType;
pub use quadrature::GaussLegendre;
pub use simd::{Element, F32x8, F64x4, Lanes, Mask};

/// Elements ahead of the current block that pipelines prefetch.
pub const PREFETCH_DISTANCE: usize = 256;

/// Slice length from which pipelines issue prefetch hints.
pub const PREFETCH_THRESHOLD: usize = 16_384;

/// Slice length from which the `par_*` paths use the rayon pool.
pub const PARALLEL_SIMD_THRESHOLD: usize = 262_144;

/// Target elements per rayon task.
pub const PARALLEL_CHUNK_SIZE: usize = 16_384;

/// Default number of vectors processed per unrolled block.
pub const DEFAULT_UNROLL: usize = 4;
