//! Lane abstraction and slice-level conveniences.
//!
//! Every kernel in the crate is written once against [`Lanes<T, W>`] and
//! instantiated at the native width ([`F32x8`], [`F64x4`]) for the bulk of
//! an array and at `W = 1` for the tail.

mod element;
mod lanes;
mod mask;
mod slice;
pub mod traits;

pub use element::{Element, LaneScalar};
pub use lanes::{F32x8, F64x4, Lanes};
pub use mask::Mask;
pub use traits::{SimdMath, SimdReduce};
