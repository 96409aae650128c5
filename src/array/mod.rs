//! Vectorised map, reduce and dot over flat slices.
//!
//! A [`Pipeline`] runs a kernel over a slice with `U`-way unrolled vector
//! blocks, then single vectors, then one-lane vectors for the tail.
//! Kernels are small unit structs implementing [`UnaryKernel`],
//! [`BinaryKernel`] or [`Reduction`]; every function of
//! [`math`](crate::math) has one in [`kernels`].
//!
//! ```
//! use lanemath::array::{kernels::Sin, F32Pipeline};
//!
//! let pipeline = F32Pipeline::new();
//! let mut data = vec![0.5f32; 100];
//! pipeline.map_in_place(&Sin, &mut data);
//! let (max, min) = pipeline.maxmin(&data);
//! assert_eq!(max, min);
//! ```

mod config;
pub mod kernels;
mod parallel;
mod pipeline;

pub use config::PipelineConfig;
pub use kernels::{BinaryKernel, Reduction, UnaryKernel};
pub use pipeline::{F32Pipeline, F64Pipeline, Pipeline};
