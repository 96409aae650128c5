//! Rayon-backed variants of the pipeline entry points.
//!
//! Inputs shorter than `parallel_threshold` run on the calling thread.
//! Longer ones are cut into chunks of whole blocks and each chunk runs the
//! sequential pipeline, so every element sees the same kernel code.

use log::trace;
use rayon::prelude::*;

use super::{BinaryKernel, Pipeline, Reduction, UnaryKernel};
use crate::error::{check_len, Result};
use crate::simd::Element;

impl<T: Element, const W: usize, const U: usize> Pipeline<T, W, U> {
    /// Chunk length for `n` elements, a nonzero multiple of the block.
    fn chunk_len(&self, n: usize) -> usize {
        let chunk = (self.config.parallel_chunk / Self::BLOCK).max(1) * Self::BLOCK;
        trace!(
            "splitting {n} elements into {} chunks of {chunk}",
            n.div_ceil(chunk)
        );
        chunk
    }

    /// Parallel [`map`](Self::map).
    pub fn par_map<K: UnaryKernel<T>>(&self, kernel: &K, src: &[T], dst: &mut [T]) -> Result<()> {
        check_len(src.len(), dst.len())?;
        if !self.config.splits(src.len()) {
            self.map_unchecked(kernel, src, dst);
            return Ok(());
        }
        let chunk = self.chunk_len(src.len());
        dst.par_chunks_mut(chunk)
            .zip(src.par_chunks(chunk))
            .for_each(|(d, s)| self.map_unchecked(kernel, s, d));
        Ok(())
    }

    /// Parallel [`map_in_place`](Self::map_in_place).
    pub fn par_map_in_place<K: UnaryKernel<T>>(&self, kernel: &K, data: &mut [T]) {
        if !self.config.splits(data.len()) {
            return self.map_in_place(kernel, data);
        }
        let chunk = self.chunk_len(data.len());
        data.par_chunks_mut(chunk)
            .for_each(|d| self.map_in_place(kernel, d));
    }

    /// Parallel [`zip_map`](Self::zip_map).
    pub fn par_zip_map<K: BinaryKernel<T>>(
        &self,
        kernel: &K,
        a: &[T],
        b: &[T],
        dst: &mut [T],
    ) -> Result<()> {
        check_len(a.len(), b.len())?;
        check_len(a.len(), dst.len())?;
        if !self.config.splits(a.len()) {
            self.zip_map_unchecked(kernel, a, b, dst);
            return Ok(());
        }
        let chunk = self.chunk_len(a.len());
        dst.par_chunks_mut(chunk)
            .zip(a.par_chunks(chunk))
            .zip(b.par_chunks(chunk))
            .for_each(|((d, sa), sb)| self.zip_map_unchecked(kernel, sa, sb, d));
        Ok(())
    }

    /// Parallel [`reduce`](Self::reduce). Partial results are merged in an
    /// order chosen by rayon.
    pub fn par_reduce<R: Reduction<T>>(&self, reduction: &R, src: &[T]) -> T {
        if !self.config.splits(src.len()) {
            return self.reduce(reduction, src);
        }
        let chunk = self.chunk_len(src.len());
        src.par_chunks(chunk)
            .map(|s| self.reduce(reduction, s))
            .reduce(|| reduction.identity(), |x, y| reduction.merge(x, y))
    }

    pub fn par_sum(&self, src: &[T]) -> T {
        self.par_reduce(&super::kernels::Sum, src)
    }

    /// Parallel [`dot`](Self::dot).
    pub fn par_dot(&self, a: &[T], b: &[T]) -> Result<T> {
        check_len(a.len(), b.len())?;
        if !self.config.splits(a.len()) {
            return Ok(self.dot_unchecked(a, b));
        }
        let chunk = self.chunk_len(a.len());
        Ok(a
            .par_chunks(chunk)
            .zip(b.par_chunks(chunk))
            .map(|(x, y)| self.dot_unchecked(x, y))
            .reduce(T::zero, |x, y| x + y))
    }
}

#[cfg(test)]
mod tests {
    use crate::array::kernels::{Cos, Max, Sub};
    use crate::array::{F32Pipeline, F64Pipeline, PipelineConfig};

    fn small_chunks() -> PipelineConfig {
        PipelineConfig::default()
            .with_parallel_threshold(100)
            .with_parallel_chunk(64)
    }

    #[test]
    fn test_par_map_matches_sequential() {
        let pipeline = F32Pipeline::with_config(small_chunks()).unwrap();
        let x: Vec<f32> = (0..1_001).map(|i| i as f32 * 0.01).collect();
        let mut seq = vec![0.0; x.len()];
        let mut par = vec![0.0; x.len()];
        pipeline.map(&Cos, &x, &mut seq).unwrap();
        pipeline.par_map(&Cos, &x, &mut par).unwrap();
        assert_eq!(seq, par);

        let mut inplace = x.clone();
        pipeline.par_map_in_place(&Cos, &mut inplace);
        assert_eq!(seq, inplace);
    }

    #[test]
    fn test_par_zip_map_and_reductions() {
        let pipeline = F64Pipeline::with_config(small_chunks()).unwrap();
        let a: Vec<f64> = (0..777).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..777).map(|i| (i % 7) as f64).collect();
        let mut out = vec![0.0; a.len()];
        pipeline.par_zip_map(&Sub, &a, &b, &mut out).unwrap();
        assert!(out.iter().zip(a.iter().zip(&b)).all(|(o, (x, y))| *o == x - y));

        assert_eq!(pipeline.par_sum(&a), 776.0 * 777.0 / 2.0);
        assert_eq!(pipeline.par_reduce(&Max, &b), 6.0);
        let naive: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        assert_eq!(pipeline.par_dot(&a, &b).unwrap(), naive);
        assert!(pipeline.par_dot(&a, &b[1..]).is_err());
    }
}
