use std::array;
use std::marker::PhantomData;

use log::debug;

use super::{BinaryKernel, PipelineConfig, Reduction, UnaryKernel};
use crate::error::{check_len, Result};
use crate::simd::{Element, Lanes};

/// Drives kernels over slices in three tiers.
///
/// 1. Blocks of `U` vectors of `W` lanes, loaded together so the `U`
///    kernel evaluations are independent. Long inputs also prefetch
///    `prefetch_distance` elements ahead.
/// 2. Single vectors for what remains of the last block.
/// 3. One-lane vectors for the final `n % W` elements.
///
/// Every tier runs the same kernel, so results do not depend on where an
/// element falls except for the association order of reductions.
///
/// ```
/// use lanemath::array::{kernels::Exp, F64Pipeline};
///
/// let x: Vec<f64> = (0..37).map(|i| i as f64 * 0.1).collect();
/// let mut y = vec![0.0; x.len()];
/// F64Pipeline::new().map(&Exp, &x, &mut y).unwrap();
/// assert!((y[10] - 1f64.exp()).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Pipeline<T, const W: usize, const U: usize = { crate::DEFAULT_UNROLL }> {
    pub(crate) config: PipelineConfig,
    _marker: PhantomData<T>,
}

/// Eight `f32` lanes, unrolled four times.
pub type F32Pipeline = Pipeline<f32, 8>;
/// Four `f64` lanes, unrolled four times.
pub type F64Pipeline = Pipeline<f64, 4>;

impl<T: Element, const W: usize, const U: usize> Default for Pipeline<T, W, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, const W: usize, const U: usize> Pipeline<T, W, U> {
    /// Elements per unrolled block.
    pub const BLOCK: usize = {
        assert!(W > 0 && U > 0, "lane width and unroll factor must be nonzero");
        W * U
    };

    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Builds a pipeline with custom tuning.
    ///
    /// # Errors
    ///
    /// Fails when `config` does not pass [`PipelineConfig::validate`].
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        debug!("pipeline with {W} lanes x {U} unroll: {config:?}");
        Ok(Self {
            config,
            _marker: PhantomData,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Lengths covered by tiers 1 and 1+2.
    #[inline(always)]
    fn split(n: usize) -> (usize, usize) {
        (n - n % Self::BLOCK, n - n % W)
    }

    /// Writes `kernel(src[i])` to `dst[i]`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](crate::error::LaneMathError::LengthMismatch) when
    /// `dst` and `src` differ in length.
    pub fn map<K: UnaryKernel<T>>(&self, kernel: &K, src: &[T], dst: &mut [T]) -> Result<()> {
        check_len(src.len(), dst.len())?;
        self.map_unchecked(kernel, src, dst);
        Ok(())
    }

    pub(crate) fn map_unchecked<K: UnaryKernel<T>>(&self, kernel: &K, src: &[T], dst: &mut [T]) {
        let (blocked, vectored) = Self::split(src.len());
        let prefetch = self.config.prefetches(src.len());

        let blocks = src[..blocked].chunks_exact(Self::BLOCK);
        for (i, (s, d)) in blocks.zip(dst[..blocked].chunks_exact_mut(Self::BLOCK)).enumerate() {
            if prefetch {
                prefetch_read(src, i * Self::BLOCK + self.config.prefetch_distance);
            }
            let x: [Lanes<T, W>; U] = array::from_fn(|u| Lanes::from_slice(&s[u * W..]));
            for (u, y) in x.map(|v| kernel.apply(v)).into_iter().enumerate() {
                y.store(&mut d[u * W..]);
            }
        }

        let rest = src[blocked..vectored].chunks_exact(W);
        for (s, d) in rest.zip(dst[blocked..vectored].chunks_exact_mut(W)) {
            kernel.apply(Lanes::<T, W>::from_slice(s)).store(d);
        }

        for (s, d) in src[vectored..].iter().zip(&mut dst[vectored..]) {
            *d = kernel.apply(Lanes([*s])).0[0];
        }
    }

    /// Replaces every element with `kernel(data[i])`.
    pub fn map_in_place<K: UnaryKernel<T>>(&self, kernel: &K, data: &mut [T]) {
        let (blocked, vectored) = Self::split(data.len());
        let prefetch = self.config.prefetches(data.len());

        for start in (0..blocked).step_by(Self::BLOCK) {
            if prefetch {
                prefetch_read(data, start + self.config.prefetch_distance);
            }
            let d = &mut data[start..start + Self::BLOCK];
            let x: [Lanes<T, W>; U] = array::from_fn(|u| Lanes::from_slice(&d[u * W..]));
            for (u, y) in x.map(|v| kernel.apply(v)).into_iter().enumerate() {
                y.store(&mut d[u * W..]);
            }
        }

        for d in data[blocked..vectored].chunks_exact_mut(W) {
            kernel.apply(Lanes::<T, W>::from_slice(d)).store(d);
        }

        for d in &mut data[vectored..] {
            *d = kernel.apply(Lanes([*d])).0[0];
        }
    }

    /// Writes `kernel(a[i], b[i])` to `dst[i]`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](crate::error::LaneMathError::LengthMismatch)
    /// unless `a`, `b` and `dst` have the same length.
    pub fn zip_map<K: BinaryKernel<T>>(&self, kernel: &K, a: &[T], b: &[T], dst: &mut [T]) -> Result<()> {
        check_len(a.len(), b.len())?;
        check_len(a.len(), dst.len())?;
        self.zip_map_unchecked(kernel, a, b, dst);
        Ok(())
    }

    pub(crate) fn zip_map_unchecked<K: BinaryKernel<T>>(&self, kernel: &K, a: &[T], b: &[T], dst: &mut [T]) {
        let (blocked, vectored) = Self::split(a.len());
        let prefetch = self.config.prefetches(a.len());

        let blocks = a[..blocked]
            .chunks_exact(Self::BLOCK)
            .zip(b[..blocked].chunks_exact(Self::BLOCK))
            .zip(dst[..blocked].chunks_exact_mut(Self::BLOCK));
        for (i, ((sa, sb), d)) in blocks.enumerate() {
            if prefetch {
                let ahead = i * Self::BLOCK + self.config.prefetch_distance;
                prefetch_read(a, ahead);
                prefetch_read(b, ahead);
            }
            let x: [Lanes<T, W>; U] = array::from_fn(|u| Lanes::from_slice(&sa[u * W..]));
            let y: [Lanes<T, W>; U] = array::from_fn(|u| Lanes::from_slice(&sb[u * W..]));
            for u in 0..U {
                kernel.apply(x[u], y[u]).store(&mut d[u * W..]);
            }
        }

        let rest = a[blocked..vectored]
            .chunks_exact(W)
            .zip(b[blocked..vectored].chunks_exact(W))
            .zip(dst[blocked..vectored].chunks_exact_mut(W));
        for ((sa, sb), d) in rest {
            kernel
                .apply(Lanes::<T, W>::from_slice(sa), Lanes::from_slice(sb))
                .store(d);
        }

        let tail = a[vectored..].iter().zip(&b[vectored..]).zip(&mut dst[vectored..]);
        for ((&x, &y), d) in tail {
            *d = kernel.apply(Lanes([x]), Lanes([y])).0[0];
        }
    }

    /// Writes `kernel(a[i], s)` to `dst[i]`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](crate::error::LaneMathError::LengthMismatch) when
    /// `dst` and `a` differ in length.
    pub fn map_scalar<K: BinaryKernel<T>>(&self, kernel: &K, a: &[T], s: T, dst: &mut [T]) -> Result<()> {
        check_len(a.len(), dst.len())?;
        self.map_unchecked(&WithScalar { kernel, s }, a, dst);
        Ok(())
    }

    /// Folds `src` with `U` independent accumulators.
    ///
    /// The accumulators are combined before the horizontal step, so the
    /// result may differ from a sequential fold in the last bits.
    pub fn reduce<R: Reduction<T>>(&self, reduction: &R, src: &[T]) -> T {
        let (blocked, vectored) = Self::split(src.len());
        let prefetch = self.config.prefetches(src.len());
        let identity = Lanes::<T, W>::splat(reduction.identity());

        let mut acc = [identity; U];
        for (i, s) in src[..blocked].chunks_exact(Self::BLOCK).enumerate() {
            if prefetch {
                prefetch_read(src, i * Self::BLOCK + self.config.prefetch_distance);
            }
            for (u, a) in acc.iter_mut().enumerate() {
                *a = reduction.combine(*a, Lanes::from_slice(&s[u * W..]));
            }
        }

        let mut v = acc.into_iter().fold(identity, |x, y| reduction.combine(x, y));
        for s in src[blocked..vectored].chunks_exact(W) {
            v = reduction.combine(v, Lanes::from_slice(s));
        }

        let tail = src[vectored..]
            .iter()
            .fold(Lanes([reduction.identity()]), |x, &y| reduction.combine(x, Lanes([y])));
        reduction.merge(reduction.finish(v), tail.0[0])
    }

    pub fn sum(&self, src: &[T]) -> T {
        self.reduce(&super::kernels::Sum, src)
    }

    /// Maximum ignoring NaN, `-inf` when `src` is empty.
    pub fn max(&self, src: &[T]) -> T {
        self.reduce(&super::kernels::Max, src)
    }

    /// Minimum ignoring NaN, `+inf` when `src` is empty.
    pub fn min(&self, src: &[T]) -> T {
        self.reduce(&super::kernels::Min, src)
    }

    /// `(max, min)` in a single pass.
    pub fn maxmin(&self, src: &[T]) -> (T, T) {
        let (blocked, vectored) = Self::split(src.len());
        let prefetch = self.config.prefetches(src.len());
        let lo = Lanes::<T, W>::splat(T::infinity());
        let hi = Lanes::<T, W>::splat(T::neg_infinity());

        let mut acc_hi = [hi; U];
        let mut acc_lo = [lo; U];
        for (i, s) in src[..blocked].chunks_exact(Self::BLOCK).enumerate() {
            if prefetch {
                prefetch_read(src, i * Self::BLOCK + self.config.prefetch_distance);
            }
            for u in 0..U {
                let x = Lanes::from_slice(&s[u * W..]);
                acc_hi[u] = acc_hi[u].max(x);
                acc_lo[u] = acc_lo[u].min(x);
            }
        }

        let mut v_hi = acc_hi.into_iter().fold(hi, Lanes::max);
        let mut v_lo = acc_lo.into_iter().fold(lo, Lanes::min);
        for s in src[blocked..vectored].chunks_exact(W) {
            let x = Lanes::from_slice(s);
            v_hi = v_hi.max(x);
            v_lo = v_lo.min(x);
        }

        src[vectored..]
            .iter()
            .fold((v_hi.reduce_max(), v_lo.reduce_min()), |(h, l), &x| (h.max(x), l.min(x)))
    }

    /// `Σ a[i]·b[i]` with fused multiply-adds.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](crate::error::LaneMathError::LengthMismatch) when
    /// `a` and `b` differ in length.
    pub fn dot(&self, a: &[T], b: &[T]) -> Result<T> {
        check_len(a.len(), b.len())?;
        Ok(self.dot_unchecked(a, b))
    }

    pub(crate) fn dot_unchecked(&self, a: &[T], b: &[T]) -> T {
        let (blocked, vectored) = Self::split(a.len());
        let prefetch = self.config.prefetches(a.len());

        let mut acc = [Lanes::<T, W>::zero(); U];
        let blocks = a[..blocked]
            .chunks_exact(Self::BLOCK)
            .zip(b[..blocked].chunks_exact(Self::BLOCK));
        for (i, (sa, sb)) in blocks.enumerate() {
            if prefetch {
                let ahead = i * Self::BLOCK + self.config.prefetch_distance;
                prefetch_read(a, ahead);
                prefetch_read(b, ahead);
            }
            for (u, s) in acc.iter_mut().enumerate() {
                let x = Lanes::from_slice(&sa[u * W..]);
                *s = x.mul_add(Lanes::from_slice(&sb[u * W..]), *s);
            }
        }

        let mut v = acc.into_iter().fold(Lanes::zero(), |x, y| x + y);
        let rest = a[blocked..vectored]
            .chunks_exact(W)
            .zip(b[blocked..vectored].chunks_exact(W));
        for (sa, sb) in rest {
            v = Lanes::from_slice(sa).mul_add(Lanes::from_slice(sb), v);
        }

        a[vectored..]
            .iter()
            .zip(&b[vectored..])
            .fold(v.reduce_add(), |s, (&x, &y)| x.mul_add(y, s))
    }
}

/// A binary kernel with its second operand fixed.
struct WithScalar<'k, K, T> {
    kernel: &'k K,
    s: T,
}

impl<T: Element, K: BinaryKernel<T>> UnaryKernel<T> for WithScalar<'_, K, T> {
    #[inline(always)]
    fn apply<const W: usize>(&self, x: Lanes<T, W>) -> Lanes<T, W> {
        self.kernel.apply(x, Lanes::splat(self.s))
    }
}

/// Hints the cache to load `data[index]`. Out-of-range indices are ignored.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn prefetch_read<T>(data: &[T], index: usize) {
    use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};

    if let Some(p) = data.get(index) {
        // SAFETY: prefetching never faults and `p` points into `data`.
        unsafe { _mm_prefetch::<_MM_HINT_T0>((p as *const T).cast::<i8>()) }
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
fn prefetch_read<T>(_data: &[T], _index: usize) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::kernels::{Add, Exp, Max, Mul, Sqrt, Sum};

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * 0.37).sin() * 10.0).collect()
    }

    #[test]
    fn test_block_size() {
        assert_eq!(F32Pipeline::BLOCK, 32);
        assert_eq!(Pipeline::<f64, 4, 2>::BLOCK, 8);
    }

    #[test]
    fn test_map_in_place_prefetching_matches_map() {
        for distance in [4, 64, 10_000] {
            let config = PipelineConfig::default()
                .with_prefetch_threshold(0)
                .with_prefetch_distance(distance);
            let pipeline = F64Pipeline::with_config(config).unwrap();
            for n in [0, 5, 16, 47, 1000] {
                let x = ramp(n);
                let mut expected = vec![0.0; n];
                pipeline.map(&Sqrt, &x, &mut expected).unwrap();
                let mut y = x.clone();
                pipeline.map_in_place(&Sqrt, &mut y);
                // NaN lanes from negative inputs compare by bits.
                let bits = |v: &[f64]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
                assert_eq!(bits(&y), bits(&expected), "distance {distance}, n={n}");
            }
        }
    }

    #[test]
    fn test_map_covers_every_tier() {
        let config = PipelineConfig::default().with_prefetch_threshold(0);
        let pipeline = F64Pipeline::with_config(config).unwrap();
        // 2 blocks, 3 vectors, 3 scalars
        let x = ramp(2 * 16 + 3 * 4 + 3);
        let mut y = vec![0.0; x.len()];
        pipeline.map(&Exp, &x, &mut y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_eq!(*yi, crate::math::exp(Lanes([*xi])).0[0]);
        }
    }

    #[test]
    fn test_map_in_place_matches_map() {
        let x: Vec<f32> = (0..45).map(|i| i as f32).collect();
        let pipeline = F32Pipeline::new();
        let mut y = vec![0.0; x.len()];
        pipeline.map(&Sqrt, &x, &mut y).unwrap();
        let mut z = x.clone();
        pipeline.map_in_place(&Sqrt, &mut z);
        assert_eq!(y, z);
    }

    #[test]
    fn test_zip_and_scalar_maps() {
        let a = ramp(23);
        let b = ramp(23).into_iter().rev().collect::<Vec<_>>();
        let mut out = vec![0.0; 23];
        let pipeline = Pipeline::<f64, 4, 2>::new();
        pipeline.zip_map(&Add, &a, &b, &mut out).unwrap();
        for i in 0..23 {
            assert_eq!(out[i], a[i] + b[i]);
        }
        pipeline.map_scalar(&Mul, &a, 3.0, &mut out).unwrap();
        for i in 0..23 {
            assert_eq!(out[i], a[i] * 3.0);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let pipeline = F64Pipeline::new();
        let mut out = vec![0.0; 3];
        assert!(pipeline.map(&Exp, &[1.0; 4], &mut out).is_err());
        assert!(pipeline.zip_map(&Add, &[1.0; 3], &[1.0; 4], &mut out).is_err());
        assert!(pipeline.dot(&[1.0; 3], &[1.0; 2]).is_err());
    }

    #[test]
    fn test_reductions_on_empty_input() {
        let pipeline = F32Pipeline::new();
        assert_eq!(pipeline.sum(&[]), 0.0);
        assert_eq!(pipeline.max(&[]), f32::NEG_INFINITY);
        assert_eq!(pipeline.maxmin(&[]), (f32::NEG_INFINITY, f32::INFINITY));
        assert_eq!(pipeline.dot(&[], &[]), Ok(0.0));
    }

    #[test]
    fn test_reductions_match_naive_loop() {
        let pipeline = F64Pipeline::new();
        for n in [1, 3, 4, 5, 16, 17, 63, 1000] {
            let x = ramp(n);
            let naive: f64 = x.iter().sum();
            assert!((pipeline.reduce(&Sum, &x) - naive).abs() < 1e-10, "n={n}");
            let max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min = x.iter().cloned().fold(f64::INFINITY, f64::min);
            assert_eq!(pipeline.reduce(&Max, &x), max);
            assert_eq!(pipeline.maxmin(&x), (max, min));
            let dot: f64 = x.iter().map(|v| v * v).sum();
            assert!((pipeline.dot(&x, &x).unwrap() - dot).abs() < 1e-9 * dot.max(1.0));
        }
    }
}
