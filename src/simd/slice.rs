use super::traits::{SimdMath, SimdReduce};
use crate::array::{BinaryKernel, F32Pipeline, F64Pipeline, UnaryKernel};
use crate::error::{check_len, Result};

macro_rules! impl_slice_traits {
    ($($t:ty => $pipeline:ty),* $(,)?) => {$(
        impl SimdMath for [$t] {
            type Elem = $t;

            fn map_kernel<K: UnaryKernel<$t>>(&self, kernel: &K) -> Vec<$t> {
                let mut out = vec![0.0; self.len()];
                <$pipeline>::new().map_unchecked(kernel, self, &mut out);
                out
            }

            fn par_map_kernel<K: UnaryKernel<$t>>(&self, kernel: &K) -> Vec<$t> {
                let mut out = self.to_vec();
                <$pipeline>::new().par_map_in_place(kernel, &mut out);
                out
            }

            fn zip_kernel<K: BinaryKernel<$t>>(&self, kernel: &K, other: &[$t]) -> Result<Vec<$t>> {
                check_len(self.len(), other.len())?;
                let mut out = vec![0.0; self.len()];
                <$pipeline>::new().zip_map_unchecked(kernel, self, other, &mut out);
                Ok(out)
            }

            fn par_zip_kernel<K: BinaryKernel<$t>>(&self, kernel: &K, other: &[$t]) -> Result<Vec<$t>> {
                let mut out = vec![0.0; self.len()];
                <$pipeline>::new().par_zip_map(kernel, self, other, &mut out)?;
                Ok(out)
            }
        }

        impl SimdReduce for [$t] {
            type Elem = $t;

            fn simd_sum(&self) -> $t {
                <$pipeline>::new().sum(self)
            }

            fn simd_max(&self) -> $t {
                <$pipeline>::new().max(self)
            }

            fn simd_min(&self) -> $t {
                <$pipeline>::new().min(self)
            }

            fn simd_maxmin(&self) -> ($t, $t) {
                <$pipeline>::new().maxmin(self)
            }

            fn simd_dot(&self, other: &[$t]) -> Result<$t> {
                <$pipeline>::new().dot(self, other)
            }

            fn par_simd_sum(&self) -> $t {
                <$pipeline>::new().par_sum(self)
            }

            fn par_simd_dot(&self, other: &[$t]) -> Result<$t> {
                <$pipeline>::new().par_dot(self, other)
            }
        }
    )*};
}

impl_slice_traits!(f32 => F32Pipeline, f64 => F64Pipeline);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_methods_match_lane_functions() {
        let x: Vec<f32> = (1..=19).map(|i| i as f32 * 0.25).collect();
        let y = x.simd_ln();
        for (xi, yi) in x.iter().zip(&y) {
            assert!((yi - xi.ln()).abs() <= 4.0 * f32::EPSILON * xi.ln().abs().max(1.0));
        }
        assert_eq!(x.simd_sqrt(), x.par_simd_sqrt());
        assert!(Vec::<f64>::new().simd_exp().is_empty());
    }

    #[test]
    fn test_binary_methods_check_lengths() {
        let x = [1.0f64, 2.0, 3.0];
        assert_eq!(x.simd_pow(&[2.0, 2.0, 2.0]).unwrap().len(), 3);
        assert!(x.simd_pow(&[2.0]).is_err());
        assert!(x.par_simd_atan2(&[1.0; 4]).is_err());
    }

    #[test]
    fn test_reductions() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        assert_eq!(x.simd_sum(), 45.0);
        assert_eq!(x.par_simd_sum(), 45.0);
        assert_eq!(x.simd_maxmin(), (9.0, 0.0));
        assert_eq!(x.simd_max(), 9.0);
        assert_eq!(x.simd_min(), 0.0);
        assert_eq!(x.simd_dot(&x), Ok(285.0));
        assert_eq!(x.par_simd_dot(&x), Ok(285.0));
    }
}
