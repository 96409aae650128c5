use log::debug;

use crate::error::{invalid_config, Result};
use crate::{PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD, PREFETCH_DISTANCE, PREFETCH_THRESHOLD};

/// Runtime tuning of a [`Pipeline`](super::Pipeline).
///
/// None of the fields affect results, only how the work is scheduled.
///
/// ```
/// use lanemath::array::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_prefetch_distance(512)
///     .with_parallel_threshold(1 << 20);
/// assert!(config.validate().is_ok());
/// assert!(config.with_parallel_chunk(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Elements ahead of the current block to prefetch.
    pub prefetch_distance: usize,
    /// Minimum slice length for which prefetching is issued.
    pub prefetch_threshold: usize,
    /// Minimum slice length for which the `par_*` paths split work.
    pub parallel_threshold: usize,
    /// Target elements per rayon task, rounded down to a whole block.
    pub parallel_chunk: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            prefetch_distance: PREFETCH_DISTANCE,
            prefetch_threshold: PREFETCH_THRESHOLD,
            parallel_threshold: PARALLEL_SIMD_THRESHOLD,
            parallel_chunk: PARALLEL_CHUNK_SIZE,
        }
    }
}

impl PipelineConfig {
    pub fn with_prefetch_distance(mut self, distance: usize) -> Self {
        self.prefetch_distance = distance;
        self
    }

    pub fn with_prefetch_threshold(mut self, threshold: usize) -> Self {
        self.prefetch_threshold = threshold;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_parallel_chunk(mut self, chunk: usize) -> Self {
        self.parallel_chunk = chunk;
        self
    }

    /// Never issues prefetch hints.
    pub fn without_prefetch(mut self) -> Self {
        self.prefetch_threshold = usize::MAX;
        self
    }

    /// Checks that the configuration can drive a pipeline.
    ///
    /// # Errors
    ///
    /// [`InvalidConfig`](crate::error::LaneMathError::InvalidConfig) when
    /// `parallel_chunk` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_chunk == 0 {
            return Err(invalid_config("parallel_chunk must be greater than zero"));
        }
        debug!("pipeline config accepted: {self:?}");
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn prefetches(&self, len: usize) -> bool {
        len >= self.prefetch_threshold
    }

    #[inline(always)]
    pub(crate) fn splits(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}
