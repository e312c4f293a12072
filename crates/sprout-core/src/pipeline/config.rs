use serde::{Deserialize, Serialize};

use crate::consts::WEIGHT_SUM_TOLERANCE;
use crate::error::{Result, SproutError};
use crate::growth::{GrowthScorer, MetricWeights};
use crate::metrics::{MetricConfig, MetricExtractor};
use crate::segmentation::{
    GreenRangeConfig, GreenRangeEstimator, PlantSegmenter, SegmentationConfig, SmoothingConfig,
    WorkingSize,
};

/// Every tunable of the analysis, loadable from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub working_size: WorkingSize,
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    #[serde(default)]
    pub green_range: GreenRangeConfig,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub metrics: MetricConfig,
    #[serde(default)]
    pub weights: MetricWeights,
}

impl AnalysisConfig {
    /// Reject settings the algorithms cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SproutError::InvalidConfig(msg));

        if self.working_size.width == 0 || self.working_size.height == 0 {
            return invalid(format!(
                "working size must be positive, got {}x{}",
                self.working_size.width, self.working_size.height
            ));
        }
        if self.green_range.cluster_count == 0 {
            return invalid("cluster count must be at least 1".into());
        }
        if self.green_range.max_samples < self.green_range.cluster_count {
            return invalid(format!(
                "max samples ({}) must be at least the cluster count ({})",
                self.green_range.max_samples, self.green_range.cluster_count
            ));
        }
        if self.smoothing.gaussian_kernel % 2 == 0 {
            return invalid(format!(
                "Gaussian kernel size must be odd, got {}",
                self.smoothing.gaussian_kernel
            ));
        }
        let block = self.segmentation.adaptive_block_size;
        if block < 3 || block % 2 == 0 {
            return invalid(format!("adaptive block size must be odd and >= 3, got {block}"));
        }
        if self.segmentation.open_kernel == 0 || self.segmentation.close_kernel == 0 {
            return invalid("morphology kernel sizes must be positive".into());
        }
        let m = &self.metrics;
        if !(m.min_aspect_ratio > 0.0 && m.min_aspect_ratio <= m.max_aspect_ratio) {
            return invalid(format!(
                "aspect ratio window [{}, {}] is empty",
                m.min_aspect_ratio, m.max_aspect_ratio
            ));
        }
        if !(0.0..=1.0).contains(&m.sunlight_alpha) {
            return invalid(format!("sunlight alpha must be in [0, 1], got {}", m.sunlight_alpha));
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return invalid(format!("metric weights must sum to 1.0, got {sum}"));
        }
        Ok(())
    }

    pub fn estimator(&self) -> GreenRangeEstimator {
        GreenRangeEstimator::new(self.green_range.clone(), self.working_size, self.smoothing.clone())
    }

    pub fn segmenter(&self) -> PlantSegmenter {
        PlantSegmenter::new(self.segmentation.clone(), self.working_size, self.smoothing.clone())
    }

    pub fn extractor(&self) -> MetricExtractor {
        MetricExtractor::new(self.metrics.clone())
    }

    pub fn scorer(&self) -> GrowthScorer {
        GrowthScorer::new(self.weights.clone())
    }
}
