use serde::Serialize;

use crate::diagnostics::Degradation;
use crate::growth::{ChartPoint, GrowthResult};
use crate::metrics::{MetricReport, MetricSet};
use crate::segmentation::{GreenRangeEstimate, Segmentation};

/// Analysis stage, used for progress reporting.
#[derive(Clone, Copy, Debug)]
pub enum PipelineStage {
    EstimatingGreenRange,
    Segmenting,
    ExtractingMetrics,
    Scoring,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EstimatingGreenRange => write!(f, "Estimating green range"),
            Self::Segmenting => write!(f, "Segmenting plant"),
            Self::ExtractingMetrics => write!(f, "Extracting metrics"),
            Self::Scoring => write!(f, "Scoring growth"),
        }
    }
}

/// Thread-safe progress reporting for the analysis.
///
/// Both sides of a comparison run concurrently, so stages of the two images
/// may interleave. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn begin_stage(&self, _stage: PipelineStage) {}

    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when the unreported entry points delegate.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Everything computed for one photograph.
#[derive(Clone, Debug)]
pub struct ImageAnalysis {
    pub green_range: GreenRangeEstimate,
    pub segmentation: Segmentation,
    pub report: MetricReport,
    /// The input had no pixels.
    pub empty_input: bool,
}

impl ImageAnalysis {
    pub fn metrics(&self) -> &MetricSet {
        &self.report.metrics
    }

    /// Every fallback taken for this image, in pipeline order.
    pub fn degradations(&self) -> Vec<Degradation> {
        let mut all = Vec::new();
        if self.empty_input {
            all.push(Degradation::EmptyInput);
        }
        all.extend(self.green_range.degradation.clone());
        all.extend(self.report.degradations.iter().cloned());
        all
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations().is_empty()
    }
}

/// Before/after comparison.
#[derive(Clone, Debug)]
pub struct GrowthAnalysis {
    pub before: ImageAnalysis,
    pub after: ImageAnalysis,
    pub growth: GrowthResult,
    pub chart: [ChartPoint; 2],
}

/// Serializable digest of one image analysis (no pixel data).
#[derive(Clone, Debug, Serialize)]
pub struct ImageSummary<'a> {
    pub green_range: &'a GreenRangeEstimate,
    pub report: &'a MetricReport,
    pub plant_pixels: usize,
    pub degradations: Vec<Degradation>,
}

impl<'a> From<&'a ImageAnalysis> for ImageSummary<'a> {
    fn from(a: &'a ImageAnalysis) -> Self {
        Self {
            green_range: &a.green_range,
            report: &a.report,
            plant_pixels: a.segmentation.plant_pixel_count(),
            degradations: a.degradations(),
        }
    }
}
