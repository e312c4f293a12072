use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::detection::BoundingBox;
use crate::diagnostics::Degradation;
use crate::error::{Result, SproutError};
use crate::frame::{Mask, RgbFrame};
use crate::segmentation::Segmentation;

use super::bounding_box::plant_bounding_box;
use super::color_health::{color_health, ColorHealthBreakdown};
use super::config::{MetricConfig, WeatherSnapshot};
use super::green_ratio::green_pixel_ratio;
use super::leaf_count::count_leaves;
use super::set::MetricSet;
use super::sunlight::{sunlight_proxy, SunlightBreakdown};

/// Metrics for one image together with the values they were derived from
/// and every fallback taken on the way.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub metrics: MetricSet,
    pub bounding_box: Option<BoundingBox>,
    pub color_health: ColorHealthBreakdown,
    pub sunlight: SunlightBreakdown,
    pub degradations: Vec<Degradation>,
}

impl MetricReport {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    fn failed(reason: String) -> Self {
        Self {
            degradations: vec![Degradation::ExtractionFailed { reason }],
            ..Default::default()
        }
    }
}

/// Computes the five growth metrics of one segmented image.
#[derive(Clone, Debug, Default)]
pub struct MetricExtractor {
    pub config: MetricConfig,
}

impl MetricExtractor {
    pub fn new(config: MetricConfig) -> Self {
        Self { config }
    }

    /// Metric values only. Never fails; see [`Self::extract_report`].
    pub fn extract(
        &self,
        working: &RgbFrame,
        blurred: &RgbFrame,
        mask: &Mask,
        plant_only: &RgbFrame,
        weather: &WeatherSnapshot,
    ) -> MetricSet {
        self.extract_report(working, blurred, mask, plant_only, weather).metrics
    }

    /// Convenience wrapper over the outputs of a segmenter.
    pub fn extract_segmentation(&self, segmentation: &Segmentation, weather: &WeatherSnapshot) -> MetricReport {
        self.extract_report(
            &segmentation.working,
            &segmentation.blurred,
            &segmentation.mask,
            &segmentation.plant_only,
            weather,
        )
    }

    /// Full metric report.
    ///
    /// Inputs whose sizes disagree yield the all-default metric set with an
    /// [`Degradation::ExtractionFailed`] entry. A leaf counting failure only
    /// zeroes the leaf count.
    pub fn extract_report(
        &self,
        working: &RgbFrame,
        blurred: &RgbFrame,
        mask: &Mask,
        plant_only: &RgbFrame,
        weather: &WeatherSnapshot,
    ) -> MetricReport {
        match self.try_extract(working, blurred, mask, plant_only, weather) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Metric extraction failed; returning default metrics");
                MetricReport::failed(e.to_string())
            }
        }
    }

    fn try_extract(
        &self,
        working: &RgbFrame,
        blurred: &RgbFrame,
        mask: &Mask,
        plant_only: &RgbFrame,
        weather: &WeatherSnapshot,
    ) -> Result<MetricReport> {
        let expected = mask.dim();
        for frame in [working, blurred, plant_only] {
            if frame.dim() != expected {
                return Err(SproutError::DimensionMismatch {
                    expected,
                    actual: frame.dim(),
                });
            }
        }

        let mut degradations = Vec::new();
        if !mask.iter().any(|&v| v) {
            debug!("Plant mask is empty");
            degradations.push(Degradation::EmptyMask);
        }

        let bounding_box = plant_bounding_box(mask, &self.config);
        let green_pixel_ratio = green_pixel_ratio(mask);

        let leaf_count = match count_leaves(mask, &self.config) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "Leaf counting failed; reporting zero leaves");
                degradations.push(Degradation::LeafCountFailed { reason: e.to_string() });
                0
            }
        };

        let color_health = color_health(plant_only, mask);
        let sunlight = sunlight_proxy(blurred, mask, weather, self.config.sunlight_alpha);

        let metrics = MetricSet {
            bounding_box_area: bounding_box.map_or(0, |b| b.area()),
            green_pixel_ratio,
            leaf_count,
            color_health_index: color_health.index,
            sunlight_proxy: sunlight.score,
        };
        debug!(?metrics, "Metrics extracted");

        Ok(MetricReport {
            metrics,
            bounding_box,
            color_health,
            sunlight,
            degradations,
        })
    }
}
