use serde::{Deserialize, Serialize};

use crate::consts::CHART_BEFORE_OFFSET;
use crate::metrics::{MetricName, MetricSet};

/// One point of the before/after chart series. Values are in display units
/// (percent for ratios, thousands of pixels for area).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    pub growth_score: f64,
    pub leaf_count: f64,
    pub green_pixel_ratio: f64,
    pub bounding_box_area: f64,
    pub color_health_index: f64,
}

impl ChartPoint {
    fn new(date: &str, growth_score: f64, metrics: &MetricSet) -> Self {
        let scaled = |m: MetricName| metrics.get(m) * m.chart_scale();
        Self {
            date: date.to_string(),
            growth_score,
            leaf_count: scaled(MetricName::LeafCount),
            green_pixel_ratio: scaled(MetricName::GreenPixelRatio),
            bounding_box_area: scaled(MetricName::BoundingBoxArea),
            color_health_index: scaled(MetricName::ColorHealthIndex),
        }
    }
}

/// Two-point chart series. The "Before" point carries the score less a
/// fixed offset, floored at zero.
pub fn chart_data(before: &MetricSet, after: &MetricSet, score: f64) -> [ChartPoint; 2] {
    [
        ChartPoint::new("Before", (score - CHART_BEFORE_OFFSET).max(0.0), before),
        ChartPoint::new("After", score, after),
    ]
}
