use serde::{Deserialize, Serialize};

use crate::consts::{
    WEIGHT_BOUNDING_BOX_AREA, WEIGHT_COLOR_HEALTH_INDEX, WEIGHT_GREEN_PIXEL_RATIO,
    WEIGHT_LEAF_COUNT, WEIGHT_SUNLIGHT_PROXY,
};
use crate::metrics::MetricName;

/// Per-metric scoring weights. Expected to sum to 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    #[serde(default = "default_bounding_box_area")]
    pub bounding_box_area: f64,
    #[serde(default = "default_green_pixel_ratio")]
    pub green_pixel_ratio: f64,
    #[serde(default = "default_leaf_count")]
    pub leaf_count: f64,
    #[serde(default = "default_color_health_index")]
    pub color_health_index: f64,
    #[serde(default = "default_sunlight_proxy")]
    pub sunlight_proxy: f64,
}

fn default_bounding_box_area() -> f64 {
    WEIGHT_BOUNDING_BOX_AREA
}
fn default_green_pixel_ratio() -> f64 {
    WEIGHT_GREEN_PIXEL_RATIO
}
fn default_leaf_count() -> f64 {
    WEIGHT_LEAF_COUNT
}
fn default_color_health_index() -> f64 {
    WEIGHT_COLOR_HEALTH_INDEX
}
fn default_sunlight_proxy() -> f64 {
    WEIGHT_SUNLIGHT_PROXY
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            bounding_box_area: WEIGHT_BOUNDING_BOX_AREA,
            green_pixel_ratio: WEIGHT_GREEN_PIXEL_RATIO,
            leaf_count: WEIGHT_LEAF_COUNT,
            color_health_index: WEIGHT_COLOR_HEALTH_INDEX,
            sunlight_proxy: WEIGHT_SUNLIGHT_PROXY,
        }
    }
}

impl MetricWeights {
    pub fn get(&self, name: MetricName) -> f64 {
        match name {
            MetricName::BoundingBoxArea => self.bounding_box_area,
            MetricName::GreenPixelRatio => self.green_pixel_ratio,
            MetricName::LeafCount => self.leaf_count,
            MetricName::ColorHealthIndex => self.color_health_index,
            MetricName::SunlightProxy => self.sunlight_proxy,
        }
    }

    pub fn sum(&self) -> f64 {
        MetricName::ALL.iter().map(|&m| self.get(m)).sum()
    }
}
