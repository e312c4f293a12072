use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_ASPECT_RATIO, DEFAULT_MIN_ASPECT_RATIO, DEFAULT_MIN_CIRCULARITY,
    DEFAULT_MIN_CONTOUR_AREA, DEFAULT_MIN_LEAF_AREA, DEFAULT_SUNLIGHT_ALPHA,
};

/// Metric extraction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Contours below this area never become the plant bounding box.
    #[serde(default = "default_min_contour_area")]
    pub min_contour_area: f64,
    /// Accepted bounding box width/height window; filters line-like noise.
    #[serde(default = "default_min_aspect_ratio")]
    pub min_aspect_ratio: f64,
    #[serde(default = "default_max_aspect_ratio")]
    pub max_aspect_ratio: f64,
    /// Watershed regions below this many pixels are not counted as leaves.
    #[serde(default = "default_min_leaf_area")]
    pub min_leaf_area: usize,
    /// Regions must be strictly rounder than this (4*pi*area/perimeter^2).
    #[serde(default = "default_min_circularity")]
    pub min_circularity: f64,
    /// Image-side share of the sunlight proxy; weather gets the rest.
    #[serde(default = "default_sunlight_alpha")]
    pub sunlight_alpha: f64,
}

fn default_min_contour_area() -> f64 {
    DEFAULT_MIN_CONTOUR_AREA
}
fn default_min_aspect_ratio() -> f64 {
    DEFAULT_MIN_ASPECT_RATIO
}
fn default_max_aspect_ratio() -> f64 {
    DEFAULT_MAX_ASPECT_RATIO
}
fn default_min_leaf_area() -> usize {
    DEFAULT_MIN_LEAF_AREA
}
fn default_min_circularity() -> f64 {
    DEFAULT_MIN_CIRCULARITY
}
fn default_sunlight_alpha() -> f64 {
    DEFAULT_SUNLIGHT_ALPHA
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            min_contour_area: DEFAULT_MIN_CONTOUR_AREA,
            min_aspect_ratio: DEFAULT_MIN_ASPECT_RATIO,
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
            min_leaf_area: DEFAULT_MIN_LEAF_AREA,
            min_circularity: DEFAULT_MIN_CIRCULARITY,
            sunlight_alpha: DEFAULT_SUNLIGHT_ALPHA,
        }
    }
}

/// Weather conditions at capture time, as reported by an external service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Cloud cover percentage, 0..=100.
    #[serde(default = "default_clouds")]
    pub clouds: f64,
    /// UV index.
    #[serde(default = "default_uvi")]
    pub uvi: f64,
    /// Free-text condition, e.g. "Clear", "Partly cloudy", "Rain".
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_clouds() -> f64 {
    30.0
}
fn default_uvi() -> f64 {
    6.0
}
fn default_description() -> String {
    "Clear".to_string()
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            clouds: default_clouds(),
            uvi: default_uvi(),
            description: default_description(),
        }
    }
}
