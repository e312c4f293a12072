use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ADAPTIVE_BLOCK_SIZE, DEFAULT_ADAPTIVE_OFFSET, DEFAULT_BILATERAL_DIAMETER,
    DEFAULT_BILATERAL_SIGMA_COLOR, DEFAULT_BILATERAL_SIGMA_SPACE, DEFAULT_CLAHE_CLIP_LIMIT,
    DEFAULT_CLAHE_TILES, DEFAULT_CLOSE_ITERATIONS, DEFAULT_CLOSE_KERNEL,
    DEFAULT_CLUSTER_COUNT, DEFAULT_CLUSTER_MAX_ITERATIONS, DEFAULT_CLUSTER_MAX_SAMPLES,
    DEFAULT_CLUSTER_SEED, DEFAULT_GAUSSIAN_KERNEL, DEFAULT_LAB_A_THRESHOLD,
    DEFAULT_MIN_COMPONENT_AREA, DEFAULT_NEAR_BLACK_VALUE, DEFAULT_OPEN_ITERATIONS,
    DEFAULT_OPEN_KERNEL, DEFAULT_PEAK_DISTANCE, DEFAULT_PEAK_PROMINENCE, DEFAULT_WORKING_HEIGHT,
    DEFAULT_WORKING_WIDTH, STATIC_GREEN_LOWER, STATIC_GREEN_UPPER,
};
use crate::detection::KernelShape;

use super::bounds::ColorBounds;

/// Resolution every stage works at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSize {
    pub width: usize,
    pub height: usize,
}

impl WorkingSize {
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for WorkingSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORKING_WIDTH,
            height: DEFAULT_WORKING_HEIGHT,
        }
    }
}

/// Edge-preserving smoothing applied after resizing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Bilateral filter neighbourhood diameter in pixels.
    #[serde(default = "default_bilateral_diameter")]
    pub bilateral_diameter: usize,
    #[serde(default = "default_sigma_color")]
    pub sigma_color: f32,
    #[serde(default = "default_sigma_space")]
    pub sigma_space: f32,
    /// Size of the Gaussian kernel run after the bilateral filter
    /// (segmentation only).
    #[serde(default = "default_gaussian_kernel")]
    pub gaussian_kernel: usize,
}

fn default_bilateral_diameter() -> usize {
    DEFAULT_BILATERAL_DIAMETER
}
fn default_sigma_color() -> f32 {
    DEFAULT_BILATERAL_SIGMA_COLOR
}
fn default_sigma_space() -> f32 {
    DEFAULT_BILATERAL_SIGMA_SPACE
}
fn default_gaussian_kernel() -> usize {
    DEFAULT_GAUSSIAN_KERNEL
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            bilateral_diameter: DEFAULT_BILATERAL_DIAMETER,
            sigma_color: DEFAULT_BILATERAL_SIGMA_COLOR,
            sigma_space: DEFAULT_BILATERAL_SIGMA_SPACE,
            gaussian_kernel: DEFAULT_GAUSSIAN_KERNEL,
        }
    }
}

/// Adaptive green range estimation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GreenRangeConfig {
    /// Number of color clusters.
    #[serde(default = "default_cluster_count")]
    pub cluster_count: usize,
    /// Clustering seed; a fixed value makes estimation reproducible.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Maximum number of pixels fed to clustering.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Pixels with value at or below this are left out of the sample.
    #[serde(default = "default_near_black")]
    pub near_black_value: u8,
    #[serde(default = "default_clahe_clip_limit")]
    pub clahe_clip_limit: f32,
    /// CLAHE tile grid (tiles per side).
    #[serde(default = "default_clahe_tiles")]
    pub clahe_tiles: usize,
    /// Also equalize the saturation channel.
    #[serde(default)]
    pub equalize_saturation: bool,
    /// Minimum spacing between hue histogram peaks.
    #[serde(default = "default_peak_distance")]
    pub peak_distance: usize,
    #[serde(default = "default_peak_prominence")]
    pub peak_prominence: f32,
    /// Bounds returned when nothing green can be found.
    #[serde(default = "default_fallback")]
    pub fallback: ColorBounds,
}

fn default_cluster_count() -> usize {
    DEFAULT_CLUSTER_COUNT
}
fn default_seed() -> u64 {
    DEFAULT_CLUSTER_SEED
}
fn default_max_samples() -> usize {
    DEFAULT_CLUSTER_MAX_SAMPLES
}
fn default_max_iterations() -> usize {
    DEFAULT_CLUSTER_MAX_ITERATIONS
}
fn default_near_black() -> u8 {
    DEFAULT_NEAR_BLACK_VALUE
}
fn default_clahe_clip_limit() -> f32 {
    DEFAULT_CLAHE_CLIP_LIMIT
}
fn default_clahe_tiles() -> usize {
    DEFAULT_CLAHE_TILES
}
fn default_peak_distance() -> usize {
    DEFAULT_PEAK_DISTANCE
}
fn default_peak_prominence() -> f32 {
    DEFAULT_PEAK_PROMINENCE
}
fn default_fallback() -> ColorBounds {
    ColorBounds {
        lower: STATIC_GREEN_LOWER,
        upper: STATIC_GREEN_UPPER,
    }
}

impl Default for GreenRangeConfig {
    fn default() -> Self {
        Self {
            cluster_count: DEFAULT_CLUSTER_COUNT,
            seed: DEFAULT_CLUSTER_SEED,
            max_samples: DEFAULT_CLUSTER_MAX_SAMPLES,
            max_iterations: DEFAULT_CLUSTER_MAX_ITERATIONS,
            near_black_value: DEFAULT_NEAR_BLACK_VALUE,
            clahe_clip_limit: DEFAULT_CLAHE_CLIP_LIMIT,
            clahe_tiles: DEFAULT_CLAHE_TILES,
            equalize_saturation: false,
            peak_distance: DEFAULT_PEAK_DISTANCE,
            peak_prominence: DEFAULT_PEAK_PROMINENCE,
            fallback: default_fallback(),
        }
    }
}

/// Plant mask construction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Lab a-channel values at or below this count as green.
    #[serde(default = "default_lab_a_threshold")]
    pub lab_a_threshold: u8,
    /// Adaptive threshold window (odd).
    #[serde(default = "default_adaptive_block_size")]
    pub adaptive_block_size: usize,
    /// Amount subtracted from the local mean before comparing.
    #[serde(default = "default_adaptive_offset")]
    pub adaptive_offset: f32,
    #[serde(default)]
    pub kernel_shape: KernelShape,
    #[serde(default = "default_open_kernel")]
    pub open_kernel: usize,
    #[serde(default = "default_open_iterations")]
    pub open_iterations: usize,
    #[serde(default = "default_close_kernel")]
    pub close_kernel: usize,
    #[serde(default = "default_close_iterations")]
    pub close_iterations: usize,
    /// Components smaller than this many pixels are erased.
    #[serde(default = "default_min_component_area")]
    pub min_component_area: usize,
}

fn default_lab_a_threshold() -> u8 {
    DEFAULT_LAB_A_THRESHOLD
}
fn default_adaptive_block_size() -> usize {
    DEFAULT_ADAPTIVE_BLOCK_SIZE
}
fn default_adaptive_offset() -> f32 {
    DEFAULT_ADAPTIVE_OFFSET
}
fn default_open_kernel() -> usize {
    DEFAULT_OPEN_KERNEL
}
fn default_open_iterations() -> usize {
    DEFAULT_OPEN_ITERATIONS
}
fn default_close_kernel() -> usize {
    DEFAULT_CLOSE_KERNEL
}
fn default_close_iterations() -> usize {
    DEFAULT_CLOSE_ITERATIONS
}
fn default_min_component_area() -> usize {
    DEFAULT_MIN_COMPONENT_AREA
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            lab_a_threshold: DEFAULT_LAB_A_THRESHOLD,
            adaptive_block_size: DEFAULT_ADAPTIVE_BLOCK_SIZE,
            adaptive_offset: DEFAULT_ADAPTIVE_OFFSET,
            kernel_shape: KernelShape::Ellipse,
            open_kernel: DEFAULT_OPEN_KERNEL,
            open_iterations: DEFAULT_OPEN_ITERATIONS,
            close_kernel: DEFAULT_CLOSE_KERNEL,
            close_iterations: DEFAULT_CLOSE_ITERATIONS,
            min_component_area: DEFAULT_MIN_COMPONENT_AREA,
        }
    }
}
