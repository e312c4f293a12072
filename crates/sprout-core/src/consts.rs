/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Working resolution every stage operates on after resizing.
pub const DEFAULT_WORKING_WIDTH: usize = 300;
pub const DEFAULT_WORKING_HEIGHT: usize = 300;

/// Largest legal hue in the 8-bit HSV encoding (degrees / 2).
pub const HUE_MAX: u8 = 179;

/// Number of hue histogram bins (one per 8-bit hue value).
pub const HUE_BINS: usize = 180;

// ---------------------------------------------------------------------------
// Green range estimation
// ---------------------------------------------------------------------------

/// Static HSV bounds used whenever adaptive estimation has nothing to go on.
pub const STATIC_GREEN_LOWER: [u8; 3] = [25, 40, 40];
pub const STATIC_GREEN_UPPER: [u8; 3] = [90, 255, 255];

/// Canonical "healthy green" HSV reference.
pub const HEALTHY_GREEN_HSV: [f32; 3] = [60.0, 150.0, 120.0];

/// Fraction of the distance toward [`HEALTHY_GREEN_HSV`] an uncorroborated
/// cluster center is moved.
pub const UNCORROBORATED_PULL: f32 = 0.3;

/// Saturation/value given to a center synthesized from a histogram peak.
pub const PEAK_CENTER_SATURATION: f32 = 120.0;
pub const PEAK_CENTER_VALUE: f32 = 120.0;

/// Default number of color clusters.
pub const DEFAULT_CLUSTER_COUNT: usize = 4;

/// Default clustering seed. Fixed so repeated calls are reproducible.
pub const DEFAULT_CLUSTER_SEED: u64 = 42;

/// Upper bound on pixels fed to the clustering step.
pub const DEFAULT_CLUSTER_MAX_SAMPLES: usize = 10_000;

/// Lloyd iteration limit for k-means.
pub const DEFAULT_CLUSTER_MAX_ITERATIONS: usize = 50;

/// Center movement (HSV units) below which k-means is considered converged.
pub const KMEANS_TOLERANCE: f32 = 0.01;

/// Pixels with value at or below this are excluded from the cluster sample.
pub const DEFAULT_NEAR_BLACK_VALUE: u8 = 20;

/// CLAHE clip limit and tile grid.
pub const DEFAULT_CLAHE_CLIP_LIMIT: f32 = 2.0;
pub const DEFAULT_CLAHE_TILES: usize = 8;

/// High-confidence green band: hue range, minimum saturation, minimum value.
pub const HIGH_CONFIDENCE_HUE: (f32, f32) = (35.0, 85.0);
pub const HIGH_CONFIDENCE_MIN_SATURATION: f32 = 60.0;
pub const HIGH_CONFIDENCE_MIN_VALUE: f32 = 40.0;

/// Medium-confidence green band.
pub const MEDIUM_CONFIDENCE_HUE: (f32, f32) = (25.0, 95.0);
pub const MEDIUM_CONFIDENCE_MIN_SATURATION: f32 = 30.0;
pub const MEDIUM_CONFIDENCE_MIN_VALUE: f32 = 30.0;

/// Only pixels at or above these contribute to the hue histogram.
pub const HISTOGRAM_MIN_SATURATION: u8 = 40;
pub const HISTOGRAM_MIN_VALUE: u8 = 40;

/// Moving-average width used to smooth the hue histogram.
pub const HISTOGRAM_SMOOTHING_WIDTH: usize = 5;

/// Hue peak detection parameters.
pub const DEFAULT_PEAK_DISTANCE: usize = 10;
pub const DEFAULT_PEAK_PROMINENCE: f32 = 50.0;

/// Plausible hue window for a plant-green histogram peak.
pub const PEAK_GREEN_HUE: (usize, usize) = (30, 90);

/// A histogram peak within this many hue units corroborates a cluster.
pub const PEAK_CORROBORATION_DISTANCE: f32 = 10.0;

/// Hue margin at zero saturation and at full saturation.
pub const HUE_MARGIN_WIDE: f32 = 15.0;
pub const HUE_MARGIN_NARROW: f32 = 8.0;

/// Saturation/value margins: base plus an extra share that grows as the
/// channel itself gets darker/duller.
pub const SV_MARGIN_BASE: f32 = 40.0;
pub const SV_MARGIN_EXTRA: f32 = 40.0;

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

pub const DEFAULT_BILATERAL_DIAMETER: usize = 9;
pub const DEFAULT_BILATERAL_SIGMA_COLOR: f32 = 75.0;
pub const DEFAULT_BILATERAL_SIGMA_SPACE: f32 = 75.0;

/// Gaussian kernel size applied after the bilateral filter.
pub const DEFAULT_GAUSSIAN_KERNEL: usize = 5;

/// Lab a-channel values at or below this are treated as green.
pub const DEFAULT_LAB_A_THRESHOLD: u8 = 120;

/// Adaptive threshold window and offset.
pub const DEFAULT_ADAPTIVE_BLOCK_SIZE: usize = 11;
pub const DEFAULT_ADAPTIVE_OFFSET: f32 = 2.0;

pub const DEFAULT_OPEN_KERNEL: usize = 3;
pub const DEFAULT_OPEN_ITERATIONS: usize = 2;
pub const DEFAULT_CLOSE_KERNEL: usize = 5;
pub const DEFAULT_CLOSE_ITERATIONS: usize = 2;

/// Connected components smaller than this (pixels) are erased.
pub const DEFAULT_MIN_COMPONENT_AREA: usize = 100;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

pub const DEFAULT_MIN_CONTOUR_AREA: f64 = 100.0;
pub const DEFAULT_MIN_ASPECT_RATIO: f64 = 0.1;
pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 10.0;

pub const DEFAULT_MIN_LEAF_AREA: usize = 100;
pub const DEFAULT_MIN_CIRCULARITY: f64 = 0.1;

/// Dilation iterations used to mark certain background for the watershed.
pub const SURE_BACKGROUND_DILATIONS: usize = 3;

/// Distance-transform threshold fraction bounds for leaf seeding.
pub const SEED_FRACTION_MIN: f32 = 0.3;
pub const SEED_FRACTION_MAX: f32 = 0.6;
/// Fraction gained per pixel of maximum distance.
pub const SEED_FRACTION_SLOPE: f32 = 0.01;

/// Canonical green hue and the distance at which hue closeness reaches zero.
pub const CANONICAL_GREEN_HUE: f64 = 60.0;
pub const HUE_CLOSENESS_SPAN: f64 = 30.0;

/// Mid-gray brightness target for color health.
pub const BRIGHTNESS_TARGET: f64 = 128.0;

/// Lab a-channel distance below neutral that scores full green intensity.
pub const LAB_GREEN_SPAN: f64 = 80.0;

/// Standard deviations that drive hue/saturation consistency to zero.
pub const HUE_STD_SPAN: f64 = 30.0;
pub const SATURATION_STD_SPAN: f64 = 64.0;

/// Color health sub-score weights: hue, saturation, brightness, Lab green,
/// hue consistency, saturation consistency.
pub const CHI_WEIGHTS: [f64; 6] = [0.25, 0.20, 0.15, 0.20, 0.10, 0.10];

/// Shadow cutoffs as fractions of full brightness, deepest first, and
/// their weights.
pub const SHADOW_CUTOFFS: [f64; 3] = [0.15, 0.25, 0.35];
pub const SHADOW_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

/// Image-side sunlight weights: brightness, shadow, uniformity, saturation.
pub const SUNLIGHT_IMAGE_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

/// Brightness std-dev that drives uniformity to zero.
pub const BRIGHTNESS_STD_SPAN: f64 = 128.0;

/// Pixels at or above this value count as overexposed.
pub const OVEREXPOSED_VALUE: u8 = 250;
pub const OVEREXPOSURE_PENALTY_SCALE: f64 = 0.5;
pub const OVEREXPOSURE_PENALTY_CAP: f64 = 0.2;

/// Exponent applied to the clear-sky fraction.
pub const CLEAR_SKY_EXPONENT: f64 = 0.7;
/// UV index treated as full sun.
pub const UVI_FULL_SUN: f64 = 10.0;
/// Weather-side weights: clear sky, UV.
pub const SUNLIGHT_WEATHER_WEIGHTS: [f64; 2] = [0.6, 0.4];

/// Textual weather description modifiers.
pub const WEATHER_CLEAR_BOOST: f64 = 0.1;
pub const WEATHER_PARTLY_CLOUDY_BOOST: f64 = 0.05;
pub const WEATHER_OVERCAST_PENALTY: f64 = -0.1;
pub const WEATHER_PRECIPITATION_PENALTY: f64 = -0.2;

/// Image-side share of the blended sunlight score.
pub const DEFAULT_SUNLIGHT_ALPHA: f64 = 0.7;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

pub const WEIGHT_BOUNDING_BOX_AREA: f64 = 0.25;
pub const WEIGHT_GREEN_PIXEL_RATIO: f64 = 0.25;
pub const WEIGHT_LEAF_COUNT: f64 = 0.20;
pub const WEIGHT_COLOR_HEALTH_INDEX: f64 = 0.20;
pub const WEIGHT_SUNLIGHT_PROXY: f64 = 0.10;

/// Tolerance on the weight sum when validating a configuration.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Suggestion tier boundaries on the final score.
pub const SCORE_EXCELLENT: f64 = 80.0;
pub const SCORE_GOOD: f64 = 60.0;
pub const SCORE_MODERATE: f64 = 40.0;

/// Growth score offset of the "Before" point in chart data.
pub const CHART_BEFORE_OFFSET: f64 = 20.0;
