pub mod bounds;
pub mod config;
pub mod green_range;
pub mod kmeans;
pub mod peaks;
pub mod segmenter;

pub use bounds::{BoundsSource, ColorBounds, GreenRangeEstimate};
pub use config::{GreenRangeConfig, SegmentationConfig, SmoothingConfig, WorkingSize};
pub use green_range::GreenRangeEstimator;
pub use segmenter::{PlantSegmenter, Segmentation};
