pub mod bounding_box;
pub mod color_health;
pub mod config;
pub mod extractor;
pub mod green_ratio;
pub mod leaf_count;
pub mod set;
pub mod sunlight;

pub use bounding_box::plant_bounding_box;
pub use color_health::{color_health, ColorHealthBreakdown};
pub use config::{MetricConfig, WeatherSnapshot};
pub use extractor::{MetricExtractor, MetricReport};
pub use green_ratio::green_pixel_ratio;
pub use leaf_count::{count_leaves, segment_leaves, LeafSegmentation};
pub use set::{MetricName, MetricSet};
pub use sunlight::{sunlight_proxy, SunlightBreakdown};
