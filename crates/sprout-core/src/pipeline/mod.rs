pub mod config;
mod orchestrator;
mod types;

pub use config::AnalysisConfig;
pub use orchestrator::{analyze_image, analyze_image_reported, compare_images, compare_images_reported};
pub use types::{GrowthAnalysis, ImageAnalysis, ImageSummary, PipelineStage, ProgressReporter};
