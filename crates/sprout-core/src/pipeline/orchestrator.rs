use std::sync::Arc;

use tracing::{info, warn};

use crate::frame::RgbFrame;
use crate::growth::chart_data;
use crate::metrics::WeatherSnapshot;

use super::config::AnalysisConfig;
use super::types::{GrowthAnalysis, ImageAnalysis, NoOpReporter, PipelineStage, ProgressReporter};

/// Estimate, segment and measure one photograph.
///
/// Never fails: every internal failure is absorbed into a fallback that is
/// listed in [`ImageAnalysis::degradations`].
pub fn analyze_image(image: &RgbFrame, weather: &WeatherSnapshot, config: &AnalysisConfig) -> ImageAnalysis {
    analyze_image_reported(image, weather, config, &NoOpReporter)
}

/// [`analyze_image`] with progress reporting.
pub fn analyze_image_reported(
    image: &RgbFrame,
    weather: &WeatherSnapshot,
    config: &AnalysisConfig,
    reporter: &dyn ProgressReporter,
) -> ImageAnalysis {
    let empty_input = image.is_empty();
    if empty_input {
        warn!("Input image is empty; all metrics will be zero");
    }

    reporter.begin_stage(PipelineStage::EstimatingGreenRange);
    let green_range = config.estimator().estimate_detailed(image);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Segmenting);
    let segmentation = config.segmenter().segment(image, &green_range.bounds);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::ExtractingMetrics);
    let report = config.extractor().extract_segmentation(&segmentation, weather);
    reporter.finish_stage();

    info!(
        width = image.width(),
        height = image.height(),
        bounds = %green_range.bounds,
        source = %green_range.source,
        plant_pixels = segmentation.plant_pixel_count(),
        leaves = report.metrics.leaf_count,
        "Image analysed"
    );

    ImageAnalysis {
        green_range,
        segmentation,
        report,
        empty_input,
    }
}

/// Analyse both photographs in parallel and score the growth between them.
pub fn compare_images(
    before: &RgbFrame,
    after: &RgbFrame,
    weather: &WeatherSnapshot,
    config: &AnalysisConfig,
) -> GrowthAnalysis {
    compare_images_reported(before, after, weather, config, Arc::new(NoOpReporter))
}

/// [`compare_images`] with a thread-safe progress reporter.
pub fn compare_images_reported(
    before: &RgbFrame,
    after: &RgbFrame,
    weather: &WeatherSnapshot,
    config: &AnalysisConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> GrowthAnalysis {
    let (before, after) = rayon::join(
        || analyze_image_reported(before, weather, config, reporter.as_ref()),
        || analyze_image_reported(after, weather, config, reporter.as_ref()),
    );

    reporter.begin_stage(PipelineStage::Scoring);
    let growth = config.scorer().score(before.metrics(), after.metrics());
    let chart = chart_data(before.metrics(), after.metrics(), growth.score);
    reporter.finish_stage();

    info!(
        score = growth.score,
        suggestion = %growth.suggestion,
        "Growth compared"
    );

    GrowthAnalysis {
        before,
        after,
        growth,
        chart,
    }
}
