mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sprout_core::diagnostics::Degradation;
use sprout_core::frame::RgbFrame;
use sprout_core::metrics::{MetricName, WeatherSnapshot};
use sprout_core::pipeline::{
    analyze_image, compare_images, compare_images_reported, AnalysisConfig, ImageSummary,
    PipelineStage, ProgressReporter,
};

use common::{one_leaf, plant_image, two_leaves};

#[test]
fn test_analysis_is_idempotent() {
    let image = plant_image(300, 300, &two_leaves());
    let config = AnalysisConfig::default();
    let weather = WeatherSnapshot::default();

    let a = analyze_image(&image, &weather, &config);
    let b = analyze_image(&image, &weather, &config);
    assert_eq!(a.metrics(), b.metrics());
    assert_eq!(a.green_range, b.green_range);
    assert_eq!(a.segmentation.mask, b.segmentation.mask);
}

#[test]
fn test_two_leaf_plant_analysis() {
    let image = plant_image(300, 300, &two_leaves());
    let analysis = analyze_image(&image, &WeatherSnapshot::default(), &AnalysisConfig::default());
    let m = analysis.metrics();

    assert_eq!(m.leaf_count, 2);
    assert!(m.bounding_box_area > 0);
    assert!(m.green_pixel_ratio > 0.04 && m.green_pixel_ratio < 0.09);
    assert!((0.0..=1.0).contains(&m.color_health_index));
    assert!((0.0..=1.0).contains(&m.sunlight_proxy));
    assert!(!analysis.empty_input);
}

#[test]
fn test_same_photo_scores_neutral() {
    let image = plant_image(300, 300, &two_leaves());
    let result = compare_images(&image, &image, &WeatherSnapshot::default(), &AnalysisConfig::default());
    assert_eq!(result.growth.score, 50.0);
    assert!(result.growth.deltas.values().all(|&d| d == 0.0));
}

#[test]
fn test_new_leaf_raises_the_score() {
    let before = plant_image(300, 300, &one_leaf());
    let after = plant_image(300, 300, &two_leaves());
    let result = compare_images(&before, &after, &WeatherSnapshot::default(), &AnalysisConfig::default());

    assert!(result.growth.score > 50.0, "score={}", result.growth.score);
    assert!(result.growth.deltas[&MetricName::GreenPixelRatio] > 50.0);
    assert!(result.growth.deltas[&MetricName::LeafCount] > 0.0);
    assert_eq!(result.chart[1].growth_score, result.growth.score);
}

#[test]
fn test_empty_before_image_is_survivable() {
    let before = RgbFrame::zeros(0, 0);
    let after = plant_image(300, 300, &one_leaf());
    let result = compare_images(&before, &after, &WeatherSnapshot::default(), &AnalysisConfig::default());

    assert!(result.before.empty_input);
    let degradations = result.before.degradations();
    assert_eq!(degradations[0], Degradation::EmptyInput);
    assert!(degradations.contains(&Degradation::EmptyMask));
    assert!((0.0..=100.0).contains(&result.growth.score));
    // Everything appeared from nothing.
    assert_eq!(result.growth.deltas[&MetricName::GreenPixelRatio], 100.0);
}

#[test]
fn test_summary_serializes_without_pixels() {
    let image = plant_image(300, 300, &one_leaf());
    let analysis = analyze_image(&image, &WeatherSnapshot::default(), &AnalysisConfig::default());
    let json = serde_json::to_value(ImageSummary::from(&analysis)).unwrap();
    assert!(json["plant_pixels"].as_u64().unwrap() > 0);
    assert!(json["report"]["metrics"].is_object());
    assert!(json["green_range"]["bounds"]["lower"].is_array());
}

struct CountingReporter {
    begun: AtomicUsize,
    finished: AtomicUsize,
}

impl ProgressReporter for CountingReporter {
    fn begin_stage(&self, _stage: PipelineStage) {
        self.begun.fetch_add(1, Ordering::SeqCst);
    }

    fn finish_stage(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_reporter_sees_every_stage() {
    let image = plant_image(120, 120, &[((60.0, 60.0), 25.0)]);
    let reporter = Arc::new(CountingReporter {
        begun: AtomicUsize::new(0),
        finished: AtomicUsize::new(0),
    });
    compare_images_reported(
        &image,
        &image,
        &WeatherSnapshot::default(),
        &AnalysisConfig::default(),
        reporter.clone(),
    );
    // Three stages per image plus scoring.
    assert_eq!(reporter.begun.load(Ordering::SeqCst), 7);
    assert_eq!(reporter.finished.load(Ordering::SeqCst), 7);
}
