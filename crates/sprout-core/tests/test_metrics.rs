mod common;

use approx::assert_relative_eq;
use ndarray::Array2;

use sprout_core::diagnostics::Degradation;
use sprout_core::frame::RgbFrame;
use sprout_core::metrics::{
    color_health, count_leaves, green_pixel_ratio, plant_bounding_box, sunlight_proxy,
    MetricConfig, MetricExtractor, MetricReport, MetricSet, WeatherSnapshot,
};
use sprout_core::pipeline::{analyze_image, AnalysisConfig};

use common::{count, disc_mask, one_leaf, plant_image, two_leaves};

fn extract(image: &RgbFrame, mask: &Array2<bool>) -> MetricReport {
    let plant_only = image.masked(mask);
    MetricExtractor::default().extract_report(image, image, mask, &plant_only, &WeatherSnapshot::default())
}

// ---------------------------------------------------------------------------
// Boundary behaviour
// ---------------------------------------------------------------------------

#[test]
fn test_all_black_image_yields_zero_metrics() {
    let image = RgbFrame::zeros(300, 300);
    let analysis = analyze_image(&image, &WeatherSnapshot::default(), &AnalysisConfig::default());
    let m = analysis.metrics();
    assert_eq!(m.leaf_count, 0);
    assert_eq!(m.green_pixel_ratio, 0.0);
    assert_eq!(m.bounding_box_area, 0);
    assert_eq!(m.color_health_index, 0.0);
    assert_eq!(m.sunlight_proxy, 0.0);
    assert!(analysis.report.degradations.contains(&Degradation::EmptyMask));
}

#[test]
fn test_empty_mask_report() {
    let image = plant_image(300, 300, &two_leaves());
    let mask = Array2::from_elem((300, 300), false);
    let report = extract(&image, &mask);
    assert_eq!(report.metrics, MetricSet::default());
    assert!(report.bounding_box.is_none());
    assert!(report.sunlight.error.is_some());
    assert!(report.is_degraded());
}

#[test]
fn test_mismatched_inputs_never_panic() {
    let image = plant_image(300, 300, &two_leaves());
    let small = RgbFrame::zeros(100, 100);
    let mask = disc_mask(300, 300, &two_leaves());
    let report = MetricExtractor::default().extract_report(
        &image,
        &small,
        &mask,
        &image,
        &WeatherSnapshot::default(),
    );
    assert_eq!(report.metrics, MetricSet::default());
    assert!(matches!(
        report.degradations.as_slice(),
        [Degradation::ExtractionFailed { .. }]
    ));
}

// ---------------------------------------------------------------------------
// Individual metrics on known masks
// ---------------------------------------------------------------------------

#[test]
fn test_bounding_box_of_largest_leaf() {
    let leaves = vec![((100.0, 90.0), 30.5), ((220.0, 220.0), 20.5)];
    let mask = disc_mask(300, 300, &leaves);
    let bbox = plant_bounding_box(&mask, &MetricConfig::default()).unwrap();
    assert_eq!(bbox.x, 60);
    assert_eq!(bbox.y, 70);
    assert_eq!(bbox.width, 61);
    assert_eq!(bbox.height, 61);
    assert_eq!(bbox.area(), 61 * 61);
}

#[test]
fn test_green_ratio_matches_mask_coverage() {
    let mask = disc_mask(300, 300, &two_leaves());
    let expected = count(&mask) as f64 / 90_000.0;
    assert_relative_eq!(green_pixel_ratio(&mask), expected, max_relative = 0.02);
}

#[test]
fn test_leaf_count_on_separated_leaves() {
    let config = MetricConfig::default();
    assert_eq!(count_leaves(&disc_mask(300, 300, &one_leaf()), &config).unwrap(), 1);
    assert_eq!(count_leaves(&disc_mask(300, 300, &two_leaves()), &config).unwrap(), 2);
}

#[test]
fn test_ribbon_is_not_a_leaf() {
    // A long diagonal band survives the opening but is far from round.
    let mask = Array2::from_shape_fn((300, 300), |(r, c)| {
        let d = r as isize - c as isize;
        (-6..=6).contains(&d) && (20..280).contains(&r)
    });
    let config = MetricConfig::default();
    assert_eq!(count_leaves(&mask, &config).unwrap(), 0);
}

#[test]
fn test_color_health_prefers_green_foliage() {
    let leaves = two_leaves();
    let mask = disc_mask(300, 300, &leaves);
    let green = plant_image(300, 300, &leaves);
    let mut yellow = green.clone();
    for &(center, radius) in &leaves {
        common::draw_disc(&mut yellow, center, radius, [190, 170, 40]);
    }

    let healthy = color_health(&green, &mask);
    let sickly = color_health(&yellow, &mask);
    assert!(healthy.index > sickly.index, "{} <= {}", healthy.index, sickly.index);
    assert!((0.0..=1.0).contains(&healthy.index));
    assert!((0.0..=1.0).contains(&sickly.index));
}

#[test]
fn test_sunlight_follows_weather() {
    let leaves = one_leaf();
    let image = plant_image(300, 300, &leaves);
    let mask = disc_mask(300, 300, &leaves);

    let sunny = WeatherSnapshot {
        clouds: 0.0,
        uvi: 10.0,
        description: "Clear".into(),
    };
    let stormy = WeatherSnapshot {
        clouds: 100.0,
        uvi: 0.5,
        description: "Thunderstorm".into(),
    };
    let bright = sunlight_proxy(&image, &mask, &sunny, 0.7);
    let dark = sunlight_proxy(&image, &mask, &stormy, 0.7);
    assert!(bright.score > dark.score);
    assert_eq!(bright.image_score, dark.image_score);
    assert_eq!(bright.weather_score, 1.0);
    assert_eq!(dark.weather_score, 0.0);
}

// ---------------------------------------------------------------------------
// Whole extraction
// ---------------------------------------------------------------------------

#[test]
fn test_extract_two_leaf_plant() {
    let leaves = two_leaves();
    let image = plant_image(300, 300, &leaves);
    let mask = disc_mask(300, 300, &leaves);
    let report = extract(&image, &mask);
    let m = report.metrics;

    assert_eq!(m.leaf_count, 2);
    assert!(m.bounding_box_area > 3000 && m.bounding_box_area <= 61 * 61);
    assert!(m.green_pixel_ratio > 0.05 && m.green_pixel_ratio < 0.08);
    assert!(m.color_health_index > 0.5 && m.color_health_index <= 1.0);
    assert!(m.sunlight_proxy > 0.0 && m.sunlight_proxy <= 1.0);
    assert!(!report.is_degraded());
}

#[test]
fn test_extract_matches_report_values() {
    let leaves = one_leaf();
    let image = plant_image(300, 300, &leaves);
    let mask = disc_mask(300, 300, &leaves);
    let plant_only = image.masked(&mask);
    let weather = WeatherSnapshot::default();
    let extractor = MetricExtractor::default();

    let set = extractor.extract(&image, &image, &mask, &plant_only, &weather);
    let report = extractor.extract_report(&image, &image, &mask, &plant_only, &weather);
    assert_eq!(set, report.metrics);
}

#[test]
fn test_metric_report_serializes() {
    let leaves = one_leaf();
    let image = plant_image(300, 300, &leaves);
    let report = extract(&image, &disc_mask(300, 300, &leaves));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["metrics"]["leaf_count"], 1);
    assert!(json["sunlight"].get("error").is_none());
    assert!(json["bounding_box"]["width"].is_number());
}
