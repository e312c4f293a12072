use approx::assert_relative_eq;

use sprout_core::growth::{chart_data, GrowthScorer, MetricWeights, Suggestion};
use sprout_core::metrics::{MetricName, MetricSet};

fn baseline() -> MetricSet {
    MetricSet {
        bounding_box_area: 40_000,
        green_pixel_ratio: 0.5,
        leaf_count: 5,
        color_health_index: 0.6,
        sunlight_proxy: 0.5,
    }
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test]
fn test_greener_plant_with_extra_leaf() {
    let before = baseline();
    let after = MetricSet {
        green_pixel_ratio: 0.6,
        leaf_count: 6,
        ..before
    };
    let result = GrowthScorer::default().score(&before, &after);

    assert_relative_eq!(result.deltas[&MetricName::GreenPixelRatio], 20.0, epsilon = 1e-9);
    assert_relative_eq!(result.deltas[&MetricName::LeafCount], 20.0, epsilon = 1e-9);
    assert_eq!(result.deltas[&MetricName::BoundingBoxArea], 0.0);
    assert_eq!(result.deltas[&MetricName::ColorHealthIndex], 0.0);
    assert_eq!(result.deltas[&MetricName::SunlightProxy], 0.0);

    assert!(result.score > 50.0 && result.score < 60.0, "score={}", result.score);
    assert_relative_eq!(result.score, 54.5, epsilon = 1e-9);
    assert_eq!(result.rounded_score(), 54.5);
    assert_eq!(result.suggestion, Suggestion::Moderate);
}

#[test]
fn test_every_metric_has_a_delta() {
    let result = GrowthScorer::default().score(&baseline(), &baseline());
    assert_eq!(result.deltas.len(), 5);
    for name in MetricName::ALL {
        assert!(result.deltas.contains_key(&name), "missing {name}");
    }
}

// ---------------------------------------------------------------------------
// Neutral point and the zero baseline rule
// ---------------------------------------------------------------------------

#[test]
fn test_identical_sets_score_fifty() {
    let m = baseline();
    let result = GrowthScorer::default().score(&m, &m);
    assert_eq!(result.score, 50.0);
    assert!(result.deltas.values().all(|&d| d == 0.0));
}

#[test]
fn test_all_zero_sets_score_fifty() {
    let zero = MetricSet::default();
    let result = GrowthScorer::default().score(&zero, &zero);
    assert_eq!(result.score, 50.0);
    assert!(result.deltas.values().all(|&d| d == 0.0));
    assert_eq!(result.suggestion, Suggestion::Moderate);
}

#[test]
fn test_appearance_from_nothing_is_full_credit() {
    let before = MetricSet {
        leaf_count: 0,
        ..baseline()
    };
    let tiny = MetricSet {
        leaf_count: 1,
        ..before
    };
    let huge = MetricSet {
        leaf_count: 500,
        ..before
    };

    let scorer = GrowthScorer::default();
    let a = scorer.score(&before, &tiny);
    let b = scorer.score(&before, &huge);
    assert_eq!(a.deltas[&MetricName::LeafCount], 100.0);
    assert_eq!(b.deltas[&MetricName::LeafCount], 100.0);
    assert!(!a.deltas[&MetricName::LeafCount].is_nan());
    assert_relative_eq!(a.score, 60.0, epsilon = 1e-9);
    assert_eq!(a.score, b.score);
}

// ---------------------------------------------------------------------------
// Bounds and monotonicity
// ---------------------------------------------------------------------------

#[test]
fn test_score_saturates_at_bounds() {
    let scorer = GrowthScorer::default();
    let before = MetricSet {
        color_health_index: 0.5,
        ..baseline()
    };
    let boom = MetricSet {
        bounding_box_area: 10_000_000,
        green_pixel_ratio: 1.0,
        leaf_count: 200,
        color_health_index: 1.0,
        sunlight_proxy: 1.0,
    };
    let gone = MetricSet::default();

    assert_relative_eq!(scorer.score(&before, &boom).score, 100.0, epsilon = 1e-9);
    assert_eq!(scorer.score(&before, &gone).score, 0.0);
    assert_eq!(scorer.score(&before, &boom).suggestion, Suggestion::Excellent);
    assert_eq!(scorer.score(&before, &gone).suggestion, Suggestion::Limited);
}

#[test]
fn test_score_is_monotonic_in_green_ratio() {
    let scorer = GrowthScorer::default();
    let before = baseline();
    let mut last = f64::NEG_INFINITY;
    for step in 0..=20 {
        let after = MetricSet {
            green_pixel_ratio: step as f64 * 0.05,
            ..before
        };
        let score = scorer.score(&before, &after).score;
        assert!(score >= last, "score dropped to {score} at step {step}");
        assert!((0.0..=100.0).contains(&score));
        last = score;
    }
}

#[test]
fn test_scores_stay_in_range_for_arbitrary_pairs() {
    let values = [0.0, 0.001, 0.3, 1.0];
    let scorer = GrowthScorer::default();
    for &a in &values {
        for &b in &values {
            let before = MetricSet {
                bounding_box_area: (a * 90_000.0) as u64,
                green_pixel_ratio: a,
                leaf_count: (a * 10.0) as u32,
                color_health_index: a,
                sunlight_proxy: b,
            };
            let after = MetricSet {
                bounding_box_area: (b * 90_000.0) as u64,
                green_pixel_ratio: b,
                leaf_count: (b * 10.0) as u32,
                color_health_index: b,
                sunlight_proxy: a,
            };
            let score = scorer.score(&before, &after).score;
            assert!((0.0..=100.0).contains(&score), "score={score} for {a} -> {b}");
        }
    }
}

// ---------------------------------------------------------------------------
// Weights, rounding and presentation
// ---------------------------------------------------------------------------

#[test]
fn test_default_weights_sum_to_one() {
    assert_relative_eq!(MetricWeights::default().sum(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_custom_weights_shift_the_score() {
    let weights = MetricWeights {
        bounding_box_area: 0.0,
        green_pixel_ratio: 1.0,
        leaf_count: 0.0,
        color_health_index: 0.0,
        sunlight_proxy: 0.0,
    };
    let before = baseline();
    let after = MetricSet {
        green_pixel_ratio: 0.75,
        leaf_count: 1,
        ..before
    };
    let result = GrowthScorer::new(weights).score(&before, &after);
    assert_relative_eq!(result.score, 75.0, epsilon = 1e-9);
}

#[test]
fn test_rounded_deltas() {
    let before = MetricSet {
        green_pixel_ratio: 0.3,
        ..baseline()
    };
    let after = MetricSet {
        green_pixel_ratio: 0.4,
        ..baseline()
    };
    let result = GrowthScorer::default().score(&before, &after);
    assert_eq!(result.rounded_deltas()[&MetricName::GreenPixelRatio], 33.33);
}

#[test]
fn test_result_serializes_with_snake_case_keys() {
    let result = GrowthScorer::default().score(&baseline(), &baseline());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["deltas"]["green_pixel_ratio"], 0.0);
    assert_eq!(json["suggestion"], "moderate");
}

#[test]
fn test_suggestion_messages_are_distinct() {
    let all = [
        Suggestion::Excellent,
        Suggestion::Good,
        Suggestion::Moderate,
        Suggestion::Limited,
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a.message(), b.message());
        }
    }
    assert!(Suggestion::Excellent.message().starts_with("Excellent growth!"));
}

#[test]
fn test_chart_series() {
    let before = baseline();
    let after = MetricSet {
        green_pixel_ratio: 0.6,
        leaf_count: 6,
        ..before
    };
    let result = GrowthScorer::default().score(&before, &after);
    let [b, a] = chart_data(&before, &after, result.score);

    assert_eq!(b.date, "Before");
    assert_eq!(a.date, "After");
    assert_relative_eq!(b.growth_score, 34.5, epsilon = 1e-9);
    assert_relative_eq!(a.green_pixel_ratio, 60.0, epsilon = 1e-9);
    assert_relative_eq!(b.bounding_box_area, 40.0, epsilon = 1e-9);
    assert_eq!(a.leaf_count, 6.0);

    let json = serde_json::to_value(&a).unwrap();
    assert!(json.get("growthScore").is_some());
}
