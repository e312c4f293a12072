use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::{MetricName, MetricSet};

use super::suggestion::Suggestion;
use super::weights::MetricWeights;

/// Outcome of comparing two metric sets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    /// Growth score in [0, 100]; 50 means no change.
    pub score: f64,
    /// Signed percentage change per metric.
    pub deltas: BTreeMap<MetricName, f64>,
    pub suggestion: Suggestion,
}

impl GrowthResult {
    /// Deltas rounded to two decimals, for display.
    pub fn rounded_deltas(&self) -> BTreeMap<MetricName, f64> {
        self.deltas
            .iter()
            .map(|(&name, &d)| (name, round_to(d, 2)))
            .collect()
    }

    /// Score rounded to one decimal, for display.
    pub fn rounded_score(&self) -> f64 {
        round_to(self.score, 1)
    }
}

fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

/// Percentage change from `before` to `after`.
///
/// A zero (or negative) baseline has no meaningful ratio: the delta is 0
/// when `after` is also zero and a full +100 otherwise.
pub fn percentage_delta(before: f64, after: f64) -> f64 {
    if before > 0.0 {
        (after - before) / before * 100.0
    } else if after == 0.0 {
        0.0
    } else {
        100.0
    }
}

/// Turns before/after metric sets into a single growth score.
#[derive(Clone, Debug, Default)]
pub struct GrowthScorer {
    pub weights: MetricWeights,
}

impl GrowthScorer {
    pub fn new(weights: MetricWeights) -> Self {
        Self { weights }
    }

    /// Weighted, bounded growth score.
    ///
    /// Each delta is normalized to [-1, 1] (saturating beyond +/-100%), the
    /// weighted sum is mapped from [-1, 1] onto [0, 100].
    pub fn score(&self, before: &MetricSet, after: &MetricSet) -> GrowthResult {
        let mut deltas = BTreeMap::new();
        let mut accumulator = 0.0f64;

        for name in MetricName::ALL {
            let delta = percentage_delta(before.get(name), after.get(name));
            let normalized = (delta / 100.0).clamp(-1.0, 1.0);
            accumulator += self.weights.get(name) * normalized;
            deltas.insert(name, delta);
        }

        let score = ((accumulator + 1.0) * 50.0).clamp(0.0, 100.0);
        let suggestion = Suggestion::from_score(score);
        debug!(accumulator, score, %suggestion, "Growth scored");

        GrowthResult {
            score,
            deltas,
            suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_baseline_rule() {
        assert_eq!(percentage_delta(0.0, 0.0), 0.0);
        assert_eq!(percentage_delta(0.0, 1e-9), 100.0);
        assert_eq!(percentage_delta(0.0, 5000.0), 100.0);
        assert_eq!(percentage_delta(4.0, 2.0), -50.0);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round_to(54.449, 1), 54.4);
        assert_eq!(round_to(-12.345_67, 2), -12.35);
    }
}
