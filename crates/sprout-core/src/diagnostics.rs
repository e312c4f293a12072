//! Structured record of every fallback the pipeline takes.
//!
//! Fallbacks never change the values a stage returns; they are listed here
//! so callers can tell a genuinely empty result from a degraded one.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// The green range estimator returned the static bounds.
    StaticGreenBounds { reason: String },
    /// The input image had no pixels; outputs are all-zero.
    EmptyInput,
    /// The plant mask selected no pixels.
    EmptyMask,
    /// Leaf counting failed and reported zero leaves.
    LeafCountFailed { reason: String },
    /// Metric extraction failed and returned the all-default set.
    ExtractionFailed { reason: String },
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaticGreenBounds { reason } => write!(f, "static green bounds ({reason})"),
            Self::EmptyInput => write!(f, "empty input image"),
            Self::EmptyMask => write!(f, "empty plant mask"),
            Self::LeafCountFailed { reason } => write!(f, "leaf count failed ({reason})"),
            Self::ExtractionFailed { reason } => write!(f, "metric extraction failed ({reason})"),
        }
    }
}
