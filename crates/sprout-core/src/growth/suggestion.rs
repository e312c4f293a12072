use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_EXCELLENT, SCORE_GOOD, SCORE_MODERATE};

/// Qualitative growth tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    Excellent,
    Good,
    Moderate,
    Limited,
}

impl Suggestion {
    /// Tier for a growth score: 80 and up is excellent, 60 good, 40
    /// moderate, anything lower limited.
    pub fn from_score(score: f64) -> Self {
        if score >= SCORE_EXCELLENT {
            Self::Excellent
        } else if score >= SCORE_GOOD {
            Self::Good
        } else if score >= SCORE_MODERATE {
            Self::Moderate
        } else {
            Self::Limited
        }
    }

    /// Care advice shown alongside the score.
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excellent growth! Your plant is thriving with strong development across all metrics."
            }
            Self::Good => {
                "Good growth progress. Consider optimizing watering and light conditions for better results."
            }
            Self::Moderate => {
                "Moderate growth detected. Check soil nutrition and ensure adequate sunlight exposure."
            }
            Self::Limited => {
                "Growth appears limited. Review care routine including water, light, and soil conditions."
            }
        }
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Limited => write!(f, "Limited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(Suggestion::from_score(100.0), Suggestion::Excellent);
        assert_eq!(Suggestion::from_score(80.0), Suggestion::Excellent);
        assert_eq!(Suggestion::from_score(79.99), Suggestion::Good);
        assert_eq!(Suggestion::from_score(60.0), Suggestion::Good);
        assert_eq!(Suggestion::from_score(40.0), Suggestion::Moderate);
        assert_eq!(Suggestion::from_score(39.9), Suggestion::Limited);
        assert_eq!(Suggestion::from_score(0.0), Suggestion::Limited);
    }
}
