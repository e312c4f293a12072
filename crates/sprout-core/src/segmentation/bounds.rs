use serde::{Deserialize, Serialize};

use crate::consts::{HUE_MAX, STATIC_GREEN_LOWER, STATIC_GREEN_UPPER};
use crate::diagnostics::Degradation;

/// Inclusive HSV interval (8-bit encoding, hue 0..=179).
///
/// Constructed through [`ColorBounds::clamped`], which keeps every component
/// in its legal range and `lower <= upper` componentwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorBounds {
    /// Clamp raw bounds into range and order each component pair.
    pub fn clamped(lower: [f32; 3], upper: [f32; 3]) -> Self {
        let max = [HUE_MAX as f32, 255.0, 255.0];
        let mut lo = [0u8; 3];
        let mut hi = [0u8; 3];
        for i in 0..3 {
            let a = clamp_component(lower[i], max[i]);
            let b = clamp_component(upper[i], max[i]);
            lo[i] = a.min(b);
            hi[i] = a.max(b);
        }
        Self { lower: lo, upper: hi }
    }

    /// Fixed bounds used whenever estimation fails.
    pub fn static_fallback() -> Self {
        Self {
            lower: STATIC_GREEN_LOWER,
            upper: STATIC_GREEN_UPPER,
        }
    }

    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

impl Default for ColorBounds {
    fn default() -> Self {
        Self::static_fallback()
    }
}

impl std::fmt::Display for ColorBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [lh, ls, lv] = self.lower;
        let [uh, us, uv] = self.upper;
        write!(f, "H {lh}-{uh}, S {ls}-{us}, V {lv}-{uv}")
    }
}

fn clamp_component(v: f32, max: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.round().clamp(0.0, max) as u8
    }
}

/// Where the chosen bounds came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsSource {
    /// A green cluster confirmed by a hue histogram peak.
    CorroboratedCluster,
    /// A green cluster without histogram support, pulled toward the
    /// healthy-green reference.
    Cluster,
    /// No green cluster; center synthesized from a hue histogram peak.
    HistogramPeak,
    /// Static bounds.
    StaticFallback,
}

impl std::fmt::Display for BoundsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorroboratedCluster => write!(f, "Corroborated cluster"),
            Self::Cluster => write!(f, "Cluster"),
            Self::HistogramPeak => write!(f, "Histogram peak"),
            Self::StaticFallback => write!(f, "Static fallback"),
        }
    }
}

/// Green range estimate together with how it was reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GreenRangeEstimate {
    pub bounds: ColorBounds,
    pub source: BoundsSource,
    /// HSV center the bounds were built around, if any.
    pub center: Option<[f32; 3]>,
    /// Green-window hue peaks found in the histogram, tallest first.
    pub hue_peaks: Vec<usize>,
    pub degradation: Option<Degradation>,
}

impl GreenRangeEstimate {
    pub fn fallback(bounds: ColorBounds, reason: impl Into<String>) -> Self {
        Self {
            bounds,
            source: BoundsSource::StaticFallback,
            center: None,
            hue_peaks: Vec::new(),
            degradation: Some(Degradation::StaticGreenBounds {
                reason: reason.into(),
            }),
        }
    }
}
