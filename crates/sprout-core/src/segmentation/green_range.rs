use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::color::HsvPlanes;
use crate::consts::{
    HEALTHY_GREEN_HSV, HIGH_CONFIDENCE_HUE, HIGH_CONFIDENCE_MIN_SATURATION,
    HIGH_CONFIDENCE_MIN_VALUE, HISTOGRAM_MIN_SATURATION, HISTOGRAM_MIN_VALUE,
    HISTOGRAM_SMOOTHING_WIDTH, HUE_BINS, HUE_MARGIN_NARROW, HUE_MARGIN_WIDE,
    MEDIUM_CONFIDENCE_HUE, MEDIUM_CONFIDENCE_MIN_SATURATION, MEDIUM_CONFIDENCE_MIN_VALUE,
    PEAK_CENTER_SATURATION, PEAK_CENTER_VALUE, PEAK_CORROBORATION_DISTANCE, PEAK_GREEN_HUE,
    SV_MARGIN_BASE, SV_MARGIN_EXTRA, UNCORROBORATED_PULL,
};
use crate::error::{Result, SproutError};
use crate::filters::{bilateral_filter, clahe, resize_area};
use crate::frame::RgbFrame;

use super::bounds::{BoundsSource, ColorBounds, GreenRangeEstimate};
use super::config::{GreenRangeConfig, SmoothingConfig, WorkingSize};
use super::kmeans::kmeans;
use super::peaks::{find_peaks, smooth};

/// How sure we are that a cluster center is plant green.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GreenConfidence {
    Medium,
    High,
}

/// A cluster center that passed one of the green bands.
#[derive(Clone, Copy, Debug)]
pub struct GreenCandidate {
    pub center: [f32; 3],
    pub confidence: GreenConfidence,
}

/// Estimates the HSV interval that selects plant pixels in one photo.
///
/// Never fails: anything that goes wrong maps to the configured static
/// bounds, recorded in the returned [`GreenRangeEstimate`].
#[derive(Clone, Debug, Default)]
pub struct GreenRangeEstimator {
    pub config: GreenRangeConfig,
    pub working_size: WorkingSize,
    pub smoothing: SmoothingConfig,
}

impl GreenRangeEstimator {
    pub fn new(config: GreenRangeConfig, working_size: WorkingSize, smoothing: SmoothingConfig) -> Self {
        Self {
            config,
            working_size,
            smoothing,
        }
    }

    /// Same estimator with a different clustering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Bounds only.
    pub fn estimate(&self, image: &RgbFrame) -> ColorBounds {
        self.estimate_detailed(image).bounds
    }

    pub fn estimate_detailed(&self, image: &RgbFrame) -> GreenRangeEstimate {
        match self.try_estimate(image) {
            Ok(estimate) => estimate,
            Err(e) => {
                warn!(error = %e, "Green range estimation failed; using static bounds");
                GreenRangeEstimate::fallback(self.config.fallback, e.to_string())
            }
        }
    }

    fn try_estimate(&self, image: &RgbFrame) -> Result<GreenRangeEstimate> {
        if image.is_empty() {
            return Err(SproutError::EmptyImage);
        }

        let resized = resize_area(image, self.working_size.width, self.working_size.height);
        let smoothed = bilateral_filter(
            &resized,
            self.smoothing.bilateral_diameter,
            self.smoothing.sigma_color,
            self.smoothing.sigma_space,
        );

        let mut hsv = HsvPlanes::from_frame(&smoothed);
        hsv.value = clahe(&hsv.value, self.config.clahe_clip_limit, self.config.clahe_tiles);
        if self.config.equalize_saturation {
            hsv.saturation = clahe(&hsv.saturation, self.config.clahe_clip_limit, self.config.clahe_tiles);
        }

        let samples = self.sample_pixels(&hsv);
        let clustering = kmeans(
            &samples,
            self.config.cluster_count,
            self.config.seed,
            self.config.max_iterations,
        )?;
        let candidates = rank_green_clusters(&clustering.centers, &clustering.sizes);
        let peaks = green_hue_peaks(&hsv, self.config.peak_distance, self.config.peak_prominence);

        debug!(
            samples = samples.len(),
            iterations = clustering.iterations,
            centers = ?clustering.centers,
            green_candidates = candidates.len(),
            peaks = ?peaks,
            "Green range clustering complete"
        );

        let (center, source) = if let Some(best) = candidates.first() {
            let corroborated = peaks
                .iter()
                .any(|&p| (p as f32 - best.center[0]).abs() <= PEAK_CORROBORATION_DISTANCE);
            if corroborated {
                (best.center, BoundsSource::CorroboratedCluster)
            } else {
                (pull_toward_healthy(best.center), BoundsSource::Cluster)
            }
        } else if let Some(&peak) = peaks.first() {
            (
                [peak as f32, PEAK_CENTER_SATURATION, PEAK_CENTER_VALUE],
                BoundsSource::HistogramPeak,
            )
        } else {
            warn!("No green cluster or hue peak found; using static bounds");
            let mut estimate = GreenRangeEstimate::fallback(
                self.config.fallback,
                "no green cluster or hue peak",
            );
            estimate.hue_peaks = peaks;
            return Ok(estimate);
        };

        let bounds = adaptive_bounds(center);
        debug!(?source, ?center, %bounds, "Green range estimated");

        Ok(GreenRangeEstimate {
            bounds,
            source,
            center: Some(center),
            hue_peaks: peaks,
            degradation: None,
        })
    }

    /// Non-black pixels as HSV points, subsampled with the configured seed
    /// when there are more than `max_samples`.
    fn sample_pixels(&self, hsv: &HsvPlanes) -> Vec<[f32; 3]> {
        let (h, w) = hsv.dim();
        let eligible: Vec<[f32; 3]> = (0..h)
            .flat_map(|r| (0..w).map(move |c| (r, c)))
            .map(|(r, c)| hsv.pixel(r, c))
            .filter(|px| px[2] > self.config.near_black_value)
            .map(|px| px.map(f32::from))
            .collect();

        if eligible.len() <= self.config.max_samples {
            return eligible;
        }

        // Offset the seed so sampling and k-means++ draw independent streams.
        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(1));
        let mut picked = rand::seq::index::sample(&mut rng, eligible.len(), self.config.max_samples).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| eligible[i]).collect()
    }
}

/// Classify a cluster center against the two green bands.
pub fn classify_green(center: &[f32; 3]) -> Option<GreenConfidence> {
    let [h, s, v] = *center;
    if (HIGH_CONFIDENCE_HUE.0..=HIGH_CONFIDENCE_HUE.1).contains(&h)
        && s >= HIGH_CONFIDENCE_MIN_SATURATION
        && v >= HIGH_CONFIDENCE_MIN_VALUE
    {
        Some(GreenConfidence::High)
    } else if (MEDIUM_CONFIDENCE_HUE.0..=MEDIUM_CONFIDENCE_HUE.1).contains(&h)
        && s >= MEDIUM_CONFIDENCE_MIN_SATURATION
        && v >= MEDIUM_CONFIDENCE_MIN_VALUE
    {
        Some(GreenConfidence::Medium)
    } else {
        None
    }
}

/// Green candidates among non-empty clusters, best first: higher confidence,
/// then higher saturation.
pub fn rank_green_clusters(centers: &[[f32; 3]], sizes: &[usize]) -> Vec<GreenCandidate> {
    let mut candidates: Vec<GreenCandidate> = centers
        .iter()
        .zip(sizes)
        .filter(|(_, &n)| n > 0)
        .filter_map(|(c, _)| {
            classify_green(c).map(|confidence| GreenCandidate {
                center: *c,
                confidence,
            })
        })
        .collect();
    candidates.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then(b.center[1].total_cmp(&a.center[1]))
    });
    candidates
}

/// Dominant hues inside the plausible green window, tallest first.
///
/// Only pixels with meaningful saturation and value vote; the histogram is
/// smoothed before peak detection.
pub fn green_hue_peaks(hsv: &HsvPlanes, distance: usize, prominence: f32) -> Vec<usize> {
    let mut hist = vec![0.0f32; HUE_BINS];
    for ((&h, &s), &v) in hsv.hue.iter().zip(hsv.saturation.iter()).zip(hsv.value.iter()) {
        if s >= HISTOGRAM_MIN_SATURATION && v >= HISTOGRAM_MIN_VALUE {
            hist[(h as usize).min(HUE_BINS - 1)] += 1.0;
        }
    }
    let smoothed = smooth(&hist, HISTOGRAM_SMOOTHING_WIDTH);

    let mut peaks: Vec<usize> = find_peaks(&smoothed, distance, prominence)
        .into_iter()
        .filter(|&p| (PEAK_GREEN_HUE.0..=PEAK_GREEN_HUE.1).contains(&p))
        .collect();
    peaks.sort_by(|&a, &b| smoothed[b].total_cmp(&smoothed[a]));
    peaks
}

/// Move a center part of the way toward the healthy-green reference.
pub fn pull_toward_healthy(center: [f32; 3]) -> [f32; 3] {
    let mut out = center;
    for (o, r) in out.iter_mut().zip(HEALTHY_GREEN_HSV) {
        *o += UNCORROBORATED_PULL * (r - *o);
    }
    out
}

/// Bounds around `center` with saturation-dependent margins.
///
/// The hue margin tightens as saturation rises. Saturation and value
/// margins widen as their own channel gets lower. Upper saturation and value
/// are always fully open.
pub fn adaptive_bounds(center: [f32; 3]) -> ColorBounds {
    let [h, s, v] = center;
    let sat_frac = (s / 255.0).clamp(0.0, 1.0);
    let val_frac = (v / 255.0).clamp(0.0, 1.0);

    let hue_margin = HUE_MARGIN_WIDE - (HUE_MARGIN_WIDE - HUE_MARGIN_NARROW) * sat_frac;
    let sat_margin = SV_MARGIN_BASE + SV_MARGIN_EXTRA * (1.0 - sat_frac);
    let val_margin = SV_MARGIN_BASE + SV_MARGIN_EXTRA * (1.0 - val_frac);

    ColorBounds::clamped(
        [h - hue_margin, s - sat_margin, v - val_margin],
        [h + hue_margin, 255.0, 255.0],
    )
}
