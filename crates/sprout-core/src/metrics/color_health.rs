use serde::{Deserialize, Serialize};

use crate::color::{rgb_to_hsv, rgb_to_lab};
use crate::consts::{
    BRIGHTNESS_TARGET, CANONICAL_GREEN_HUE, CHI_WEIGHTS, HUE_CLOSENESS_SPAN, HUE_STD_SPAN,
    LAB_GREEN_SPAN, SATURATION_STD_SPAN,
};
use crate::frame::{Mask, RgbFrame};

/// Intermediate values behind a color health index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorHealthBreakdown {
    pub pixel_count: usize,
    pub mean_hue: f64,
    pub mean_saturation: f64,
    pub mean_value: f64,
    /// Mean Lab a-channel (8-bit, 128 = neutral).
    pub mean_lab_a: f64,
    pub hue_std: f64,
    pub saturation_std: f64,
    pub hue_score: f64,
    pub saturation_score: f64,
    pub brightness_score: f64,
    pub lab_green_score: f64,
    pub hue_consistency: f64,
    pub saturation_consistency: f64,
    /// Weighted index in [0, 1].
    pub index: f64,
}

/// Running mean and population variance (Welford).
#[derive(Default)]
struct Moments {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Moments {
    fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn std(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            (self.m2 / self.n as f64).sqrt()
        }
    }
}

/// Color health of the plant pixels of `image`.
///
/// Six sub-scores, each clamped to [0, 1], are combined with fixed weights:
/// hue closeness to canonical green, saturation, brightness closeness to
/// mid-gray, Lab green intensity, hue consistency and saturation
/// consistency. An empty mask scores 0.
pub fn color_health(image: &RgbFrame, mask: &Mask) -> ColorHealthBreakdown {
    let mut hue = Moments::default();
    let mut sat = Moments::default();
    let mut val = Moments::default();
    let mut lab_a = Moments::default();

    for ((row, col), _) in mask.indexed_iter().filter(|(_, v)| **v) {
        let rgb = image.pixel(row, col);
        let [h, s, v] = rgb_to_hsv(rgb);
        let [_, a, _] = rgb_to_lab(rgb);
        hue.push(f64::from(h));
        sat.push(f64::from(s));
        val.push(f64::from(v));
        lab_a.push(f64::from(a));
    }

    if hue.n == 0 {
        return ColorHealthBreakdown::default();
    }

    let hue_score = unit(1.0 - (hue.mean - CANONICAL_GREEN_HUE).abs() / HUE_CLOSENESS_SPAN);
    let saturation_score = unit(sat.mean / 255.0);
    let brightness_score = unit(1.0 - (val.mean - BRIGHTNESS_TARGET).abs() / BRIGHTNESS_TARGET);
    let lab_green_score = unit((128.0 - lab_a.mean) / LAB_GREEN_SPAN);
    let hue_consistency = unit(1.0 - hue.std() / HUE_STD_SPAN);
    let saturation_consistency = unit(1.0 - sat.std() / SATURATION_STD_SPAN);

    let scores = [
        hue_score,
        saturation_score,
        brightness_score,
        lab_green_score,
        hue_consistency,
        saturation_consistency,
    ];
    let index = unit(scores.iter().zip(CHI_WEIGHTS).map(|(s, w)| s * w).sum());

    ColorHealthBreakdown {
        pixel_count: hue.n,
        mean_hue: hue.mean,
        mean_saturation: sat.mean,
        mean_value: val.mean,
        mean_lab_a: lab_a.mean,
        hue_std: hue.std(),
        saturation_std: sat.std(),
        hue_score,
        saturation_score,
        brightness_score,
        lab_green_score,
        hue_consistency,
        saturation_consistency,
        index,
    }
}

#[inline]
fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn full_mask(h: usize, w: usize) -> Mask {
        Array2::from_elem((h, w), true)
    }

    #[test]
    fn empty_mask_scores_zero() {
        let image = RgbFrame::filled(10, 10, [40, 160, 40]);
        let mask = Array2::from_elem((10, 10), false);
        assert_eq!(color_health(&image, &mask).index, 0.0);
    }

    #[test]
    fn uniform_green_is_perfectly_consistent() {
        let image = RgbFrame::filled(10, 10, [40, 160, 40]);
        let b = color_health(&image, &full_mask(10, 10));
        assert_eq!(b.hue_consistency, 1.0);
        assert_eq!(b.saturation_consistency, 1.0);
        assert_eq!(b.hue_score, 1.0);
        assert!(b.lab_green_score > 0.5);
        assert!(b.index > 0.7 && b.index <= 1.0);
    }

    #[test]
    fn green_beats_brown() {
        let green = RgbFrame::filled(10, 10, [50, 150, 40]);
        let brown = RgbFrame::filled(10, 10, [120, 80, 40]);
        let mask = full_mask(10, 10);
        assert!(color_health(&green, &mask).index > color_health(&brown, &mask).index);
    }

    #[test]
    fn moments_match_population_std() {
        let mut m = Moments::default();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            m.push(x);
        }
        assert!((m.mean - 5.0).abs() < 1e-12);
        assert!((m.std() - 2.0).abs() < 1e-12);
    }
}
