use ndarray::Array2;
use tracing::debug;

use crate::consts::{
    SEED_FRACTION_MAX, SEED_FRACTION_MIN, SEED_FRACTION_SLOPE, SURE_BACKGROUND_DILATIONS,
};
use crate::detection::watershed::{UNKNOWN, WATERSHED_LINE};
use crate::detection::{
    contour_of, dilate, distance_transform, label_components, opening, watershed,
    StructuringElement,
};
use crate::error::Result;
use crate::frame::Mask;

use super::config::MetricConfig;

/// Background label after seeding (connected-component labels shifted by one).
const BACKGROUND: i32 = 1;

/// Watershed leaf segmentation of one plant mask.
#[derive(Clone, Debug)]
pub struct LeafSegmentation {
    /// Flooded label image: [`WATERSHED_LINE`] on ridges and the frame, 1 for
    /// background, 2.. for candidate leaves.
    pub markers: Array2<i32>,
    /// Labels that passed the area and circularity filters.
    pub leaves: Vec<i32>,
}

impl LeafSegmentation {
    pub fn count(&self) -> u32 {
        self.leaves.len() as u32
    }
}

/// Distance threshold, as a fraction of the peak distance, used to seed
/// leaf cores. Thicker blobs get a higher fraction so touching leaves
/// separate.
pub fn seed_fraction(max_distance: f32) -> f32 {
    (SEED_FRACTION_MIN + SEED_FRACTION_SLOPE * max_distance).clamp(SEED_FRACTION_MIN, SEED_FRACTION_MAX)
}

/// Number of leaves in `mask`. See [`segment_leaves`].
pub fn count_leaves(mask: &Mask, config: &MetricConfig) -> Result<u32> {
    segment_leaves(mask, config).map(|s| s.count())
}

/// Split the plant into leaf regions with a distance-seeded watershed.
///
/// The mask is opened, its distance transform thresholded into leaf cores,
/// and the band between the cores and a dilated mask left for the flood to
/// resolve. Regions smaller than `min_leaf_area` or not rounder than
/// `min_circularity` are discarded.
pub fn segment_leaves(mask: &Mask, config: &MetricConfig) -> Result<LeafSegmentation> {
    let kernel = StructuringElement::rect(3);
    let cleaned = opening(mask, &kernel, 2);
    let sure_bg = dilate(&cleaned, &kernel, SURE_BACKGROUND_DILATIONS);

    let dist = distance_transform(&cleaned);
    let max_dist = dist.iter().copied().fold(0.0f32, f32::max);
    let fraction = seed_fraction(max_dist);
    let threshold = fraction * max_dist;
    let sure_fg: Mask = dist.mapv(|d| max_dist > 0.0 && d > threshold);

    let (seed_labels, seeds) = label_components(&sure_fg);
    let mut markers = Array2::from_shape_fn(mask.dim(), |idx| {
        if sure_bg[idx] && !sure_fg[idx] {
            UNKNOWN
        } else {
            seed_labels[idx] as i32 + BACKGROUND
        }
    });

    let relief = cleaned.mapv(|v| if v { 255u8 } else { 0 });
    watershed(&relief, &mut markers)?;

    let leaves = filter_regions(&markers, config);
    debug!(
        max_distance = max_dist,
        fraction,
        seeds = seeds.len(),
        leaves = leaves.len(),
        "Leaf segmentation"
    );

    Ok(LeafSegmentation { markers, leaves })
}

fn filter_regions(markers: &Array2<i32>, config: &MetricConfig) -> Vec<i32> {
    let mut labels: Vec<i32> = markers
        .iter()
        .copied()
        .filter(|&l| l != WATERSHED_LINE && l != UNKNOWN && l != BACKGROUND)
        .collect();
    labels.sort_unstable();
    labels.dedup();

    labels
        .into_iter()
        .filter(|&label| {
            let region = markers.mapv(|m| m == label);
            let area = region.iter().filter(|&&v| v).count();
            if area < config.min_leaf_area {
                return false;
            }
            let (region_labels, parts) = label_components(&region);
            parts
                .iter()
                .max_by_key(|p| p.area)
                .map(|p| contour_of(&region_labels, p).circularity() > config.min_circularity)
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(mask: &mut Mask, center: (f64, f64), radius: f64) {
        let (h, w) = mask.dim();
        for r in 0..h {
            for c in 0..w {
                let dr = r as f64 - center.0;
                let dc = c as f64 - center.1;
                if dr * dr + dc * dc <= radius * radius {
                    mask[[r, c]] = true;
                }
            }
        }
    }

    #[test]
    fn seed_fraction_is_bounded() {
        assert_eq!(seed_fraction(0.0), SEED_FRACTION_MIN);
        assert!((seed_fraction(10.0) - 0.4).abs() < 1e-6);
        assert_eq!(seed_fraction(1000.0), SEED_FRACTION_MAX);
    }

    #[test]
    fn empty_mask_has_no_leaves() {
        let mask = Array2::from_elem((50, 50), false);
        assert_eq!(count_leaves(&mask, &MetricConfig::default()).unwrap(), 0);
    }

    #[test]
    fn separate_discs_are_separate_leaves() {
        let mut mask = Array2::from_elem((80, 120), false);
        disc(&mut mask, (40.0, 30.0), 15.0);
        disc(&mut mask, (40.0, 90.0), 15.0);
        assert_eq!(count_leaves(&mask, &MetricConfig::default()).unwrap(), 2);
    }

    #[test]
    fn tiny_blobs_are_not_leaves() {
        let mut mask = Array2::from_elem((60, 60), false);
        disc(&mut mask, (30.0, 30.0), 4.0);
        assert_eq!(count_leaves(&mask, &MetricConfig::default()).unwrap(), 0);
    }

    #[test]
    fn undersized_mask_is_an_error() {
        let mask = Array2::from_elem((2, 2), true);
        assert!(count_leaves(&mask, &MetricConfig::default()).is_err());
    }
}
