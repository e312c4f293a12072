use tracing::debug;

use crate::detection::{closing, external_contours, opening, BoundingBox, StructuringElement};
use crate::frame::Mask;

use super::config::MetricConfig;

/// One round of 3x3 opening then closing, shared by the size metrics.
pub(crate) fn tidy_mask(mask: &Mask) -> Mask {
    let kernel = StructuringElement::rect(3);
    closing(&opening(mask, &kernel, 1), &kernel, 1)
}

/// Bounding rectangle of the largest plausible plant contour.
///
/// Contours under the minimum area or outside the aspect window are
/// skipped. `None` when nothing survives.
pub fn plant_bounding_box(mask: &Mask, config: &MetricConfig) -> Option<BoundingBox> {
    let cleaned = tidy_mask(mask);
    let contours = external_contours(&cleaned);
    let total = contours.len();

    let best = contours
        .into_iter()
        .filter(|c| c.area() >= config.min_contour_area)
        .filter(|c| {
            let aspect = c.bbox.aspect_ratio();
            aspect >= config.min_aspect_ratio && aspect <= config.max_aspect_ratio
        })
        .max_by(|a, b| a.area().total_cmp(&b.area()));

    debug!(
        contours = total,
        chosen = ?best.as_ref().map(|c| c.bbox),
        "Bounding box search"
    );
    best.map(|c| c.bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn rect_mask(h: usize, w: usize, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> Mask {
        Array2::from_shape_fn((h, w), |(r, c)| rows.contains(&r) && cols.contains(&c))
    }

    #[test]
    fn picks_largest_region() {
        let mut mask = rect_mask(60, 60, 5..20, 5..20);
        for r in 30..55 {
            for c in 30..50 {
                mask[[r, c]] = true;
            }
        }
        let bbox = plant_bounding_box(&mask, &MetricConfig::default()).unwrap();
        assert_eq!(bbox, BoundingBox { x: 30, y: 30, width: 20, height: 25 });
        assert_eq!(bbox.area(), 500);
    }

    #[test]
    fn thin_lines_are_rejected() {
        // 2 px tall: removed by the opening.
        let mask = rect_mask(40, 200, 10..12, 5..195);
        assert!(plant_bounding_box(&mask, &MetricConfig::default()).is_none());
    }

    #[test]
    fn elongated_blobs_fail_the_aspect_window() {
        // 5x120: aspect 24, well outside [0.1, 10].
        let mask = rect_mask(40, 200, 10..15, 20..140);
        assert!(plant_bounding_box(&mask, &MetricConfig::default()).is_none());
    }

    #[test]
    fn small_regions_are_ignored() {
        let mask = rect_mask(40, 40, 10..18, 10..18);
        assert!(plant_bounding_box(&mask, &MetricConfig::default()).is_none());
    }
}
