mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use sprout_core::detection::watershed::{UNKNOWN, WATERSHED_LINE};
use sprout_core::detection::{
    connected_components, dilate, distance_transform, erode, external_contours, label_components,
    remove_small_components, watershed, StructuringElement,
};

use common::{count, disc_mask};

fn block(h: usize, w: usize, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> Array2<bool> {
    Array2::from_shape_fn((h, w), |(r, c)| rows.contains(&r) && cols.contains(&c))
}

// ---------------------------------------------------------------------------
// Connected components
// ---------------------------------------------------------------------------

#[test]
fn test_components_are_counted_and_measured() {
    let mut mask = block(30, 30, 2..6, 2..6);
    mask |= &block(30, 30, 10..20, 15..25);
    let stats = connected_components(&mask);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].area, 16);
    assert_eq!(stats[1].area, 100);
    assert_eq!(stats[1].bbox, (10, 19, 15, 24));
    assert_eq!(stats[1].bbox_width(), 10);
}

#[test]
fn test_diagonal_pixels_are_connected() {
    let mut mask = Array2::from_elem((5, 5), false);
    mask[[1, 1]] = true;
    mask[[2, 2]] = true;
    mask[[3, 3]] = true;
    let (labels, stats) = label_components(&mask);
    assert_eq!(stats.len(), 1);
    assert_eq!(labels[[3, 3]], 1);
    assert_eq!(labels[[0, 0]], 0);
}

#[test]
fn test_small_components_are_removed() {
    let mut mask = block(30, 30, 0..3, 0..3);
    mask |= &block(30, 30, 10..25, 10..25);
    let cleaned = remove_small_components(&mask, 100);
    assert_eq!(count(&cleaned), 225);
    assert!(!cleaned[[1, 1]]);
}

// ---------------------------------------------------------------------------
// Contours
// ---------------------------------------------------------------------------

#[test]
fn test_square_contour_geometry() {
    let mask = block(20, 20, 5..15, 3..13);
    let contours = external_contours(&mask);
    assert_eq!(contours.len(), 1);
    let c = &contours[0];
    assert_eq!(c.pixel_area, 100);
    assert_eq!((c.bbox.x, c.bbox.y, c.bbox.width, c.bbox.height), (3, 5, 10, 10));
    assert_abs_diff_eq!(c.area(), 81.0, epsilon = 1e-9);
    assert_abs_diff_eq!(c.perimeter(), 36.0, epsilon = 1e-9);
}

#[test]
fn test_disc_is_round_and_ribbon_is_not() {
    let disc = disc_mask(100, 100, &[((50.0, 50.0), 30.0)]);
    let round = external_contours(&disc)[0].circularity();
    assert!(round > 0.8, "disc circularity {round}");

    let ribbon = block(100, 100, 40..42, 5..95);
    let thin = external_contours(&ribbon)[0].circularity();
    assert!(thin < 0.1, "ribbon circularity {thin}");
}

// ---------------------------------------------------------------------------
// Morphology
// ---------------------------------------------------------------------------

#[test]
fn test_erode_then_dilate_block() {
    let mask = block(20, 20, 5..15, 5..15);
    let kernel = StructuringElement::rect(3);
    let eroded = erode(&mask, &kernel, 1);
    assert_eq!(count(&eroded), 64);
    assert_eq!(dilate(&eroded, &kernel, 1), mask);
}

#[test]
fn test_ellipse_kernel_is_a_cross_at_three() {
    assert_eq!(StructuringElement::ellipse(3).len(), 5);
    assert_eq!(StructuringElement::rect(3).len(), 9);
}

// ---------------------------------------------------------------------------
// Distance transform and watershed
// ---------------------------------------------------------------------------

#[test]
fn test_distance_to_background() {
    let mask = block(7, 7, 1..6, 1..6);
    let dist = distance_transform(&mask);
    assert_abs_diff_eq!(dist[[3, 3]], 3.0, epsilon = 1e-5);
    assert_abs_diff_eq!(dist[[1, 3]], 1.0, epsilon = 1e-5);
    assert_eq!(dist[[0, 0]], 0.0);
}

#[test]
fn test_watershed_splits_two_seeds() {
    let relief = Array2::<u8>::zeros((20, 20));
    let mut markers = Array2::<i32>::zeros((20, 20));
    markers[[10, 5]] = 1;
    markers[[10, 14]] = 2;

    watershed(&relief, &mut markers).unwrap();

    assert_eq!(markers[[10, 3]], 1);
    assert_eq!(markers[[10, 16]], 2);
    assert_eq!(markers[[0, 0]], WATERSHED_LINE);
    for r in 1..19 {
        for c in 1..19 {
            assert_ne!(markers[[r, c]], UNKNOWN, "unresolved pixel ({r}, {c})");
        }
    }
}

#[test]
fn test_watershed_rejects_tiny_images() {
    let relief = Array2::<u8>::zeros((2, 2));
    let mut markers = Array2::<i32>::zeros((2, 2));
    assert!(watershed(&relief, &mut markers).is_err());
}
