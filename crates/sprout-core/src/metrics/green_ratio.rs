use crate::frame::Mask;

use super::bounding_box::tidy_mask;

/// Fraction of the working image covered by plant pixels after a light
/// morphological cleanup. Always in [0, 1]; an empty mask gives 0.
pub fn green_pixel_ratio(mask: &Mask) -> f64 {
    let total = mask.len();
    if total == 0 {
        return 0.0;
    }
    let plant = tidy_mask(mask).iter().filter(|&&v| v).count();
    plant as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn quarter_coverage() {
        let mask = Array2::from_shape_fn((40, 40), |(r, c)| (10..30).contains(&r) && (10..30).contains(&c));
        assert!((green_pixel_ratio(&mask) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_are_zero() {
        assert_eq!(green_pixel_ratio(&Array2::from_elem((0, 0), false)), 0.0);
        assert_eq!(green_pixel_ratio(&Array2::from_elem((10, 10), false)), 0.0);
    }

    #[test]
    fn isolated_pixels_are_ignored() {
        let mut mask = Array2::from_elem((20, 20), false);
        mask[[5, 5]] = true;
        mask[[12, 7]] = true;
        assert_eq!(green_pixel_ratio(&mask), 0.0);
    }
}
