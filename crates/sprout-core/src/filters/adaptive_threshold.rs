use ndarray::Array2;

use super::gaussian_blur::gaussian_blur_sized;

/// Local adaptive threshold with a Gaussian-weighted window.
///
/// A pixel is set when it is brighter than its `block_size` x `block_size`
/// Gaussian-weighted neighbourhood mean minus `offset`. Because the
/// reference is local, uneven illumination across the frame does not shift
/// the decision.
pub fn adaptive_threshold(plane: &Array2<u8>, block_size: usize, offset: f32) -> Array2<bool> {
    let (h, w) = plane.dim();
    if h == 0 || w == 0 {
        return Array2::from_elem((h, w), false);
    }

    let src = plane.mapv(f32::from);
    let local_mean = gaussian_blur_sized(&src, block_size);

    Array2::from_shape_fn((h, w), |(r, c)| {
        src[[r, c]] > local_mean[[r, c]].round() - offset
    })
}
