use ndarray::{Array2, Array3};
use rayon::prelude::*;

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::RgbFrame;

/// Sigma implied by a kernel size when none is given explicitly.
pub fn sigma_for_kernel(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Blur an RGB frame with a `ksize` x `ksize` Gaussian kernel.
///
/// Each channel is convolved separately; results are rounded back to 8 bits.
pub fn gaussian_blur_rgb(frame: &RgbFrame, ksize: usize) -> RgbFrame {
    if frame.is_empty() {
        return frame.clone();
    }
    let kernel = make_sized_kernel(ksize, sigma_for_kernel(ksize));
    let (h, w) = frame.dim();
    let mut data = Array3::<u8>::zeros((h, w, COLOR_CHANNEL_COUNT));

    for ch in 0..COLOR_CHANNEL_COUNT {
        let plane = frame.channel(ch).mapv(f32::from);
        let blurred = convolve_cols(&convolve_rows(&plane, &kernel), &kernel);
        for ((row, col), v) in blurred.indexed_iter() {
            data[[row, col, ch]] = v.round().clamp(0.0, 255.0) as u8;
        }
    }

    RgbFrame::new(data)
}

/// Apply Gaussian blur to a raw array, kernel radius derived from sigma.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = make_gaussian_kernel(sigma);
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

/// Apply a `ksize`-tap Gaussian to a raw array.
pub fn gaussian_blur_sized(data: &Array2<f32>, ksize: usize) -> Array2<f32> {
    let kernel = make_sized_kernel(ksize, sigma_for_kernel(ksize));
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    make_sized_kernel(2 * radius + 1, sigma)
}

fn make_sized_kernel(size: usize, sigma: f32) -> Vec<f32> {
    let size = size.max(1) | 1;
    let radius = size / 2;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_fn = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_col =
                        (col as isize + ki as isize - radius as isize).clamp(0, w as isize - 1) as usize;
                    sum += data[[row, src_col]] * kv;
                }
                sum
            })
            .collect()
    };

    collect_rows(h, w, row_fn)
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_fn = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_row =
                        (row as isize + ki as isize - radius as isize).clamp(0, h as isize - 1) as usize;
                    sum += data[[src_row, col]] * kv;
                }
                sum
            })
            .collect()
    };

    collect_rows(h, w, row_fn)
}

/// Evaluate `row_fn` for every row, in parallel for large images.
fn collect_rows<F>(h: usize, w: usize, row_fn: F) -> Array2<f32>
where
    F: Fn(usize) -> Vec<f32> + Sync,
{
    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(&row_fn).collect()
    } else {
        (0..h).map(&row_fn).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_sums_to_one() {
        let k = make_sized_kernel(5, sigma_for_kernel(5));
        assert_eq!(k.len(), 5);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        assert!(k[2] > k[1] && k[1] > k[0]);
    }

    #[test]
    fn default_sigmas_for_common_kernels() {
        assert!((sigma_for_kernel(5) - 1.1).abs() < 1e-6);
        assert!((sigma_for_kernel(11) - 2.0).abs() < 1e-6);
    }
}
