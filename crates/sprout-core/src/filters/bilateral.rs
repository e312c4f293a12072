use ndarray::Array3;
use rayon::prelude::*;

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::RgbFrame;

/// Edge-preserving bilateral filter.
///
/// Each output pixel is a mean over a disc of the given `diameter`, weighted
/// by spatial distance (`sigma_space`) and by color distance (`sigma_color`,
/// measured as the L1 distance over the three channels). Pixels across a
/// strong edge get negligible weight, so edges stay sharp while flat regions
/// are smoothed.
pub fn bilateral_filter(
    frame: &RgbFrame,
    diameter: usize,
    sigma_color: f32,
    sigma_space: f32,
) -> RgbFrame {
    if frame.is_empty() || diameter <= 1 {
        return frame.clone();
    }

    let (h, w) = frame.dim();
    let radius = (diameter / 2) as isize;

    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let mut offsets: Vec<(isize, isize, f32)> = Vec::new();
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            let r2 = (dr * dr + dc * dc) as f32;
            if r2 > (radius * radius) as f32 {
                continue;
            }
            offsets.push((dr, dc, (r2 * space_coeff).exp()));
        }
    }

    // Color weights only depend on the integer L1 distance (0..=765).
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let color_lut: Vec<f32> = (0..=255 * COLOR_CHANNEL_COUNT)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let row_fn = |row: usize| -> Vec<[u8; 3]> {
        (0..w)
            .map(|col| {
                let center = frame.pixel(row, col);
                let mut acc = [0.0f32; COLOR_CHANNEL_COUNT];
                let mut wsum = 0.0f32;
                for &(dr, dc, ws) in &offsets {
                    let sr = (row as isize + dr).clamp(0, h as isize - 1) as usize;
                    let sc = (col as isize + dc).clamp(0, w as isize - 1) as usize;
                    let px = frame.pixel(sr, sc);
                    let dist: usize = (0..COLOR_CHANNEL_COUNT)
                        .map(|ch| (px[ch] as i32 - center[ch] as i32).unsigned_abs() as usize)
                        .sum();
                    let wgt = ws * color_lut[dist];
                    for ch in 0..COLOR_CHANNEL_COUNT {
                        acc[ch] += px[ch] as f32 * wgt;
                    }
                    wsum += wgt;
                }
                acc.map(|a| (a / wsum).round().clamp(0.0, 255.0) as u8)
            })
            .collect()
    };

    let rows: Vec<Vec<[u8; 3]>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(&row_fn).collect()
    } else {
        (0..h).map(&row_fn).collect()
    };

    let mut data = Array3::<u8>::zeros((h, w, COLOR_CHANNEL_COUNT));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, px) in row_data.into_iter().enumerate() {
            for (ch, v) in px.into_iter().enumerate() {
                data[[row, col, ch]] = v;
            }
        }
    }
    RgbFrame::new(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_is_unchanged() {
        let frame = RgbFrame::filled(12, 12, [40, 120, 60]);
        assert_eq!(bilateral_filter(&frame, 9, 75.0, 75.0), frame);
    }

    #[test]
    fn strong_edge_survives() {
        let mut frame = RgbFrame::filled(10, 10, [0, 0, 0]);
        for row in 0..10 {
            for col in 5..10 {
                frame.set_pixel(row, col, [255, 255, 255]);
            }
        }
        let out = bilateral_filter(&frame, 9, 30.0, 75.0);
        assert!(out.pixel(5, 4)[0] < 10);
        assert!(out.pixel(5, 5)[0] > 245);
    }
}
