use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::frame::RgbFrame;

/// Resize by area averaging: every output pixel is the coverage-weighted
/// mean of the source pixels its footprint overlaps.
///
/// Downscaling averages whole blocks, which avoids the aliasing of point
/// sampling. An empty source yields an all-black frame of the target size.
pub fn resize_area(frame: &RgbFrame, width: usize, height: usize) -> RgbFrame {
    if frame.is_empty() || width == 0 || height == 0 {
        return RgbFrame::zeros(height, width);
    }
    if frame.dim() == (height, width) {
        return frame.clone();
    }

    let (src_h, src_w) = frame.dim();
    let row_taps = axis_taps(src_h, height);
    let col_taps = axis_taps(src_w, width);

    let mut data = Array3::<u8>::zeros((height, width, COLOR_CHANNEL_COUNT));
    for (row, rtaps) in row_taps.iter().enumerate() {
        for (col, ctaps) in col_taps.iter().enumerate() {
            let mut acc = [0.0f32; COLOR_CHANNEL_COUNT];
            for &(sr, wr) in rtaps {
                for &(sc, wc) in ctaps {
                    let wgt = wr * wc;
                    for (ch, a) in acc.iter_mut().enumerate() {
                        *a += frame.data[[sr, sc, ch]] as f32 * wgt;
                    }
                }
            }
            for (ch, a) in acc.into_iter().enumerate() {
                data[[row, col, ch]] = a.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    RgbFrame::new(data)
}

/// Source indices and normalized weights contributing to each output index.
fn axis_taps(src: usize, dst: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src).max(first + 1);

            let mut taps: Vec<(usize, f32)> = (first..last)
                .filter_map(|j| {
                    let overlap = end.min(j as f64 + 1.0) - start.max(j as f64);
                    (overlap > 0.0).then_some((j, overlap as f32))
                })
                .collect();
            if taps.is_empty() {
                taps.push((first.min(src - 1), 1.0));
            }

            let total: f32 = taps.iter().map(|t| t.1).sum();
            for t in &mut taps {
                t.1 /= total;
            }
            taps
        })
        .collect()
}
