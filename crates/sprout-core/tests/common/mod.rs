#![allow(dead_code)]

use ndarray::Array2;

use sprout_core::frame::{Mask, RgbFrame};

/// Potting-soil brown. Hue 15 in 8-bit HSV, Lab a above neutral.
pub const SOIL: [u8; 3] = [110, 80, 50];

/// Healthy leaf green. Roughly H 57, S 187, V 150.
pub const LEAF: [u8; 3] = [50, 150, 40];

/// Soil background with a faint deterministic texture.
pub fn soil(height: usize, width: usize) -> RgbFrame {
    let mut frame = RgbFrame::zeros(height, width);
    for row in 0..height {
        for col in 0..width {
            let t = ((row * 7 + col * 13) % 9) as u8;
            frame.set_pixel(row, col, [SOIL[0] + t, SOIL[1] + t, SOIL[2] + t]);
        }
    }
    frame
}

fn in_disc(row: usize, col: usize, center: (f64, f64), radius: f64) -> bool {
    let dr = row as f64 - center.0;
    let dc = col as f64 - center.1;
    dr * dr + dc * dc <= radius * radius
}

/// Paint a filled disc.
pub fn draw_disc(frame: &mut RgbFrame, center: (f64, f64), radius: f64, color: [u8; 3]) {
    for row in 0..frame.height() {
        for col in 0..frame.width() {
            if in_disc(row, col, center, radius) {
                frame.set_pixel(row, col, color);
            }
        }
    }
}

/// Soil background with one leaf-green disc per `(center, radius)`.
pub fn plant_image(height: usize, width: usize, leaves: &[((f64, f64), f64)]) -> RgbFrame {
    let mut frame = soil(height, width);
    for &(center, radius) in leaves {
        draw_disc(&mut frame, center, radius, LEAF);
    }
    frame
}

/// Mask covering the same discs as [`plant_image`].
pub fn disc_mask(height: usize, width: usize, leaves: &[((f64, f64), f64)]) -> Mask {
    Array2::from_shape_fn((height, width), |(r, c)| {
        leaves.iter().any(|&(center, radius)| in_disc(r, c, center, radius))
    })
}

/// Two well separated leaves on a 300x300 image.
pub fn two_leaves() -> Vec<((f64, f64), f64)> {
    vec![((100.0, 90.0), 30.5), ((190.0, 210.0), 30.5)]
}

/// One leaf on a 300x300 image.
pub fn one_leaf() -> Vec<((f64, f64), f64)> {
    vec![((100.0, 90.0), 30.5)]
}

pub fn count(mask: &Mask) -> usize {
    mask.iter().filter(|&&v| v).count()
}
