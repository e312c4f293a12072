//! 8-bit HSV conversion using the compact hue encoding (degrees / 2).
//!
//! - H: 0..=179
//! - S: 0..=255
//! - V: 0..=255

use ndarray::Array2;

use crate::frame::{Mask, RgbFrame};
use crate::segmentation::ColorBounds;

/// Convert one RGB pixel to 8-bit HSV.
#[inline]
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };
    // 359.x degrees rounds to 180, which wraps back to red.
    let h = ((h / 2.0).round() as u16 % 180) as u8;

    [h, s.round() as u8, max as u8]
}

/// HSV image stored as three planes.
#[derive(Clone, Debug)]
pub struct HsvPlanes {
    pub hue: Array2<u8>,
    pub saturation: Array2<u8>,
    pub value: Array2<u8>,
}

impl HsvPlanes {
    pub fn from_frame(frame: &RgbFrame) -> Self {
        let dim = frame.dim();
        let mut hue = Array2::zeros(dim);
        let mut saturation = Array2::zeros(dim);
        let mut value = Array2::zeros(dim);

        for row in 0..dim.0 {
            for col in 0..dim.1 {
                let [h, s, v] = rgb_to_hsv(frame.pixel(row, col));
                hue[[row, col]] = h;
                saturation[[row, col]] = s;
                value[[row, col]] = v;
            }
        }

        Self {
            hue,
            saturation,
            value,
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.hue.dim()
    }

    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.hue[[row, col]],
            self.saturation[[row, col]],
            self.value[[row, col]],
        ]
    }

    /// Pixels whose every component lies inside `bounds` (inclusive).
    pub fn in_range(&self, bounds: &ColorBounds) -> Mask {
        Array2::from_shape_fn(self.dim(), |(r, c)| bounds.contains(self.pixel(r, c)))
    }
}
