//! 8-bit CIE L*a*b* conversion (D65).
//!
//! - L: 0..=255 (L* scaled by 255/100)
//! - a: 0..=255 (a* offset by 128; below 128 leans green, above leans red)
//! - b: 0..=255 (b* offset by 128)

use ndarray::Array2;

use crate::frame::RgbFrame;

/// D65 reference white.
const D65_X: f32 = 0.950_456;
const D65_Z: f32 = 1.088_754;

const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_453, 0.357_580, 0.180_423],
    [0.212_671, 0.715_160, 0.072_169],
    [0.019_334, 0.119_193, 0.950_227],
];

/// CIE epsilon: below this the cube-root curve is replaced by a line.
const LAB_EPSILON: f32 = 0.008_856;
const LAB_KAPPA: f32 = 903.3;

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Convert one RGB pixel to 8-bit Lab.
#[inline]
pub fn rgb_to_lab(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(|v| srgb_to_linear(v as f32 / 255.0));

    let x = (SRGB_TO_XYZ[0][0] * r + SRGB_TO_XYZ[0][1] * g + SRGB_TO_XYZ[0][2] * b) / D65_X;
    let y = SRGB_TO_XYZ[1][0] * r + SRGB_TO_XYZ[1][1] * g + SRGB_TO_XYZ[1][2] * b;
    let z = (SRGB_TO_XYZ[2][0] * r + SRGB_TO_XYZ[2][1] * g + SRGB_TO_XYZ[2][2] * b) / D65_Z;

    let l = if y > LAB_EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        LAB_KAPPA * y
    };
    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));
    let a = 500.0 * (fx - fy);
    let bb = 200.0 * (fy - fz);

    [
        (l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8,
        (a + 128.0).round().clamp(0.0, 255.0) as u8,
        (bb + 128.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Lab image stored as three planes.
#[derive(Clone, Debug)]
pub struct LabPlanes {
    pub lightness: Array2<u8>,
    pub a: Array2<u8>,
    pub b: Array2<u8>,
}

impl LabPlanes {
    pub fn from_frame(frame: &RgbFrame) -> Self {
        let dim = frame.dim();
        let mut lightness = Array2::zeros(dim);
        let mut a = Array2::zeros(dim);
        let mut b = Array2::zeros(dim);

        for row in 0..dim.0 {
            for col in 0..dim.1 {
                let [l, av, bv] = rgb_to_lab(frame.pixel(row, col));
                lightness[[row, col]] = l;
                a[[row, col]] = av;
                b[[row, col]] = bv;
            }
        }

        Self { lightness, a, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_colors_sit_on_the_a_axis_origin() {
        let [l, a, b] = rgb_to_lab([255, 255, 255]);
        assert_eq!(l, 255);
        assert!((a as i32 - 128).abs() <= 1);
        assert!((b as i32 - 128).abs() <= 1);

        assert_eq!(rgb_to_lab([0, 0, 0]), [0, 128, 128]);
    }

    #[test]
    fn green_has_low_a() {
        let [_, a, _] = rgb_to_lab([0, 255, 0]);
        assert!(a < 60, "pure green a = {a}");
        let [_, a, _] = rgb_to_lab([50, 140, 40]);
        assert!(a < 120, "leaf green a = {a}");
    }

    #[test]
    fn red_and_brown_have_high_a() {
        let [_, a, _] = rgb_to_lab([255, 0, 0]);
        assert!(a > 200);
        let [_, a, _] = rgb_to_lab([120, 80, 40]);
        assert!(a > 128);
    }
}
