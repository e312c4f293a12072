use image::{Rgb, RgbImage};
use ndarray::{Array2, Array3};

use crate::consts::COLOR_CHANNEL_COUNT;

/// Binary plant/background classification. `true` marks plant pixels.
pub type Mask = Array2<bool>;

/// An 8-bit RGB raster.
/// Pixel data is row-major, shape = (height, width, 3), channels in R, G, B order.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbFrame {
    pub data: Array3<u8>,
}

impl RgbFrame {
    pub fn new(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, COLOR_CHANNEL_COUNT);
        Self { data }
    }

    /// All-black frame of the given size.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::new(Array3::zeros((height, width, COLOR_CHANNEL_COUNT)))
    }

    /// Frame filled with a single color.
    pub fn filled(height: usize, width: usize, rgb: [u8; 3]) -> Self {
        Self::new(Array3::from_shape_fn(
            (height, width, COLOR_CHANNEL_COUNT),
            |(_, _, c)| rgb[c],
        ))
    }

    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let data = Array3::from_shape_fn((h as usize, w as usize, COLOR_CHANNEL_COUNT), |(r, c, ch)| {
            img.get_pixel(c as u32, r as u32).0[ch]
        });
        Self::new(data)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        let (h, w) = (self.height(), self.width());
        let mut img = RgbImage::new(w as u32, h as u32);
        for row in 0..h {
            for col in 0..w {
                img.put_pixel(col as u32, row as u32, Rgb(self.pixel(row, col)));
            }
        }
        img
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// (height, width), matching the shape of a [`Mask`] over this frame.
    pub fn dim(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, rgb: [u8; 3]) {
        for (ch, v) in rgb.into_iter().enumerate() {
            self.data[[row, col, ch]] = v;
        }
    }

    /// Copy of a single channel (0 = red, 1 = green, 2 = blue).
    pub fn channel(&self, ch: usize) -> Array2<u8> {
        Array2::from_shape_fn(self.dim(), |(r, c)| self.data[[r, c, ch]])
    }

    /// Keep pixels where `mask` is set and black out everything else.
    ///
    /// Panics in debug builds if the mask shape differs from the frame.
    pub fn masked(&self, mask: &Mask) -> RgbFrame {
        debug_assert_eq!(mask.dim(), self.dim());
        let data = Array3::from_shape_fn(self.data.dim(), |(r, c, ch)| {
            if mask[[r, c]] {
                self.data[[r, c, ch]]
            } else {
                0
            }
        });
        RgbFrame::new(data)
    }
}
