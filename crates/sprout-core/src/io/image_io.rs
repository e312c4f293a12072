use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use tracing::debug;

use crate::error::{Result, SproutError};
use crate::frame::{Mask, RgbFrame};

/// Decode any supported image file into an 8-bit RGB frame.
///
/// Alpha is dropped and higher bit depths are reduced to 8 bits.
pub fn load_rgb(path: &Path) -> Result<RgbFrame> {
    let img = image::open(path)?;
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    if w == 0 || h == 0 {
        return Err(SproutError::InvalidDimensions { width: w, height: h });
    }
    debug!(path = %path.display(), width = w, height = h, "Image loaded");
    Ok(RgbFrame::from_rgb_image(&rgb))
}

/// Save a mask as an 8-bit grayscale PNG (plant 255, background 0).
pub fn save_mask_png(mask: &Mask, path: &Path) -> Result<()> {
    let (h, w) = mask.dim();
    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &v) in mask.indexed_iter() {
        img.put_pixel(col as u32, row as u32, Luma([if v { 255 } else { 0 }]));
    }
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an RGB frame as an 8-bit PNG.
pub fn save_rgb_png(frame: &RgbFrame, path: &Path) -> Result<()> {
    frame.to_rgb_image().save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
