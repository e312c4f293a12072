pub mod image_io;

pub use image_io::{load_rgb, save_mask_png, save_rgb_png};
