pub mod adaptive_threshold;
pub mod bilateral;
pub mod clahe;
pub mod gaussian_blur;
pub mod resize;

pub use adaptive_threshold::adaptive_threshold;
pub use bilateral::bilateral_filter;
pub use clahe::clahe;
pub use gaussian_blur::{gaussian_blur_array, gaussian_blur_rgb};
pub use resize::resize_area;
