pub mod hsv;
pub mod lab;

pub use hsv::{rgb_to_hsv, HsvPlanes};
pub use lab::{rgb_to_lab, LabPlanes};
