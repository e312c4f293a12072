pub mod components;
pub mod contours;
pub mod distance;
pub mod morphology;
pub mod watershed;

pub use components::{connected_components, label_components, remove_small_components, ComponentStats};
pub use contours::{contour_of, external_contours, trace_boundary, BoundingBox, Contour};
pub use distance::distance_transform;
pub use morphology::{closing, dilate, erode, opening, KernelShape, StructuringElement};
pub use watershed::watershed;
