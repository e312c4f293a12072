use ndarray::Array2;
use tracing::debug;

use crate::color::{HsvPlanes, LabPlanes};
use crate::detection::{closing, opening, remove_small_components, StructuringElement};
use crate::filters::{adaptive_threshold, bilateral_filter, gaussian_blur_rgb, resize_area};
use crate::frame::{Mask, RgbFrame};

use super::bounds::ColorBounds;
use super::config::{SegmentationConfig, SmoothingConfig, WorkingSize};

/// Segmentation outputs, all at the working resolution.
#[derive(Clone, Debug)]
pub struct Segmentation {
    /// Resized input.
    pub working: RgbFrame,
    /// Working image after bilateral and Gaussian smoothing.
    pub blurred: RgbFrame,
    /// Cleaned plant mask.
    pub mask: Mask,
    /// Working image with background pixels zeroed.
    pub plant_only: RgbFrame,
}

impl Segmentation {
    /// All-zero outputs of the given size.
    pub fn empty(size: WorkingSize) -> Self {
        let frame = RgbFrame::zeros(size.height, size.width);
        Self {
            working: frame.clone(),
            blurred: frame.clone(),
            mask: Array2::from_elem((size.height, size.width), false),
            plant_only: frame,
        }
    }

    pub fn plant_pixel_count(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }
}

/// Separates the plant from the background in one photo.
#[derive(Clone, Debug, Default)]
pub struct PlantSegmenter {
    pub config: SegmentationConfig,
    pub working_size: WorkingSize,
    pub smoothing: SmoothingConfig,
}

impl PlantSegmenter {
    pub fn new(config: SegmentationConfig, working_size: WorkingSize, smoothing: SmoothingConfig) -> Self {
        Self {
            config,
            working_size,
            smoothing,
        }
    }

    /// Build the plant mask from three independent signals.
    ///
    /// Pipeline: area resize -> bilateral -> Gaussian -> (HSV in-range OR
    /// Lab a-channel) AND adaptive green-channel threshold -> opening ->
    /// closing -> small component removal.
    ///
    /// An empty input short-circuits to all-zero outputs.
    pub fn segment(&self, image: &RgbFrame, bounds: &ColorBounds) -> Segmentation {
        if image.is_empty() {
            debug!("Empty input image; returning empty segmentation");
            return Segmentation::empty(self.working_size);
        }

        let working = resize_area(image, self.working_size.width, self.working_size.height);
        let denoised = bilateral_filter(
            &working,
            self.smoothing.bilateral_diameter,
            self.smoothing.sigma_color,
            self.smoothing.sigma_space,
        );
        let blurred = gaussian_blur_rgb(&denoised, self.smoothing.gaussian_kernel);

        let hsv_mask = HsvPlanes::from_frame(&blurred).in_range(bounds);
        let lab_mask = LabPlanes::from_frame(&blurred)
            .a
            .mapv(|a| a <= self.config.lab_a_threshold);
        let adaptive_mask = adaptive_threshold(
            &working.channel(1),
            self.config.adaptive_block_size,
            self.config.adaptive_offset,
        );

        let combined = Array2::from_shape_fn(working.dim(), |idx| {
            (hsv_mask[idx] || lab_mask[idx]) && adaptive_mask[idx]
        });

        let cleaned = self.clean_mask(&combined);
        let plant_only = working.masked(&cleaned);

        debug!(
            hsv = count(&hsv_mask),
            lab = count(&lab_mask),
            adaptive = count(&adaptive_mask),
            combined = count(&combined),
            cleaned = count(&cleaned),
            "Plant mask built"
        );

        Segmentation {
            working,
            blurred,
            mask: cleaned,
            plant_only,
        }
    }

    /// Opening strips speckle, closing fills gaps, then components under the
    /// minimum area are erased.
    pub fn clean_mask(&self, mask: &Mask) -> Mask {
        let shape = self.config.kernel_shape;
        let small = StructuringElement::new(shape, self.config.open_kernel);
        let large = StructuringElement::new(shape, self.config.close_kernel);

        let opened = opening(mask, &small, self.config.open_iterations);
        let closed = closing(&opened, &large, self.config.close_iterations);
        remove_small_components(&closed, self.config.min_component_area)
    }
}

fn count(mask: &Mask) -> usize {
    mask.iter().filter(|&&v| v).count()
}
