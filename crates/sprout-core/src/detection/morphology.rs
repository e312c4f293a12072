use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Shape of a structuring element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelShape {
    /// Full square.
    Rect,
    /// Ellipse inscribed in the square (a cross at size 3).
    #[default]
    Ellipse,
}

/// A binary structuring element, stored as the list of offsets it covers
/// relative to its anchor (the center).
#[derive(Clone, Debug)]
pub struct StructuringElement {
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    pub fn new(shape: KernelShape, size: usize) -> Self {
        let size = size.max(1);
        let anchor = (size / 2) as isize;
        let mut offsets = Vec::with_capacity(size * size);

        match shape {
            KernelShape::Rect => {
                for r in 0..size as isize {
                    for c in 0..size as isize {
                        offsets.push((r - anchor, c - anchor));
                    }
                }
            }
            KernelShape::Ellipse => {
                let radius = anchor as f64;
                for r in 0..size as isize {
                    let dy = (r - anchor) as f64;
                    let half = if radius > 0.0 {
                        (radius * ((radius * radius - dy * dy) / (radius * radius)).max(0.0).sqrt())
                            .round() as isize
                    } else {
                        0
                    };
                    for c in (anchor - half).max(0)..=(anchor + half).min(size as isize - 1) {
                        offsets.push((r - anchor, c - anchor));
                    }
                }
            }
        }

        Self { offsets }
    }

    pub fn rect(size: usize) -> Self {
        Self::new(KernelShape::Rect, size)
    }

    pub fn ellipse(size: usize) -> Self {
        Self::new(KernelShape::Ellipse, size)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Binary erosion: a pixel stays set only if every in-bounds pixel under the
/// element is set. Out-of-bounds neighbours are ignored.
pub fn erode(mask: &Array2<bool>, kernel: &StructuringElement, iterations: usize) -> Array2<bool> {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = apply(&current, kernel, true);
    }
    current
}

/// Binary dilation: a pixel becomes set if any in-bounds pixel under the
/// element is set.
pub fn dilate(mask: &Array2<bool>, kernel: &StructuringElement, iterations: usize) -> Array2<bool> {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = apply(&current, kernel, false);
    }
    current
}

/// Opening: `iterations` erosions followed by as many dilations.
///
/// Removes foreground specks smaller than the element while preserving
/// larger regions.
pub fn opening(mask: &Array2<bool>, kernel: &StructuringElement, iterations: usize) -> Array2<bool> {
    dilate(&erode(mask, kernel, iterations), kernel, iterations)
}

/// Closing: `iterations` dilations followed by as many erosions.
///
/// Fills gaps and holes narrower than the element.
pub fn closing(mask: &Array2<bool>, kernel: &StructuringElement, iterations: usize) -> Array2<bool> {
    erode(&dilate(mask, kernel, iterations), kernel, iterations)
}

fn apply(mask: &Array2<bool>, kernel: &StructuringElement, erosion: bool) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if erosion && !mask[[row, col]] {
                continue;
            }
            let mut hit = erosion;
            for &(dr, dc) in &kernel.offsets {
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if nr < 0 || nr >= h as isize || nc < 0 || nc >= w as isize {
                    continue;
                }
                let v = mask[[nr as usize, nc as usize]];
                if erosion && !v {
                    hit = false;
                    break;
                }
                if !erosion && v {
                    hit = true;
                    break;
                }
            }
            result[[row, col]] = hit;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_three_is_a_cross() {
        let k = StructuringElement::ellipse(3);
        assert_eq!(k.len(), 5);
        assert!(!k.offsets.contains(&(-1, -1)));
    }

    #[test]
    fn ellipse_five_drops_corners_only() {
        let k = StructuringElement::ellipse(5);
        // 1 + 5 + 5 + 5 + 1
        assert_eq!(k.len(), 17);
    }

    #[test]
    fn opening_removes_isolated_pixel() {
        let mut mask = Array2::from_elem((9, 9), false);
        mask[[4, 4]] = true;
        let opened = opening(&mask, &StructuringElement::rect(3), 1);
        assert!(opened.iter().all(|&v| !v));
    }

    #[test]
    fn closing_fills_single_pixel_hole() {
        let mut mask = Array2::from_elem((9, 9), true);
        mask[[4, 4]] = false;
        let closed = closing(&mask, &StructuringElement::rect(3), 1);
        assert!(closed[[4, 4]]);
    }

    #[test]
    fn full_mask_survives_erosion_at_borders() {
        let mask = Array2::from_elem((5, 5), true);
        let eroded = erode(&mask, &StructuringElement::rect(3), 2);
        assert!(eroded.iter().all(|&v| v));
    }
}
