use ndarray::Array2;

use super::components::{label_components, ComponentStats};

/// Clockwise neighbour directions (image coordinates, y down) as (drow, dcol),
/// starting east.
const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Axis-aligned bounding rectangle in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BoundingBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// Closed outer boundary of one connected region, as pixel-center points
/// (row, col) in clockwise order.
#[derive(Clone, Debug)]
pub struct Contour {
    pub points: Vec<(usize, usize)>,
    /// Pixel count of the region the contour encloses.
    pub pixel_area: usize,
    pub bbox: BoundingBox,
}

impl Contour {
    /// Polygon area enclosed by the boundary points (shoelace formula).
    ///
    /// Measured between pixel centers, so it is smaller than the pixel count:
    /// a 10x10 square encloses 81.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0.0f64;
        for i in 0..n {
            let (r0, c0) = self.points[i];
            let (r1, c1) = self.points[(i + 1) % n];
            twice += c0 as f64 * r1 as f64 - c1 as f64 * r0 as f64;
        }
        twice.abs() / 2.0
    }

    /// Length of the closed boundary polyline.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| {
                let (r0, c0) = self.points[i];
                let (r1, c1) = self.points[(i + 1) % n];
                let dr = r1 as f64 - r0 as f64;
                let dc = c1 as f64 - c0 as f64;
                (dr * dr + dc * dc).sqrt()
            })
            .sum()
    }

    /// 4π·area / perimeter²: 1.0 for a disc, near 0 for thin ribbons.
    pub fn circularity(&self) -> f64 {
        let p = self.perimeter();
        if p <= 0.0 {
            return 0.0;
        }
        4.0 * std::f64::consts::PI * self.area() / (p * p)
    }
}

/// Outer contours of every 8-connected region in `mask`, in raster order of
/// each region's first pixel. Holes are not traced.
pub fn external_contours(mask: &Array2<bool>) -> Vec<Contour> {
    let (labels, stats) = label_components(mask);
    stats
        .iter()
        .map(|s| contour_of(&labels, s))
        .collect()
}

/// Trace the outer boundary of the labelled region described by `stats`.
pub fn contour_of(labels: &Array2<u32>, stats: &ComponentStats) -> Contour {
    let (min_row, max_row, min_col, max_col) = stats.bbox;
    Contour {
        points: trace_boundary(labels, stats.label, stats.first_pixel),
        pixel_area: stats.area,
        bbox: BoundingBox {
            x: min_col,
            y: min_row,
            width: max_col - min_col + 1,
            height: max_row - min_row + 1,
        },
    }
}

/// Moore-neighbour boundary tracing.
///
/// `start` must be the first pixel of the region in raster order, so its
/// west neighbour is known to lie outside. Tracing stops when the walk is
/// about to repeat its first step.
pub fn trace_boundary(labels: &Array2<u32>, label: u32, start: (usize, usize)) -> Vec<(usize, usize)> {
    let (h, w) = labels.dim();
    let inside = |r: isize, c: isize| -> bool {
        r >= 0 && c >= 0 && (r as usize) < h && (c as usize) < w && labels[[r as usize, c as usize]] == label
    };

    let start_pos = (start.0 as isize, start.1 as isize);
    let mut points = vec![start];
    let mut current = start_pos;
    let mut backtrack = (start_pos.0, start_pos.1 - 1);
    let mut second: Option<(isize, isize)> = None;
    // Every boundary pixel is entered at most once per side.
    let limit = 4 * h * w + 8;

    for _ in 0..limit {
        let Some((next, last_bg)) = step(current, backtrack, &inside) else {
            // Isolated pixel.
            break;
        };

        if current == start_pos {
            match second {
                None => second = Some(next),
                Some(s) if s == next => break,
                Some(_) => {}
            }
        }

        backtrack = last_bg;
        current = next;
        if current == start_pos && second.is_some() {
            // Peek handled on the next iteration.
            continue;
        }
        points.push((current.0 as usize, current.1 as usize));
    }

    points
}

/// Scan clockwise around `current` starting just after `backtrack`; return the
/// first region pixel and the last outside pixel examined before it.
fn step<F>(
    current: (isize, isize),
    backtrack: (isize, isize),
    inside: &F,
) -> Option<((isize, isize), (isize, isize))>
where
    F: Fn(isize, isize) -> bool,
{
    let rel = (backtrack.0 - current.0, backtrack.1 - current.1);
    let start_dir = DIRECTIONS.iter().position(|&d| d == rel).unwrap_or(4);

    let mut last_bg = backtrack;
    for k in 1..=8 {
        let (dr, dc) = DIRECTIONS[(start_dir + k) % 8];
        let candidate = (current.0 + dr, current.1 + dc);
        if inside(candidate.0, candidate.1) {
            return Some((candidate, last_bg));
        }
        last_bg = candidate;
    }
    None
}
