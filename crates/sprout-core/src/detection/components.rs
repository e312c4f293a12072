use std::collections::HashMap;

use ndarray::Array2;

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Label of this component in the label image (1-based).
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
    /// First pixel of the component in raster order (row, col).
    pub first_pixel: (usize, usize),
}

impl ComponentStats {
    pub fn bbox_width(&self) -> usize {
        self.bbox.3 - self.bbox.2 + 1
    }

    pub fn bbox_height(&self) -> usize {
        self.bbox.1 - self.bbox.0 + 1
    }
}

/// Connected-component labeling with 8-connectivity, two-pass union-find.
///
/// Returns the label image (0 = background, components numbered 1..=n in
/// raster order of their first pixel) and per-component statistics in
/// label order.
pub fn label_components(mask: &Array2<bool>) -> (Array2<u32>, Vec<ComponentStats>) {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return (labels, Vec::new());
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: provisional labels from the already-visited neighbours
    // (left, upper-left, up, upper-right).
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbours = [0u32; 4];
            if col > 0 {
                neighbours[0] = labels[[row, col - 1]];
            }
            if row > 0 {
                if col > 0 {
                    neighbours[1] = labels[[row - 1, col - 1]];
                }
                neighbours[2] = labels[[row - 1, col]];
                if col + 1 < w {
                    neighbours[3] = labels[[row - 1, col + 1]];
                }
            }

            let smallest = neighbours.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                Some(min_label) => {
                    labels[[row, col]] = min_label;
                    for &n in neighbours.iter().filter(|&&l| l > 0 && l != min_label) {
                        union(&mut parent, min_label, n);
                    }
                }
            }
        }
    }

    // Pass 2: resolve roots, renumber compactly and collect stats.
    let mut compact = HashMap::<u32, u32>::new();
    let mut stats: Vec<ComponentStats> = Vec::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = find(&parent, lbl);
            let id = *compact.entry(root).or_insert_with(|| {
                stats.push(ComponentStats {
                    label: stats.len() as u32 + 1,
                    area: 0,
                    bbox: (row, row, col, col),
                    first_pixel: (row, col),
                });
                stats.len() as u32
            });
            labels[[row, col]] = id;

            let entry = &mut stats[id as usize - 1];
            entry.area += 1;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    (labels, stats)
}

/// Component statistics sorted by area descending (largest first).
pub fn connected_components(mask: &Array2<bool>) -> Vec<ComponentStats> {
    let (_, mut components) = label_components(mask);
    components.sort_by(|a, b| b.area.cmp(&a.area));
    components
}

/// Erase every component smaller than `min_area` pixels.
pub fn remove_small_components(mask: &Array2<bool>, min_area: usize) -> Array2<bool> {
    let (labels, stats) = label_components(mask);
    labels.mapv(|l| l > 0 && stats[l as usize - 1].area >= min_area)
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_pixels_join() {
        let mut mask = Array2::from_elem((3, 3), false);
        mask[[0, 0]] = true;
        mask[[1, 1]] = true;
        mask[[2, 2]] = true;
        let (_, stats) = label_components(&mask);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].area, 3);
    }

    #[test]
    fn u_shape_merges_into_one_label() {
        let mut mask = Array2::from_elem((4, 5), false);
        for r in 0..4 {
            mask[[r, 0]] = true;
            mask[[r, 4]] = true;
        }
        for c in 0..5 {
            mask[[3, c]] = true;
        }
        let (labels, stats) = label_components(&mask);
        assert_eq!(stats.len(), 1);
        assert_eq!(labels[[0, 0]], labels[[0, 4]]);
    }

    #[test]
    fn labels_are_compact() {
        let mut mask = Array2::from_elem((5, 5), false);
        mask[[0, 0]] = true;
        mask[[0, 4]] = true;
        mask[[4, 2]] = true;
        let (labels, stats) = label_components(&mask);
        assert_eq!(stats.len(), 3);
        assert_eq!(labels.iter().copied().max(), Some(3));
    }
}
