use std::collections::VecDeque;

use ndarray::Array2;

use crate::error::{Result, SproutError};

/// Label value for watershed lines and the one-pixel image frame.
pub const WATERSHED_LINE: i32 = -1;
/// Unresolved territory in the input marker image.
pub const UNKNOWN: i32 = 0;

const IN_QUEUE: i32 = -2;
const LEVELS: usize = 256;

/// Marker-controlled watershed flooding.
///
/// `markers` holds positive seed labels, [`UNKNOWN`] for pixels to be
/// resolved, and is overwritten with the result: every unknown pixel either
/// joins the basin of one seed or becomes [`WATERSHED_LINE`] where two
/// basins meet. The outermost pixel frame is always set to
/// [`WATERSHED_LINE`].
///
/// Flooding proceeds in order of `relief` difference between a pixel and the
/// labelled neighbour that enqueued it (4-connectivity, FIFO within a level).
pub fn watershed(relief: &Array2<u8>, markers: &mut Array2<i32>) -> Result<()> {
    if relief.dim() != markers.dim() {
        return Err(SproutError::DimensionMismatch {
            expected: relief.dim(),
            actual: markers.dim(),
        });
    }
    let (h, w) = markers.dim();
    if h < 3 || w < 3 {
        return Err(SproutError::Watershed(format!(
            "image {w}x{h} too small to flood"
        )));
    }
    if markers.iter().any(|&m| m < WATERSHED_LINE) {
        return Err(SproutError::Watershed("negative marker label".into()));
    }

    for col in 0..w {
        markers[[0, col]] = WATERSHED_LINE;
        markers[[h - 1, col]] = WATERSHED_LINE;
    }
    for row in 0..h {
        markers[[row, 0]] = WATERSHED_LINE;
        markers[[row, w - 1]] = WATERSHED_LINE;
    }

    let mut queues: Vec<VecDeque<(usize, usize)>> = vec![VecDeque::new(); LEVELS];
    let diff = |a: (usize, usize), b: (usize, usize)| -> usize {
        (relief[a] as i32 - relief[b] as i32).unsigned_abs() as usize
    };

    // Seed the queues with unknown pixels bordering a basin.
    for row in 1..h - 1 {
        for col in 1..w - 1 {
            if markers[[row, col]] != UNKNOWN {
                continue;
            }
            let level = neighbours(row, col)
                .into_iter()
                .filter(|&n| markers[n] > 0)
                .map(|n| diff((row, col), n))
                .min();
            if let Some(level) = level {
                queues[level].push_back((row, col));
                markers[[row, col]] = IN_QUEUE;
            }
        }
    }

    let mut active = 0usize;
    loop {
        while active < LEVELS && queues[active].is_empty() {
            active += 1;
        }
        if active == LEVELS {
            break;
        }
        let Some(pos) = queues[active].pop_front() else {
            continue;
        };

        let mut label = UNKNOWN;
        for n in neighbours(pos.0, pos.1) {
            let m = markers[n];
            if m > 0 {
                if label == UNKNOWN {
                    label = m;
                } else if label != m {
                    label = WATERSHED_LINE;
                }
            }
        }
        if label == UNKNOWN {
            return Err(SproutError::Watershed(format!(
                "queued pixel {pos:?} has no labelled neighbour"
            )));
        }
        markers[pos] = label;
        if label == WATERSHED_LINE {
            continue;
        }

        for n in neighbours(pos.0, pos.1) {
            if markers[n] == UNKNOWN {
                let level = diff(pos, n);
                queues[level].push_back(n);
                markers[n] = IN_QUEUE;
                active = active.min(level);
            }
        }
    }

    Ok(())
}

#[inline]
fn neighbours(row: usize, col: usize) -> [(usize, usize); 4] {
    [
        (row, col - 1),
        (row, col + 1),
        (row - 1, col),
        (row + 1, col),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_seeds_split_a_flat_region() {
        let relief = Array2::<u8>::zeros((7, 11));
        let mut markers = Array2::<i32>::zeros((7, 11));
        markers[[3, 2]] = 1;
        markers[[3, 8]] = 2;
        watershed(&relief, &mut markers).unwrap();

        assert_eq!(markers[[3, 1]], 1);
        assert_eq!(markers[[3, 9]], 2);
        assert!(markers.iter().any(|&m| m == WATERSHED_LINE));
        assert!(markers.iter().all(|&m| m != UNKNOWN && m != IN_QUEUE));
    }

    #[test]
    fn frame_becomes_watershed_line() {
        let relief = Array2::<u8>::zeros((5, 5));
        let mut markers = Array2::<i32>::zeros((5, 5));
        markers[[2, 2]] = 1;
        watershed(&relief, &mut markers).unwrap();
        assert_eq!(markers[[0, 0]], WATERSHED_LINE);
        assert_eq!(markers[[1, 1]], 1);
    }

    #[test]
    fn mismatched_shapes_fail() {
        let relief = Array2::<u8>::zeros((5, 5));
        let mut markers = Array2::<i32>::zeros((5, 6));
        assert!(watershed(&relief, &mut markers).is_err());
    }
}
