use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::KMEANS_TOLERANCE;
use crate::error::{Result, SproutError};

/// Result of partitioning points into k clusters.
#[derive(Clone, Debug)]
pub struct Clustering {
    pub centers: Vec<[f32; 3]>,
    /// Number of points assigned to each center.
    pub sizes: Vec<usize>,
    pub iterations: usize,
}

/// Lloyd's k-means with k-means++ seeding.
///
/// All randomness comes from a [`StdRng`] seeded with `seed`, so the same
/// points and seed always produce the same centers.
pub fn kmeans(points: &[[f32; 3]], k: usize, seed: u64, max_iterations: usize) -> Result<Clustering> {
    if k == 0 {
        return Err(SproutError::DegenerateClustering("k must be positive".into()));
    }
    if points.len() < k {
        return Err(SproutError::DegenerateClustering(format!(
            "{} points cannot form {k} clusters",
            points.len()
        )));
    }
    if points.iter().flatten().any(|v| !v.is_finite()) {
        return Err(SproutError::DegenerateClustering("non-finite sample".into()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centers = seed_centers(points, k, &mut rng);
    let mut assignment = vec![0usize; points.len()];
    let mut sizes = vec![0usize; k];
    let mut iterations = 0;

    for _ in 0..max_iterations.max(1) {
        iterations += 1;

        for (slot, p) in assignment.iter_mut().zip(points) {
            *slot = nearest(&centers, p).0;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        sizes.iter_mut().for_each(|s| *s = 0);
        for (&c, p) in assignment.iter().zip(points) {
            sizes[c] += 1;
            for d in 0..3 {
                sums[c][d] += p[d] as f64;
            }
        }

        let mut shift = 0.0f32;
        for c in 0..k {
            // Empty clusters keep their previous center.
            if sizes[c] == 0 {
                continue;
            }
            let n = sizes[c] as f64;
            let updated = [
                (sums[c][0] / n) as f32,
                (sums[c][1] / n) as f32,
                (sums[c][2] / n) as f32,
            ];
            shift = shift.max(dist2(&updated, &centers[c]).sqrt());
            centers[c] = updated;
        }

        if shift < KMEANS_TOLERANCE {
            break;
        }
    }

    Ok(Clustering {
        centers,
        sizes,
        iterations,
    })
}

/// k-means++: each new center is drawn with probability proportional to its
/// squared distance from the nearest center chosen so far.
fn seed_centers(points: &[[f32; 3]], k: usize, rng: &mut StdRng) -> Vec<[f32; 3]> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.random_range(0..points.len())]);

    let mut closest: Vec<f64> = points.iter().map(|p| dist2(p, &centers[0]) as f64).collect();
    while centers.len() < k {
        let total: f64 = closest.iter().sum();
        let chosen = if total <= 0.0 {
            // Every point coincides with a center already.
            rng.random_range(0..points.len())
        } else {
            let mut target = rng.random::<f64>() * total;
            let mut idx = points.len() - 1;
            for (i, &d) in closest.iter().enumerate() {
                if target < d {
                    idx = i;
                    break;
                }
                target -= d;
            }
            idx
        };

        let center = points[chosen];
        for (c, p) in closest.iter_mut().zip(points) {
            *c = c.min(dist2(p, &center) as f64);
        }
        centers.push(center);
    }
    centers
}

fn nearest(centers: &[[f32; 3]], p: &[f32; 3]) -> (usize, f32) {
    centers
        .iter()
        .enumerate()
        .map(|(i, c)| (i, dist2(c, p)))
        .fold((0, f32::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

#[inline]
fn dist2(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    (0..3).map(|i| (a[i] - b[i]) * (a[i] - b[i])).sum()
}
