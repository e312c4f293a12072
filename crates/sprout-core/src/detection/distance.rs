use ndarray::Array2;

const INF: f32 = 1e20;

/// Exact Euclidean distance from every foreground pixel to the nearest
/// background pixel. Background pixels get 0.
///
/// The area outside the image counts as background, so a region touching
/// the border has distance 1 along that edge and the result is always
/// finite. Uses the separable lower-envelope algorithm of Felzenszwalb and
/// Huttenlocher: one 1D squared-distance pass per column, then per row.
pub fn distance_transform(mask: &Array2<bool>) -> Array2<f32> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Array2::zeros((h, w));
    }

    // Pad by one background pixel on every side.
    let (ph, pw) = (h + 2, w + 2);
    let mut grid = Array2::<f32>::from_elem((ph, pw), 0.0);
    for row in 0..h {
        for col in 0..w {
            if mask[[row, col]] {
                grid[[row + 1, col + 1]] = INF;
            }
        }
    }

    let mut buf = vec![0.0f32; ph.max(pw)];
    for col in 0..pw {
        for row in 0..ph {
            buf[row] = grid[[row, col]];
        }
        let out = edt_1d(&buf[..ph]);
        for row in 0..ph {
            grid[[row, col]] = out[row];
        }
    }
    for row in 0..ph {
        for col in 0..pw {
            buf[col] = grid[[row, col]];
        }
        let out = edt_1d(&buf[..pw]);
        for col in 0..pw {
            grid[[row, col]] = out[col];
        }
    }

    Array2::from_shape_fn((h, w), |(r, c)| grid[[r + 1, c + 1]].sqrt())
}

/// Squared distance transform of a sampled 1D function.
fn edt_1d(f: &[f32]) -> Vec<f32> {
    let n = f.len();
    let mut d = vec![0.0f32; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0.0f32; n + 1];
    let mut k = 0usize;
    z[0] = -INF;
    z[1] = INF;

    let intersect = |q: usize, p: usize| -> f32 {
        let (qf, pf) = (q as f32, p as f32);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
    };

    for q in 1..n {
        let mut s = intersect(q, v[k]);
        while s <= z[k] {
            if k == 0 {
                break;
            }
            k -= 1;
            s = intersect(q, v[k]);
        }
        if s <= z[k] {
            // k == 0 and the new parabola dominates everywhere.
            v[0] = q;
            z[0] = -INF;
            z[1] = INF;
            continue;
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = INF;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        while z[k + 1] < q as f32 {
            k += 1;
        }
        let diff = q as f32 - v[k] as f32;
        *out = diff * diff + f[v[k]];
    }
    d
}
