use ndarray::Array2;

const BINS: usize = 256;

/// Contrast-limited adaptive histogram equalization on an 8-bit plane.
///
/// The plane is split into a `tiles` x `tiles` grid. Each tile gets its own
/// equalization lookup table built from a histogram clipped at
/// `clip_limit` times the mean bin count, with the clipped excess spread
/// evenly across all bins. Output pixels bilinearly blend the tables of the
/// four nearest tile centers, so tile seams do not show.
pub fn clahe(plane: &Array2<u8>, clip_limit: f32, tiles: usize) -> Array2<u8> {
    let (h, w) = plane.dim();
    if h == 0 || w == 0 || tiles == 0 {
        return plane.clone();
    }

    let tiles_y = tiles.min(h);
    let tiles_x = tiles.min(w);
    let tile_h = h.div_ceil(tiles_y);
    let tile_w = w.div_ceil(tiles_x);

    let mut luts = vec![[0u8; BINS]; tiles_y * tiles_x];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let r0 = ty * tile_h;
            let c0 = tx * tile_w;
            let r1 = (r0 + tile_h).min(h);
            let c1 = (c0 + tile_w).min(w);
            luts[ty * tiles_x + tx] = tile_lut(plane, r0, r1, c0, c1, clip_limit);
        }
    }

    let mut out = Array2::<u8>::zeros((h, w));
    for row in 0..h {
        let (ty0, ty1, fy) = neighbours(row, tile_h, tiles_y);
        for col in 0..w {
            let (tx0, tx1, fx) = neighbours(col, tile_w, tiles_x);
            let v = plane[[row, col]] as usize;
            let top = luts[ty0 * tiles_x + tx0][v] as f32 * (1.0 - fx)
                + luts[ty0 * tiles_x + tx1][v] as f32 * fx;
            let bottom = luts[ty1 * tiles_x + tx0][v] as f32 * (1.0 - fx)
                + luts[ty1 * tiles_x + tx1][v] as f32 * fx;
            out[[row, col]] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

fn tile_lut(
    plane: &Array2<u8>,
    r0: usize,
    r1: usize,
    c0: usize,
    c1: usize,
    clip_limit: f32,
) -> [u8; BINS] {
    let mut hist = [0usize; BINS];
    for row in r0..r1 {
        for col in c0..c1 {
            hist[plane[[row, col]] as usize] += 1;
        }
    }
    let area = ((r1 - r0) * (c1 - c0)).max(1);

    if clip_limit > 0.0 {
        let clip = ((clip_limit * area as f32 / BINS as f32) as usize).max(1);
        let mut excess = 0usize;
        for bin in hist.iter_mut() {
            if *bin > clip {
                excess += *bin - clip;
                *bin = clip;
            }
        }
        let per_bin = excess / BINS;
        let remainder = excess % BINS;
        for (i, bin) in hist.iter_mut().enumerate() {
            *bin += per_bin + usize::from(i < remainder);
        }
    }

    let scale = (BINS - 1) as f32 / area as f32;
    let mut lut = [0u8; BINS];
    let mut cdf = 0usize;
    for (i, &count) in hist.iter().enumerate() {
        cdf += count;
        lut[i] = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Tile indices straddling `pos` along one axis, and the blend factor
/// toward the second one.
fn neighbours(pos: usize, tile: usize, count: usize) -> (usize, usize, f32) {
    let t = (pos as f32 + 0.5) / tile as f32 - 0.5;
    if t <= 0.0 {
        return (0, 0, 0.0);
    }
    let lo = t.floor() as usize;
    if lo + 1 >= count {
        return (count - 1, count - 1, 0.0);
    }
    (lo, lo + 1, t - lo as f32)
}
