/// Indices of local maxima in `data`, filtered the way scipy's `find_peaks`
/// does: first by minimum horizontal `distance` (taller peaks win), then by
/// minimum topographic `prominence`. Plateaus report their middle sample;
/// the first and last samples are never peaks.
pub fn find_peaks(data: &[f32], distance: usize, prominence: f32) -> Vec<usize> {
    let mut peaks = local_maxima(data);

    if distance > 1 && peaks.len() > 1 {
        let mut keep = vec![true; peaks.len()];
        let mut order: Vec<usize> = (0..peaks.len()).collect();
        order.sort_by(|&a, &b| data[peaks[b]].total_cmp(&data[peaks[a]]).then(b.cmp(&a)));
        for &i in &order {
            if !keep[i] {
                continue;
            }
            for j in 0..peaks.len() {
                if j != i && keep[j] && peaks[i].abs_diff(peaks[j]) < distance {
                    keep[j] = false;
                }
            }
        }
        peaks = peaks
            .into_iter()
            .zip(keep)
            .filter_map(|(p, k)| k.then_some(p))
            .collect();
    }

    peaks.retain(|&p| peak_prominence(data, p) >= prominence);
    peaks
}

/// Height of a peak above the higher of the two lowest points separating it
/// from taller terrain on each side.
pub fn peak_prominence(data: &[f32], peak: usize) -> f32 {
    let height = data[peak];

    let mut left_min = height;
    for &v in data[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &data[peak + 1..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

/// Centered moving average of odd `width`; edges average what is available.
pub fn smooth(data: &[f32], width: usize) -> Vec<f32> {
    let half = width / 2;
    (0..data.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(data.len());
            data[lo..hi].iter().sum::<f32>() / (hi - lo) as f32
        })
        .collect()
}

fn local_maxima(data: &[f32]) -> Vec<usize> {
    let n = data.len();
    let mut peaks = Vec::new();
    let mut i = 1;
    while i + 1 < n {
        if data[i - 1] < data[i] {
            let mut ahead = i + 1;
            while ahead + 1 < n && data[ahead] == data[i] {
                ahead += 1;
            }
            if data[ahead] < data[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}
