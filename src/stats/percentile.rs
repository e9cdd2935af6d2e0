/// Percentile of **ascending-sorted** finite data by linear interpolation between closest
/// ranks (the R-7 / spreadsheet `PERCENTILE.INC` method).
///
/// `p` is in `[0, 100]`. Returns `None` for empty input or `p` outside that range.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=100.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * (p / 100.0);
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted[n - 1])
    } else {
        // Exact when neighbours are equal, so a flat sample returns its value unchanged.
        Some(sorted[j] + g * (sorted[j + 1] - sorted[j]))
    }
}

/// Arithmetic mean, `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sort finite values ascending in place.
pub(crate) fn sort_finite(values: &mut [f64]) {
    values.sort_unstable_by(f64::total_cmp);
}

#[cfg(test)]
#[path = "../../tests/unit/stats/percentile.rs"]
mod tests;
