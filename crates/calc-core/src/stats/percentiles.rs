//! Percentile calculations
//!
//! Linear interpolation between nearest ranks: for percentile `p` on sorted
//! data of length `n`, the rank is `p / 100 * (n - 1)`; a fractional rank
//! interpolates between the floor and ceil elements.

/// Percentile of data that is already sorted ascending.
///
/// Returns `None` for empty data or `p` outside 0..=100.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        Some(sorted[lower_index])
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let fraction = rank - lower_index as f64;
        Some(lower_value + fraction * (upper_value - lower_value))
    }
}

/// Percentile of unsorted data (sorted internally).
///
/// ```
/// use calc_core::stats::percentile;
///
/// let data = vec![5.0, 1.0, 3.0, 2.0, 4.0];
/// assert_eq!(percentile(&data, 50.0), Some(3.0));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}
