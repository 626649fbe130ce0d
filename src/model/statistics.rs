use itertools::Itertools;
use statrs::statistics::Statistics;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().mean())
}

/// Sample standard deviation; 0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    values.iter().std_dev()
}

/// Percentile `p` (0-100) with linear interpolation between closest ranks.
///
/// Returns `None` for an empty sample; a single value is every percentile of itself.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    let sorted = values.iter().copied().sorted_by(|a, b| a.total_cmp(b)).collect_vec();

    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let position = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;

            Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
        }
    }
}
