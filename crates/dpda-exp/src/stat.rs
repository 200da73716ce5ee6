use serde::{Deserialize, Serialize};

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges (inclusive of the left edge, exclusive of the right edge except the last bin).
    pub edges: Vec<f64>,
    /// Counts recorded per bin.
    pub counts: Vec<u64>,
}

/// Moments and quantiles of a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 5th percentile estimate.
    pub q05: f64,
    /// Median estimate.
    pub q50: f64,
    /// 95th percentile estimate.
    pub q95: f64,
}

/// Builds a histogram with `bins` equal-width bins spanning `[min, max]` of
/// the sample. A degenerate sample gets a single unit-width span.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (start, end) = match bounds(values) {
        Some((min, max)) if max > min => (min, max),
        Some((min, _)) => (min, min + 1.0),
        None => (0.0, 1.0),
    };
    let step = (end - start) / bins as f64;
    let edges = (0..=bins).map(|idx| start + idx as f64 * step).collect();
    let mut counts = vec![0u64; bins];
    for value in values {
        let bin = ((value - start) / step).floor().max(0.0) as usize;
        counts[bin.min(bins - 1)] += 1;
    }
    Histogram { edges, counts }
}

/// Summarizes a sample. Every field is NaN for an empty sample.
pub fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary {
            count: 0,
            mean: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            q05: f64::NAN,
            q50: f64::NAN,
            q95: f64::NAN,
        };
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Summary {
        count: values.len(),
        mean,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        q05: percentile(&sorted, 0.05),
        q50: percentile(&sorted, 0.5),
        q95: percentile(&sorted, 0.95),
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

// linear interpolation between closest ranks
fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    let position = quantile * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let hist = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(hist.edges, vec![0.0, 2.0, 4.0]);
        assert_eq!(hist.counts, vec![2, 3]);
    }

    #[test]
    fn degenerate_sample_uses_unit_span() {
        let hist = histogram(&[7.0, 7.0, 7.0], 3);
        assert_eq!(hist.counts.iter().sum::<u64>(), 3);
        assert_eq!(hist.counts[0], 3);
        assert_eq!(hist.edges.first(), Some(&7.0));
    }

    #[test]
    fn summary_of_small_sample() {
        let summary = summarize(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.q50, 2.5);
        assert!((summary.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_summary_is_nan() {
        assert!(summarize(&[]).mean.is_nan());
    }
}
