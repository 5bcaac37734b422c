//! Descriptive statistics behind the histogram, box plot and summary table.

/// Upper bound for automatic histogram bin counts.
pub const MAX_BINS: usize = 50;

/// Whisker reach, in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bar: `[start, end)` (the last bin also includes `end`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Sturges' rule, clamped to `1..=MAX_BINS`.
pub fn auto_bin_count(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let bins = (n as f64).log2().ceil() as usize + 1;
    bins.clamp(1, MAX_BINS)
}

/// Equal-width histogram over `[min, max]` of `values`.
///
/// Every value lands in exactly one bin. A constant series gives a single
/// bin of width 1 centred on the value; no values gives no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };

    if max == min {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.len(),
        }];
    }

    let bins = bins.max(1);
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Box-plot summary
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Values outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        // The box always lies inside the data range, so both finds succeed.
        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// Percentile by linear interpolation between closest ranks (NumPy default).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

// ---------------------------------------------------------------------------
// Summary row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
        let (min, max) = match min_max(values) {
            Some((lo, hi)) => (Some(lo), Some(hi)),
            None => (None, None),
        };
        Summary {
            count,
            mean,
            min,
            max,
        }
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
