//! Descriptive statistics
//!
//! Free-form text in, a full summary out: central tendency, spread,
//! quartiles and IQR outliers. Everything is recomputed from scratch on
//! each call.
//!
//! # Examples
//!
//! ```
//! use calc_core::stats::{parse_dataset, Summary};
//!
//! let values = parse_dataset("1, 2, 3\n4 5");
//! let summary = Summary::from_values(&values).unwrap();
//! assert_eq!(summary.mean, 3.0);
//! assert_eq!(summary.variance, 2.0);
//! ```

pub mod outliers;
pub mod percentiles;

pub use outliers::OutlierResult;
pub use percentiles::{percentile, percentile_sorted};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[,\s]+").expect("valid separator regex");
}

/// Split on commas, whitespace and newlines, keeping only tokens that parse
/// to a finite number
pub fn parse_dataset(input: &str) -> Vec<f64> {
    SEPARATORS
        .split(input)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

/// Most frequent value(s)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode {
    /// Values sharing the highest frequency, ascending
    pub values: Vec<f64>,
    pub frequency: usize,
}

impl Mode {
    /// Sorted input required
    fn from_sorted(sorted: &[f64]) -> Self {
        let mut values = Vec::new();
        let mut frequency = 0;

        let mut i = 0;
        while i < sorted.len() {
            let value = sorted[i];
            let run = sorted[i..].iter().take_while(|&&v| v == value).count();
            if run > frequency {
                frequency = run;
                values.clear();
                values.push(value);
            } else if run == frequency {
                values.push(value);
            }
            i += run;
        }

        Mode { values, frequency }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: Mode,
    /// Population variance (divides by count)
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Values outside the fences, ascending
    pub outliers: Vec<f64>,
    pub sorted: Vec<f64>,
}

impl Summary {
    /// Compute the summary. `None` if there are no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        let mean = sum / count as f64;

        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        let variance = sorted.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let min = sorted[0];
        let max = sorted[count - 1];

        let fences = OutlierResult::detect_sorted(&sorted)?;

        Some(Summary {
            count,
            sum,
            mean,
            median,
            mode: Mode::from_sorted(&sorted),
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
            range: max - min,
            q1: fences.q1,
            q3: fences.q3,
            iqr: fences.iqr,
            lower_fence: fences.lower_fence,
            upper_fence: fences.upper_fence,
            outliers: fences.outliers,
            sorted,
        })
    }

    /// Parse `input` and summarize it
    pub fn from_text(input: &str) -> Option<Self> {
        Self::from_values(&parse_dataset(input))
    }

    /// The mode as displayed: `None` when as many values are modal as there
    /// are values, i.e. every value appears exactly once.
    pub fn display_mode(&self) -> Option<&[f64]> {
        if self.mode.values.len() == self.count {
            None
        } else {
            Some(&self.mode.values)
        }
    }
}
