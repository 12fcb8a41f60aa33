//! Outlier detection using the Interquartile Range (IQR) method.

use super::percentiles::percentile_sorted;
use serde::Serialize;

/// Fence multiplier applied to the IQR
pub const IQR_FENCE: f64 = 1.5;

/// Points outside [Q1 - 1.5*IQR, Q3 + 1.5*IQR] are outliers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierResult {
    /// Outlying values, in ascending order
    pub outliers: Vec<f64>,
    /// Lower fence (Q1 - 1.5*IQR)
    pub lower_fence: f64,
    /// Upper fence (Q3 + 1.5*IQR)
    pub upper_fence: f64,
    /// First quartile (25th percentile)
    pub q1: f64,
    /// Third quartile (75th percentile)
    pub q3: f64,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f64,
}

impl OutlierResult {
    /// Detect outliers in data sorted ascending. `None` for empty data.
    ///
    /// ```
    /// use calc_core::stats::OutlierResult;
    ///
    /// let data = vec![50.0, 52.0, 53.0, 54.0, 55.0, 200.0];
    /// let result = OutlierResult::detect_sorted(&data).unwrap();
    /// assert_eq!(result.outliers, vec![200.0]);
    /// ```
    pub fn detect_sorted(sorted: &[f64]) -> Option<Self> {
        let q1 = percentile_sorted(sorted, 25.0)?;
        let q3 = percentile_sorted(sorted, 75.0)?;
        let iqr = q3 - q1;

        let lower_fence = q1 - IQR_FENCE * iqr;
        let upper_fence = q3 + IQR_FENCE * iqr;

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&value| value < lower_fence || value > upper_fence)
            .collect();

        Some(OutlierResult {
            outliers,
            lower_fence,
            upper_fence,
            q1,
            q3,
            iqr,
        })
    }

    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }
}
