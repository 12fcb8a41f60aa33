//! Display formatting for calculator results

/// Decimal places for triangle results
pub const TRIANGLE_PRECISION: usize = 4;

/// Decimal places for exponent and logarithm results
pub const EXPONENT_PRECISION: usize = 8;

/// Decimal places for statistics results
pub const STATS_PRECISION: usize = 4;

/// Format with a fixed number of decimal places
pub fn fixed(value: f64, places: usize) -> String {
    format!("{:.*}", places, value)
}

/// Format with at most `places` decimals, dropping trailing zeros
pub fn trimmed(value: f64, places: usize) -> String {
    let s = fixed(value, places);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Format a list of values with `trimmed`, comma separated
pub fn join(values: &[f64], places: usize) -> String {
    values
        .iter()
        .map(|&v| trimmed(v, places))
        .collect::<Vec<_>>()
        .join(", ")
}
