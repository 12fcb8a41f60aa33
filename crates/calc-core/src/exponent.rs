//! Exponent and logarithm calculator

use serde::{Deserialize, Serialize};
use std::f64::consts::E;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ExpOperation {
    /// base ^ exponent
    Power { base: f64, exponent: f64 },
    /// log of `number` in `base`
    Log { number: f64, base: f64 },
    NaturalLog { number: f64 },
    SquareRoot { number: f64 },
}

impl ExpOperation {
    /// Evaluate the operation. `None` when the inputs are outside the
    /// operation's domain or the result is not a finite number.
    pub fn evaluate(&self) -> Option<f64> {
        let value = match *self {
            ExpOperation::Power { base, exponent } => power(base, exponent),
            ExpOperation::Log { number, base } => log(number, base)?,
            ExpOperation::NaturalLog { number } => ln(number)?,
            ExpOperation::SquareRoot { number } => sqrt(number)?,
        };
        value.is_finite().then_some(value)
    }
}

pub fn power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// log_base(number) for number > 0, base > 0, base != 1.
///
/// Bases 10 and e go straight to `log10` / `ln`; other bases use ln(n)/ln(b).
pub fn log(number: f64, base: f64) -> Option<f64> {
    if !(number > 0.0) || !(base > 0.0) || base == 1.0 {
        return None;
    }
    if base == 10.0 {
        Some(number.log10())
    } else if base == E {
        Some(number.ln())
    } else {
        Some(number.ln() / base.ln())
    }
}

pub fn ln(number: f64) -> Option<f64> {
    (number > 0.0).then(|| number.ln())
}

pub fn sqrt(number: f64) -> Option<f64> {
    (number >= 0.0).then(|| number.sqrt())
}
