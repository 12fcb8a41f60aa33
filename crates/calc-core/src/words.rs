//! Number to English words
//!
//! Two grouping systems are supported:
//! - International: Thousand, Million, Billion, Trillion (steps of 1000)
//! - Indian: Thousand (10^3), Lakh (10^5), Crore (10^7), Arab (10^9); above
//!   the thousands place the groups are two digits wide
//!
//! The highest unit takes the whole remaining quotient, rendered in the same
//! system, so 10^12 in the Indian system reads "One Thousand Arab".

use crate::error::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest magnitude accepted for the whole part
pub const MAX_VALUE: u64 = 999_999_999_999_999;

/// Maximum number of fractional digits spelled out after "Point"
pub const MAX_DECIMAL_DIGITS: usize = 6;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const INTERNATIONAL_UNITS: [(u64, &str); 4] = [
    (1_000_000_000_000, "Trillion"),
    (1_000_000_000, "Billion"),
    (1_000_000, "Million"),
    (1_000, "Thousand"),
];

const INDIAN_UNITS: [(u64, &str); 4] = [
    (1_000_000_000, "Arab"),
    (10_000_000, "Crore"),
    (100_000, "Lakh"),
    (1_000, "Thousand"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberSystem {
    #[default]
    International,
    Indian,
}

impl NumberSystem {
    fn units(self) -> &'static [(u64, &'static str)] {
        match self {
            NumberSystem::International => &INTERNATIONAL_UNITS,
            NumberSystem::Indian => &INDIAN_UNITS,
        }
    }

    /// Currency shown by default for this system
    pub fn default_currency(self) -> Currency {
        match self {
            NumberSystem::International => Currency::Usd,
            NumberSystem::Indian => Currency::Inr,
        }
    }
}

impl FromStr for NumberSystem {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "international" | "intl" => Ok(NumberSystem::International),
            "indian" | "india" => Ok(NumberSystem::Indian),
            other => Err(CalcError::InvalidInput(format!(
                "Unknown number system: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for NumberSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberSystem::International => write!(f, "international"),
            NumberSystem::Indian => write!(f, "indian"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Usd,
    Inr,
}

impl Currency {
    pub fn major_unit(self, plural: bool) -> &'static str {
        match (self, plural) {
            (Currency::Usd, false) => "Dollar",
            (Currency::Usd, true) => "Dollars",
            (Currency::Inr, false) => "Rupee",
            (Currency::Inr, true) => "Rupees",
        }
    }

    pub fn minor_unit(self, plural: bool) -> &'static str {
        match (self, plural) {
            (Currency::Usd, false) => "Cent",
            (Currency::Usd, true) => "Cents",
            (Currency::Inr, _) => "Paise",
        }
    }
}

impl FromStr for Currency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" | "dollar" | "dollars" => Ok(Currency::Usd),
            "inr" | "rupee" | "rupees" => Ok(Currency::Inr),
            other => Err(CalcError::InvalidInput(format!("Unknown currency: {}", other))),
        }
    }
}

/// 0..=99 in words. Zero is the empty string.
pub fn two_digits(n: u64) -> String {
    debug_assert!(n < 100);
    if n < 20 {
        ONES[n as usize].to_string()
    } else {
        let tens = TENS[(n / 10) as usize];
        let ones = ONES[(n % 10) as usize];
        if ones.is_empty() {
            tens.to_string()
        } else {
            format!("{} {}", tens, ones)
        }
    }
}

/// 0..=999 in words. Zero is the empty string.
pub fn three_digits(n: u64) -> String {
    debug_assert!(n < 1000);
    let hundreds = n / 100;
    let rest = n % 100;

    let mut parts = Vec::with_capacity(2);
    if hundreds > 0 {
        parts.push(format!("{} Hundred", ONES[hundreds as usize]));
    }
    if rest > 0 {
        parts.push(two_digits(rest));
    }
    parts.join(" ")
}

/// Positive integer in words
fn integer_words(n: u64, system: NumberSystem) -> String {
    let mut parts = Vec::new();
    let mut rest = n;

    for (i, &(divisor, name)) in system.units().iter().enumerate() {
        if rest >= divisor {
            let quotient = rest / divisor;
            rest %= divisor;
            let words = if i == 0 {
                integer_words(quotient, system)
            } else {
                three_digits(quotient)
            };
            parts.push(format!("{} {}", words, name));
        }
    }
    if rest > 0 {
        parts.push(three_digits(rest));
    }

    parts.join(" ")
}

fn whole_words(n: u64, system: NumberSystem) -> String {
    if n == 0 {
        "Zero".to_string()
    } else {
        integer_words(n, system)
    }
}

fn digit_word(d: u8) -> &'static str {
    if d == 0 {
        "Zero"
    } else {
        ONES[d as usize]
    }
}

/// Integer in words, e.g. `integer_to_words(100_000, Indian)` is "One Lakh"
pub fn integer_to_words(n: i64, system: NumberSystem) -> Result<String, CalcError> {
    let magnitude = n.unsigned_abs();
    if magnitude > MAX_VALUE {
        return Err(CalcError::TooLarge { max: MAX_VALUE });
    }
    let words = whole_words(magnitude, system);
    Ok(if n < 0 {
        format!("Minus {}", words)
    } else {
        words
    })
}

/// Decimal number given as text, e.g. "-1,234.05".
///
/// Commas, spaces and underscores are ignored. The fractional part is spelled
/// digit by digit after "Point", up to six digits, trailing zeros dropped.
pub fn number_to_words(input: &str, system: NumberSystem) -> Result<String, CalcError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '_'))
        .collect();

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };

    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(CalcError::InvalidInput(format!("Not a number: {}", input.trim())));
    }

    let whole = whole.trim_start_matches('0');
    if whole.len() > MAX_VALUE.to_string().len() {
        return Err(CalcError::TooLarge { max: MAX_VALUE });
    }
    let whole_value: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| CalcError::InvalidInput(format!("Not a number: {}", input.trim())))?
    };
    if whole_value > MAX_VALUE {
        return Err(CalcError::TooLarge { max: MAX_VALUE });
    }

    let fraction = fraction
        .get(..MAX_DECIMAL_DIGITS)
        .unwrap_or(fraction)
        .trim_end_matches('0');

    let mut words = whole_words(whole_value, system);
    if !fraction.is_empty() {
        let digits: Vec<&str> = fraction.bytes().map(|b| digit_word(b - b'0')).collect();
        words = format!("{} Point {}", words, digits.join(" "));
    }

    let is_zero = whole_value == 0 && fraction.is_empty();
    Ok(if negative && !is_zero {
        format!("Minus {}", words)
    } else {
        words
    })
}

/// Floating point number in words (see `number_to_words`)
pub fn to_words(value: f64, system: NumberSystem) -> Result<String, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::InvalidInput(format!("Not a number: {}", value)));
    }
    number_to_words(&value.to_string(), system)
}

/// Currency amount in words.
///
/// The amount is rounded to two decimals first; rounding up to a full major
/// unit carries into the whole part. A zero minor part is left out.
pub fn currency_to_words(
    amount: f64,
    system: NumberSystem,
    currency: Currency,
) -> Result<String, CalcError> {
    if !amount.is_finite() {
        return Err(CalcError::InvalidInput(format!("Not a number: {}", amount)));
    }
    let magnitude = amount.abs();
    if magnitude.trunc() > MAX_VALUE as f64 {
        return Err(CalcError::TooLarge { max: MAX_VALUE });
    }

    let total_minor = (magnitude * 100.0).round() as u64;
    let whole = total_minor / 100;
    let minor = total_minor % 100;
    if whole > MAX_VALUE {
        return Err(CalcError::TooLarge { max: MAX_VALUE });
    }

    let mut words = format!(
        "{} {}",
        whole_words(whole, system),
        currency.major_unit(whole != 1)
    );
    if minor > 0 {
        words = format!(
            "{} and {} {}",
            words,
            two_digits(minor),
            currency.minor_unit(minor != 1)
        );
    }

    Ok(if amount < 0.0 && total_minor > 0 {
        format!("Minus {}", words)
    } else {
        words
    })
}

/// Parse a currency amount typed by a user: "$1,234.50", "₹ 10,00,000"
pub fn parse_amount(input: &str) -> Result<f64, CalcError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches(|c: char| c == '$' || c == '₹')
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '_'))
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::InvalidInput(format!("Not an amount: {}", input.trim())))
}
