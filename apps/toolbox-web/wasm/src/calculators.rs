//! Calculator bindings
//!
//! Thin wrappers over `calc_core`. Suppressed results come back as
//! `undefined`; errors the user should read come back as strings.

use calc_core::format::{fixed, EXPONENT_PRECISION, STATS_PRECISION, TRIANGLE_PRECISION};
use calc_core::words::{currency_to_words, number_to_words, parse_amount};
use calc_core::{
    Currency, ExpOperation, NumberSystem, RandomGenerator, RandomRequest, Summary, TriangleInput,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ============================================================
// Triangle
// ============================================================

/// Area from `{ mode: "base_height", base, height }` or
/// `{ mode: "three_sides", a, b, c }`. `undefined` for impossible input.
#[wasm_bindgen(js_name = calculateTriangle)]
pub fn calculate_triangle(input: JsValue) -> Result<JsValue, JsValue> {
    let input: TriangleInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| JsValue::from_str(&format!("Invalid triangle input: {}", e)))?;
    match input.calculate() {
        Some(result) => to_js(&result),
        None => Ok(JsValue::UNDEFINED),
    }
}

#[wasm_bindgen(js_name = triangleArea)]
pub fn triangle_area(base: f64, height: f64) -> Option<String> {
    TriangleInput::BaseHeight { base, height }
        .calculate()
        .map(|r| fixed(r.area, TRIANGLE_PRECISION))
}

#[wasm_bindgen(js_name = triangleAreaHerons)]
pub fn triangle_area_herons(a: f64, b: f64, c: f64) -> Option<String> {
    TriangleInput::ThreeSides { a, b, c }
        .calculate()
        .map(|r| fixed(r.area, TRIANGLE_PRECISION))
}

// ============================================================
// Exponents and logarithms
// ============================================================

/// `{ op: "power" | "log" | "natural_log" | "square_root", ... }`
#[wasm_bindgen(js_name = evaluateExponent)]
pub fn evaluate_exponent(op: JsValue) -> Result<Option<f64>, JsValue> {
    let op: ExpOperation = serde_wasm_bindgen::from_value(op)
        .map_err(|e| JsValue::from_str(&format!("Invalid operation: {}", e)))?;
    Ok(op.evaluate())
}

/// Result formatted to eight decimal places
#[wasm_bindgen(js_name = formatExponentResult)]
pub fn format_exponent_result(value: f64) -> String {
    fixed(value, EXPONENT_PRECISION)
}

// ============================================================
// Statistics
// ============================================================

#[derive(Serialize)]
struct StatsView<'a> {
    #[serde(flatten)]
    summary: &'a Summary,
    /// Mode as shown to the user; absent when every value is unique
    display_mode: Option<&'a [f64]>,
    formatted_mean: String,
    formatted_std_dev: String,
}

/// Summary of the numbers in `text`, or `undefined` when it has none
#[wasm_bindgen(js_name = calculateStats)]
pub fn calculate_stats(text: &str) -> Result<JsValue, JsValue> {
    let Some(summary) = Summary::from_text(text) else {
        return Ok(JsValue::UNDEFINED);
    };
    to_js(&StatsView {
        summary: &summary,
        display_mode: summary.display_mode(),
        formatted_mean: fixed(summary.mean, STATS_PRECISION),
        formatted_std_dev: fixed(summary.std_dev, STATS_PRECISION),
    })
}

// ============================================================
// Number to words
// ============================================================

#[wasm_bindgen(js_name = numberToWords)]
pub fn number_to_words_js(input: &str, system: &str) -> Result<String, JsValue> {
    words_internal(input, system).map_err(|e| JsValue::from_str(&e))
}

/// `currency` defaults to the system's own currency
#[wasm_bindgen(js_name = currencyToWords)]
pub fn currency_to_words_js(
    input: &str,
    system: &str,
    currency: Option<String>,
) -> Result<String, JsValue> {
    currency_internal(input, system, currency.as_deref()).map_err(|e| JsValue::from_str(&e))
}

fn words_internal(input: &str, system: &str) -> Result<String, String> {
    let system: NumberSystem = system.parse().map_err(|e: calc_core::CalcError| e.to_string())?;
    number_to_words(input, system).map_err(|e| e.to_string())
}

fn currency_internal(input: &str, system: &str, currency: Option<&str>) -> Result<String, String> {
    let system: NumberSystem = system.parse().map_err(|e: calc_core::CalcError| e.to_string())?;
    let currency = match currency {
        Some(c) => c.parse::<Currency>().map_err(|e| e.to_string())?,
        None => system.default_currency(),
    };
    let amount = parse_amount(input).map_err(|e| e.to_string())?;
    currency_to_words(amount, system, currency).map_err(|e| e.to_string())
}

// ============================================================
// Random numbers
// ============================================================

/// Largest integer a JS number holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn to_integer(value: f64, field: &str) -> Result<i64, String> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER {
        return Err(format!("{} must be a whole number", field));
    }
    Ok(value as i64)
}

/// Random number generator with a history of recent runs
#[wasm_bindgen]
pub struct RandomNumbers {
    generator: RandomGenerator,
}

#[wasm_bindgen]
impl RandomNumbers {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            generator: RandomGenerator::new(),
        }
    }

    /// Reproducible sequence, for demos and tests
    pub fn seeded(seed: u32) -> Self {
        Self {
            generator: RandomGenerator::seeded(seed as u64),
        }
    }

    pub fn generate(
        &mut self,
        min: f64,
        max: f64,
        count: u32,
        allow_duplicates: bool,
        sort: bool,
    ) -> Result<Vec<f64>, JsValue> {
        self.generate_internal(min, max, count, allow_duplicates, sort)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Recent runs, newest first
    pub fn history(&self) -> Result<JsValue, JsValue> {
        let runs: Vec<_> = self.generator.history().collect();
        to_js(&runs)
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) {
        self.generator.clear_history();
    }
}

impl Default for RandomNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomNumbers {
    fn generate_internal(
        &mut self,
        min: f64,
        max: f64,
        count: u32,
        allow_duplicates: bool,
        sort: bool,
    ) -> Result<Vec<f64>, String> {
        let request = RandomRequest {
            min: to_integer(min, "Minimum")?,
            max: to_integer(max, "Maximum")?,
            count: count as usize,
            allow_duplicates,
            sort,
        };
        let numbers = self.generator.generate(request).map_err(|e| e.to_string())?;
        Ok(numbers.into_iter().map(|n| n as f64).collect())
    }
}
