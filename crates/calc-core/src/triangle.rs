//! Triangle area
//!
//! Two input modes, chosen explicitly: base and height, or three sides
//! (Heron's formula). Incomplete or impossible input, or an area too large
//! to represent, produces no result rather than an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which inputs the user filled in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TriangleInput {
    BaseHeight { base: f64, height: f64 },
    ThreeSides { a: f64, b: f64, c: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriangleResult {
    pub area: f64,
    /// Only known in three-sides mode
    pub perimeter: Option<f64>,
    /// Only known in three-sides mode
    pub semi_perimeter: Option<f64>,
}

impl TriangleInput {
    pub fn calculate(&self) -> Option<TriangleResult> {
        match *self {
            TriangleInput::BaseHeight { base, height } => {
                area_base_height(base, height).map(|area| TriangleResult {
                    area,
                    perimeter: None,
                    semi_perimeter: None,
                })
            }
            TriangleInput::ThreeSides { a, b, c } => {
                let area = area_herons(a, b, c)?;
                let perimeter = a + b + c;
                Some(TriangleResult {
                    area,
                    perimeter: Some(perimeter),
                    semi_perimeter: Some(perimeter / 2.0),
                })
            }
        }
    }
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// ½ · base · height, for strictly positive inputs
pub fn area_base_height(base: f64, height: f64) -> Option<f64> {
    if !is_positive(base) || !is_positive(height) {
        return None;
    }
    Some(0.5 * base * height).filter(|area| area.is_finite())
}

/// Whether three strictly positive sides satisfy the triangle inequality
pub fn is_valid_triangle(a: f64, b: f64, c: f64) -> bool {
    is_positive(a) && is_positive(b) && is_positive(c) && a + b > c && a + c > b && b + c > a
}

/// Heron's formula. `None` for non-positive sides or a violated
/// triangle inequality.
pub fn area_herons(a: f64, b: f64, c: f64) -> Option<f64> {
    if !is_valid_triangle(a, b, c) {
        debug!(a, b, c, "Sides do not form a triangle");
        return None;
    }
    let s = (a + b + c) / 2.0;
    Some((s * (s - a) * (s - b) * (s - c)).sqrt()).filter(|area| area.is_finite())
}
