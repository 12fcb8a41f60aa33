//! Calculator kernels
//!
//! Pure computations behind the calculator tools. Each one takes the
//! current inputs and returns either a complete result or nothing (or a
//! typed error where the user needs to be told why).
//!
//! - `triangle`: base-height and Heron's formula
//! - `exponent`: powers, logarithms, roots
//! - `stats`: descriptive statistics with IQR outliers
//! - `words`: numbers and currency amounts in English words
//! - `random`: uniform integers with or without duplicates

pub mod error;
pub mod exponent;
pub mod format;
pub mod random;
pub mod stats;
pub mod triangle;
pub mod words;

pub use error::CalcError;
pub use exponent::ExpOperation;
pub use random::{GenerationRun, RandomGenerator, RandomRequest};
pub use stats::Summary;
pub use triangle::{TriangleInput, TriangleResult};
pub use words::{Currency, NumberSystem};
