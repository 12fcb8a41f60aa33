//! TOML configuration for the command line tools
//!
//! Every section and field is optional; anything left out falls back to the
//! same defaults the browser tools use.

use anyhow::Context;
use calc_core::format::{EXPONENT_PRECISION, STATS_PRECISION, TRIANGLE_PRECISION};
use calc_core::random::{DEFAULT_HISTORY_SIZE, DEFAULT_MAX_COUNT};
use calc_core::NumberSystem;
use pdfpages_core::{DEFAULT_MERGE_NAME, DEFAULT_REORDER_NAME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub random: RandomConfig,
    #[serde(default)]
    pub words: WordsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

/// Decimal places per calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_triangle_precision")]
    pub triangle_precision: usize,
    #[serde(default = "default_exponent_precision")]
    pub exponent_precision: usize,
    #[serde(default = "default_stats_precision")]
    pub stats_precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            triangle_precision: TRIANGLE_PRECISION,
            exponent_precision: EXPONENT_PRECISION,
            stats_precision: STATS_PRECISION,
        }
    }
}

fn default_triangle_precision() -> usize {
    TRIANGLE_PRECISION
}

fn default_exponent_precision() -> usize {
    EXPONENT_PRECISION
}

fn default_stats_precision() -> usize {
    STATS_PRECISION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomConfig {
    /// Runs kept in the history (default: 5)
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Most numbers one request may ask for (default: 10000)
    #[serde(default = "default_max_count")]
    pub max_count: usize,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

fn default_max_count() -> usize {
    DEFAULT_MAX_COUNT
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordsConfig {
    #[serde(default)]
    pub system: NumberSystem,
}

/// Output file names used when none is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_merge_name")]
    pub default_merge_name: String,
    #[serde(default = "default_reorder_name")]
    pub default_reorder_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_merge_name: default_merge_name(),
            default_reorder_name: default_reorder_name(),
        }
    }
}

fn default_merge_name() -> String {
    DEFAULT_MERGE_NAME.to_string()
}

fn default_reorder_name() -> String {
    DEFAULT_REORDER_NAME.to_string()
}
