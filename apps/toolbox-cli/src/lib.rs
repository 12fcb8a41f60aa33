//! Command line front end for the PDF page tools and calculators

pub mod config;

use anyhow::{bail, Context};
use calc_core::format::{fixed, join, trimmed};
use calc_core::words::{currency_to_words, number_to_words, parse_amount};
use calc_core::{
    Currency, ExpOperation, NumberSystem, RandomGenerator, RandomRequest, Summary, TriangleInput,
};
use clap::{Parser, Subcommand};
use config::Config;
use pdfpages_core::{merge_documents, parse_custom_order, reorder_document, PageOrder};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "toolbox")]
#[command(version, about = "PDF page tools and everyday calculators")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge two or more PDFs in the given order
    Merge {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a PDF's pages out in a new order
    Reorder {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Reverse the page order
        #[arg(long, conflicts_with = "order")]
        reverse: bool,
        /// Comma-separated 1-based page numbers, e.g. "3,1,2"
        #[arg(long)]
        order: Option<String>,
        /// Move a page: FROM:TO, 1-based positions (repeatable)
        #[arg(long = "move", value_name = "FROM:TO", conflicts_with = "order")]
        moves: Vec<String>,
    },
    /// Triangle area from base and height, or from three sides
    Triangle {
        #[arg(long, requires = "height", conflicts_with = "sides")]
        base: Option<f64>,
        #[arg(long, requires = "base")]
        height: Option<f64>,
        #[arg(long, num_args = 3, value_names = ["A", "B", "C"], allow_negative_numbers = true)]
        sides: Option<Vec<f64>>,
    },
    /// Powers, logarithms and square roots
    Exp {
        #[command(subcommand)]
        op: ExpCommand,
    },
    /// Descriptive statistics; reads standard input when no values are given
    Stats {
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// Spell a number (or currency amount) in English words
    Words {
        #[arg(allow_hyphen_values = true)]
        number: String,
        /// international or indian
        #[arg(long)]
        system: Option<NumberSystem>,
        /// Read the number as a currency amount
        #[arg(long)]
        currency: bool,
        /// usd or inr (defaults to the system's currency)
        #[arg(long, requires = "currency")]
        unit: Option<Currency>,
    },
    /// Random integers from an inclusive range
    Random {
        #[arg(long, allow_negative_numbers = true)]
        min: i64,
        #[arg(long, allow_negative_numbers = true)]
        max: i64,
        #[arg(long, default_value = "1")]
        count: usize,
        /// Draw distinct values
        #[arg(long)]
        unique: bool,
        #[arg(long)]
        sort: bool,
        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,
        /// Repeat the draw and show the recent-runs history
        #[arg(long, default_value = "1")]
        runs: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExpCommand {
    /// BASE raised to EXPONENT
    Power {
        #[arg(allow_negative_numbers = true)]
        base: f64,
        #[arg(allow_negative_numbers = true)]
        exponent: f64,
    },
    /// Logarithm of NUMBER (base 10 unless given)
    Log {
        #[arg(allow_negative_numbers = true)]
        number: f64,
        #[arg(long, default_value = "10")]
        base: f64,
    },
    /// Natural logarithm
    Ln {
        #[arg(allow_negative_numbers = true)]
        number: f64,
    },
    /// Square root
    Sqrt {
        #[arg(allow_negative_numbers = true)]
        number: f64,
    },
}

impl ExpCommand {
    fn operation(&self) -> ExpOperation {
        match *self {
            ExpCommand::Power { base, exponent } => ExpOperation::Power { base, exponent },
            ExpCommand::Log { number, base } => ExpOperation::Log { number, base },
            ExpCommand::Ln { number } => ExpOperation::NaturalLog { number },
            ExpCommand::Sqrt { number } => ExpOperation::SquareRoot { number },
        }
    }
}

/// Log filter from a `RUST_LOG` value, `info` when unset or empty
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Run one command, writing results to `out`
pub fn run(cli: &Cli, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match &cli.command {
        Command::Merge { inputs, output } => {
            let output = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.default_merge_name));
            let pages = merge_files(inputs, &output)?;
            emit(
                out,
                cli.json,
                &json!({ "output": output.display().to_string(), "pages": pages }),
                || format!("Wrote {} pages to {}", pages, output.display()),
            )
        }
        Command::Reorder {
            input,
            output,
            reverse,
            order,
            moves,
        } => {
            let output = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.default_reorder_name));
            let order = reorder_file(input, &output, *reverse, order.as_deref(), moves)?;
            let pages: Vec<usize> = order.iter().map(|i| i + 1).collect();
            emit(
                out,
                cli.json,
                &json!({ "output": output.display().to_string(), "order": pages }),
                || {
                    let pages: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
                    format!("Wrote pages {} to {}", pages.join(", "), output.display())
                },
            )
        }
        Command::Triangle {
            base,
            height,
            sides,
        } => {
            let input = match (base, height, sides.as_deref()) {
                (Some(base), Some(height), None) => TriangleInput::BaseHeight {
                    base: *base,
                    height: *height,
                },
                (None, None, Some(&[a, b, c])) => TriangleInput::ThreeSides { a, b, c },
                _ => bail!("Give either --base and --height, or --sides A B C"),
            };
            let Some(result) = input.calculate() else {
                bail!("No triangle with these measurements");
            };
            let places = config.display.triangle_precision;
            emit(out, cli.json, &result, || match result.perimeter {
                Some(perimeter) => format!(
                    "Area: {}\nPerimeter: {}",
                    fixed(result.area, places),
                    fixed(perimeter, places)
                ),
                None => format!("Area: {}", fixed(result.area, places)),
            })
        }
        Command::Exp { op } => {
            let Some(value) = op.operation().evaluate() else {
                bail!("No result: input is outside the operation's domain");
            };
            let places = config.display.exponent_precision;
            emit(out, cli.json, &json!({ "result": value }), || {
                fixed(value, places)
            })
        }
        Command::Stats { values } => {
            let text = if values.is_empty() {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read values from standard input")?;
                buf
            } else {
                values.join(" ")
            };
            let Some(summary) = Summary::from_text(&text) else {
                bail!("No numbers found");
            };
            let places = config.display.stats_precision;
            emit(out, cli.json, &summary, || {
                format_summary(&summary, places)
            })
        }
        Command::Words {
            number,
            system,
            currency,
            unit,
        } => {
            let system = system.unwrap_or(config.words.system);
            let words = if *currency {
                let unit = unit.unwrap_or_else(|| system.default_currency());
                currency_to_words(parse_amount(number)?, system, unit)?
            } else {
                number_to_words(number, system)?
            };
            emit(out, cli.json, &json!({ "words": words }), || words.clone())
        }
        Command::Random {
            min,
            max,
            count,
            unique,
            sort,
            seed,
            runs,
        } => {
            let generator = match seed {
                Some(seed) => RandomGenerator::seeded(*seed),
                None => RandomGenerator::new(),
            };
            let mut generator = generator
                .with_history_size(config.random.history_size)
                .with_max_count(config.random.max_count);
            let request = RandomRequest {
                min: *min,
                max: *max,
                count: *count,
                allow_duplicates: !unique,
                sort: *sort,
            };

            let mut last = Vec::new();
            for _ in 0..(*runs).max(1) {
                last = generator.generate(request)?;
            }

            if *runs > 1 {
                let history: Vec<_> = generator.history().collect();
                emit(out, cli.json, &history, || {
                    history
                        .iter()
                        .map(|run| join_integers(&run.numbers))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            } else {
                emit(out, cli.json, &last, || join_integers(&last))
            }
        }
    }
}

/// Write `value` as JSON, or the text produced by `text`
fn emit<T: Serialize>(
    out: &mut impl Write,
    as_json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if as_json {
        serde_json::to_writer_pretty(&mut *out, value).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", text())?;
    }
    Ok(())
}

fn join_integers(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_summary(s: &Summary, places: usize) -> String {
    let mode = match s.display_mode() {
        Some(values) => format!("{} (appears {} times)", join(values, places), s.mode.frequency),
        None => "No mode".to_string(),
    };
    let outliers = if s.outliers.is_empty() {
        "None".to_string()
    } else {
        join(&s.outliers, places)
    };

    [
        format!("Count: {}", s.count),
        format!("Sum: {}", trimmed(s.sum, places)),
        format!("Mean: {}", fixed(s.mean, places)),
        format!("Median: {}", fixed(s.median, places)),
        format!("Mode: {}", mode),
        format!("Variance: {}", fixed(s.variance, places)),
        format!("Standard deviation: {}", fixed(s.std_dev, places)),
        format!("Min: {}", trimmed(s.min, places)),
        format!("Max: {}", trimmed(s.max, places)),
        format!("Range: {}", trimmed(s.range, places)),
        format!("Q1: {}", fixed(s.q1, places)),
        format!("Q3: {}", fixed(s.q3, places)),
        format!("IQR: {}", fixed(s.iqr, places)),
        format!("Outliers: {}", outliers),
    ]
    .join("\n")
}

fn read_pdf(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Merge `inputs` in order into `output`. Returns the page count written.
pub fn merge_files(inputs: &[PathBuf], output: &Path) -> anyhow::Result<u32> {
    let sources = inputs
        .iter()
        .map(|p| read_pdf(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let merged = merge_documents(&sources)?;
    let pages = pdfpages_core::get_page_count(&merged)?;
    fs::write(output, &merged)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(inputs = inputs.len(), pages, output = %output.display(), "Merge complete");
    Ok(pages)
}

/// Reorder `input` into `output`. Moves are applied after `--reverse`;
/// `--order` replaces the order outright. Returns the 0-based order used.
pub fn reorder_file(
    input: &Path,
    output: &Path,
    reverse: bool,
    custom: Option<&str>,
    moves: &[String],
) -> anyhow::Result<PageOrder> {
    let bytes = read_pdf(input)?;
    let page_count = pdfpages_core::get_page_count(&bytes)? as usize;

    let order = match custom {
        Some(custom) => parse_custom_order(custom, page_count)?,
        None => {
            let mut order = PageOrder::identity(page_count);
            if reverse {
                order.reverse();
            }
            for spec in moves {
                let (from, to) = parse_move(spec)?;
                order.move_item(from, to)?;
            }
            order
        }
    };

    let reordered = reorder_document(&bytes, &order)?;
    fs::write(output, &reordered)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(pages = page_count, output = %output.display(), "Reorder complete");
    Ok(order)
}

/// "FROM:TO" with 1-based positions, to 0-based
fn parse_move(spec: &str) -> anyhow::Result<(usize, usize)> {
    let parse = |s: &str| -> anyhow::Result<usize> {
        match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => bail!("Invalid move '{}': positions are 1-based numbers", spec),
        }
    };
    let Some((from, to)) = spec.split_once(':') else {
        bail!("Invalid move '{}': expected FROM:TO", spec);
    };
    Ok((parse(from)?, parse(to)?))
}
