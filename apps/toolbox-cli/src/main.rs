//! Toolbox command line binary

use clap::Parser;
use toolbox_cli::config::Config;
use toolbox_cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Results go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(toolbox_cli::log_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    toolbox_cli::run(&cli, &config, &mut out)
}
