//! Bikeshare Insights - London bike-share CSV analysis
//!
//! Loads the hourly rental records, cleans and recodes them, derives calendar
//! features and prints descriptive statistics.

mod config;
mod data;
mod pipeline;
mod report;
mod stats;

use anyhow::Result;
use clap::Parser;
use config::{OutputFormat, PipelineConfig, DEFAULT_INPUT};
use data::RecodePolicy;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "bikeshare_insights")]
#[command(version)]
#[command(about = "Clean and summarise the London bike-share dataset", long_about = None)]
struct Cli {
    /// Input CSV with the source header
    #[arg(value_name = "CSV", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// What to do with season/weather codes that have no label
    #[arg(long, value_enum, default_value_t = RecodePolicy::Strict)]
    unknown_codes: RecodePolicy,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            recode_policy: cli.unknown_codes,
            format: cli.format,
        }
    }
}

fn init_logging() {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry().with(stderr_layer).init();
}

fn main() -> Result<()> {
    init_logging();

    let config = PipelineConfig::from(Cli::parse());
    let report = pipeline::run(&config).inspect_err(|e| error!("{e:#}"))?;

    match config.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
