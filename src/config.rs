//! Pipeline configuration.

use crate::data::RecodePolicy;
use std::path::PathBuf;

/// Default input file, the dataset's published name.
pub const DEFAULT_INPUT: &str = "london_merged.csv";

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub recode_policy: RecodePolicy,
    pub format: OutputFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            recode_policy: RecodePolicy::default(),
            format: OutputFormat::default(),
        }
    }
}
