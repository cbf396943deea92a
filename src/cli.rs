//! CLI command implementations for treegp.

pub(crate) mod ant;

mod output;

use clap::ValueEnum;
use thiserror::Error;
use treegp::ant::TrailError;
use treegp::error::GpError;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Evolution failed.
    #[error(transparent)]
    Gp(#[from] GpError),
    /// The trail could not be loaded.
    #[error(transparent)]
    Trail(#[from] TrailError),
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Config path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not a valid evolution config.
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        /// Config path.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Results could not be encoded.
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}
