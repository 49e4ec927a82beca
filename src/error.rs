use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Source failures (fatal for a run)
// ---------------------------------------------------------------------------

/// The source could not be fetched or opened. Never retried.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to fetch {url}: HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("Request timeout fetching {url}")]
    Timeout { url: String },

    #[error("Failed to fetch {url}: {message}")]
    Request { url: String, message: String },

    #[error("Failed to open file: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Renderer preconditions
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Nothing to draw: the series is empty")]
    EmptySeries,

    #[error("A time-series chart needs timestamped records")]
    TimeSeriesNeedsTimestamps,
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
