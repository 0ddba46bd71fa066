//! Error types for configuration, client construction and listing.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no regions configured")]
    NoRegions,

    #[error("invalid region name: {0:?}")]
    InvalidRegion(String),
}

/// Building the cloud client failed (bad credentials, unreachable endpoint).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientInitError {
    #[error("credentials rejected in {region}: {code}: {message}")]
    Rejected {
        region: String,
        code: String,
        message: String,
    },

    #[error("could not connect to {region}: {message}")]
    Unavailable { region: String, message: String },
}

/// Listing instances failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListError {
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("request failed: {0}")]
    Transport(String),
}

/// Non-fatal failures surfaced in the UI as a failed load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error(transparent)]
    ClientInit(#[from] ClientInitError),

    #[error(transparent)]
    List(#[from] ListError),
}
