//! Error types for the analysis core
//!
//! Only malformed input is an error. Missing signals, cycles and low
//! scores are reported as data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("Duplicate package name '{name}' (declared at {first} and {second})")]
    DuplicatePackage {
        name: String,
        first: String,
        second: String,
    },

    #[error("Invalid package descriptor at {path}: {reason}")]
    InvalidDescriptor { path: String, reason: String },

    #[error("Failed to parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid signals file {}: {message}", path.display())]
    SignalsParse { path: PathBuf, message: String },

    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, HealthError>;

impl HealthError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HealthError::Io {
            path: path.into(),
            source,
        }
    }
}
