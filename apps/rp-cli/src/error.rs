//! Error type for the command-line front end.

use std::path::PathBuf;

/// Wraps errors from the library crates into one type for `main`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] rp_core::RpError),

    #[error("{0}")]
    Engine(#[from] rp_engine::EngineError),

    #[error("{0}")]
    Project(#[from] rp_project::ProjectError),

    #[error("Design not found: {0}")]
    DesignNotFound(String),

    #[error("Sweep not found: {0}")]
    SweepNotFound(String),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
