// src/errors.rs

//! Crate-wide error type.
//!
//! A non-zero exit of the verification tool is *not* an error: it is reported
//! through [`crate::exec::RunOutcome::Failed`]. Everything here means the run
//! could not happen at all.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfiguresError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("failed to create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("failed to create log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {program:?}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialisation error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SurfiguresError>;
