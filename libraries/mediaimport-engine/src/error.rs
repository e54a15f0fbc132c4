//! Error types for the import engine

use mediaimport_core::HostError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid run configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Secondary file '{expected}' for '{primary}' not found in {folder}")]
    MissingSecondary {
        folder: PathBuf,
        primary: String,
        expected: String,
    },

    #[error("Files '{first}' and '{second}' in {folder} share the name '{base_name}'")]
    DuplicateBaseName {
        folder: PathBuf,
        base_name: String,
        first: String,
        second: String,
    },
}
