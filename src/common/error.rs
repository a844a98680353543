//! Error types for the e2e driver
//!
//! Step failures of external programs are not errors: they are reported as a
//! diagnostic and turn into a failed case. The variants here cover everything
//! that stops a case (or the whole run) from being attempted properly.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the e2e driver
#[derive(Error, Debug)]
pub enum Error {
    // === Registry Errors ===
    #[error("Unknown test case '{name}'. Known cases: {known}")]
    UnknownTestCase { name: String, known: String },

    // === Filesystem Errors ===
    #[error("Cannot enter directory '{}': {source}", path.display())]
    DirectoryChange {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove stale build output '{}': {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // === Process Errors ===
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create an unknown test case error listing the registered names
    pub fn unknown_test_case<S: AsRef<str>>(name: &str, known: &[S]) -> Self {
        Self::UnknownTestCase {
            name: name.to_string(),
            known: known.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", "),
        }
    }

    /// Create a directory change error
    pub fn directory_change(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirectoryChange {
            path: path.into(),
            source,
        }
    }

    /// Create a spawn error for an external program
    pub fn spawn(program: impl std::fmt::Display, source: io::Error) -> Self {
        Self::Spawn {
            program: program.to_string(),
            source,
        }
    }
}
