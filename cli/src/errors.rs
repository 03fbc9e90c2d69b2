//! Error types for the Watchly CLI

use thiserror::Error;

/// Main error type for the Watchly CLI
#[derive(Error, Debug)]
pub enum WatchlyError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{operation} failed: unexpected status {status}")]
    UnexpectedStatus {
        operation: &'static str,
        status: String,
    },

    #[error("{operation} failed: could not decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WatchlyError {
    /// HTTP status text carried by an unexpected-status failure
    pub fn status(&self) -> Option<&str> {
        match self {
            WatchlyError::UnexpectedStatus { status, .. } => Some(status),
            _ => None,
        }
    }
}
