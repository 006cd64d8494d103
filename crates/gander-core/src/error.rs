//! Error type for the chat boundary and configuration
//!
//! Formatting and revealing never fail; only I/O around them does.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("message is required")]
    EmptyMessage,

    #[error("request to chat backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
