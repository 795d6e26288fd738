use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RebuildError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("fetch failed for {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("{table} count too low: {count} < {minimum}")]
    InsufficientEntries {
        table: String,
        count: usize,
        minimum: usize,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RebuildError>;
