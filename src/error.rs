// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} still failing after {attempts} attempts (last status: {last_status})")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_status: String,
    },

    #[error("rendering {url} failed: {reason}")]
    Render { url: String, reason: String },

    #[error("no table headings found")]
    NoHeadings,

    #[error("row {row} has {found} values but the table has {expected} headings")]
    SchemaMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ScrapeError {
    /// Process exit status for this failure. Zero is reserved for success.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScrapeError::Config(_) => 2,
            ScrapeError::Http { .. } | ScrapeError::RetriesExhausted { .. } => 3,
            ScrapeError::Render { .. } => 4,
            ScrapeError::NoHeadings => 5,
            ScrapeError::SchemaMismatch { .. } => 6,
            ScrapeError::Io { .. } | ScrapeError::Csv { .. } => 7,
        }
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
