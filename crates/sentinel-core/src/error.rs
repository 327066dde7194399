use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by DNS Sentinel.
///
/// Only input-level failures are represented here: a malformed individual
/// row is recovered locally by the reader (skipped and counted) and never
/// becomes an error, and degenerate statistics resolve to defined default
/// values inside the feature calculator.
#[derive(Error, Debug)]
pub enum SentinelError {
    /// The query log could not be opened or read from disk.
    #[error("Failed to read query log {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created or written.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The query log holds a header (or nothing) but zero data rows.
    ///
    /// Deliberately distinct from "zero clients after filtering": an empty
    /// file signals missing or truncated input, not a quiet empty run.
    #[error("Query log {0} contains no data rows")]
    EmptyInput(PathBuf),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the sentinel crates.
pub type Result<T> = std::result::Result<T, SentinelError>;
