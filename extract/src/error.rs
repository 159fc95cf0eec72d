//! Error types for wallet extraction, report writing and configuration.
//!
//! Missing pass documents and missing fields are not errors; they are
//! reported as [`SkipReason`](wallet_pass_core::SkipReason)s by the
//! extractor. Everything here is either fatal for one wallet
//! ([`ExtractError`]) or recoverable for one report file
//! ([`ReportWriteError`]).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure while extracting one wallet.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Outer or inner archive is missing, unreadable, or not a valid zip.
    #[error("failed to open archive '{}': {source}", .path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Filesystem failure while unpacking into the temporary directory.
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Pass document is not UTF-8 text.
    #[error("pass document in '{}' is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    /// Pass document is not a JSON object.
    #[error("invalid pass document in '{}': {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Recoverable failure writing one report file.
#[derive(Debug, Error)]
pub enum ReportWriteError {
    /// The destination could not be created or written.
    #[error("failed to write report '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization failure.
    #[error("failed to serialize JSON report '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization failure.
    #[error("failed to write CSV report '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ReportWriteError {
    /// Destination path of the failed report.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } | Self::Csv { path, .. } => path,
        }
    }
}

/// Errors loading or saving a [`ReportConfig`](crate::config::ReportConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
