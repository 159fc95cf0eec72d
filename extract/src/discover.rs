//! Wallet file discovery and multi-wallet report assembly.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use wallet_pass_core::WalletReport;

use crate::extractor::{ExtractOptions, extract_wallet_with_options};

/// Conventional extension of wallet archives.
pub const DEFAULT_WALLET_EXTENSION: &str = "ywe";

/// Typed error for wallet discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing input (e.g. non-existent path).
    #[error("{0}")]
    InvalidInput(String),
}

/// A wallet that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletFailure {
    pub wallet: PathBuf,
    pub message: String,
}

/// Collects wallet paths from input files and/or directories.
///
/// Files are taken as given. Directories are scanned (non-recursively) for
/// files whose extension matches `extension`, ignoring ASCII case. Directory
/// matches are sorted; duplicates are dropped, keeping the first occurrence.
pub fn collect_wallet_paths(
    inputs: &[PathBuf],
    extension: &str,
) -> Result<Vec<PathBuf>, DiscoverError> {
    if inputs.is_empty() {
        return Err(DiscoverError::InvalidInput(
            "No wallet paths were provided".to_string(),
        ));
    }

    let mut seen = BTreeSet::new();
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && has_extension(&path, extension) {
                    found.push(path);
                }
            }
            found.sort();
            for path in found {
                if seen.insert(path.clone()) {
                    paths.push(path);
                }
            }
            continue;
        }

        if input.is_file() {
            if seen.insert(input.clone()) {
                paths.push(input.clone());
            }
            continue;
        }

        return Err(DiscoverError::InvalidInput(format!(
            "Wallet path '{}' does not exist",
            input.display(),
        )));
    }

    Ok(paths)
}

/// Extracts each wallet in order and groups the passes by wallet path.
///
/// A wallet that fails fatally is left out of the report and listed in the
/// returned failures; the remaining wallets are still processed.
pub fn build_wallet_report(
    paths: &[PathBuf],
    options: &ExtractOptions,
) -> (WalletReport, Vec<WalletFailure>) {
    let mut report = WalletReport::new();
    let mut failures = Vec::new();

    for path in paths {
        match extract_wallet_with_options(path, options) {
            Ok(run) => report.insert(path.display().to_string(), run.passes),
            Err(err) => {
                warn!(wallet = %path.display(), error = %err, "Failed to extract wallet");
                failures.push(WalletFailure {
                    wallet: path.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    (report, failures)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension.trim_start_matches('.')))
}
