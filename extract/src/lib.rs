//! Pass extraction from wallet archives and JSON/CSV reporting.
//!
//! A wallet is a zip archive of inner zip archives, each carrying one pass
//! document. This crate unpacks wallets into scoped temporary directories,
//! decodes every pass it finds into [`Pass`] records, and writes the
//! collected [`WalletReport`] as JSON and CSV.
//!
//! # Main entry points
//!
//! - [`extract_wallet`] — extract all passes from one wallet.
//! - [`extractor::extract_wallet_with_options`] — same, with a custom member
//!   path or temp root, also listing skipped inner archives.
//! - [`discover::collect_wallet_paths`] and [`discover::build_wallet_report`]
//!   — find wallets on disk and group their passes.
//! - [`output::write_reports`] — write both report formats, attempting each
//!   independently.
//!
//! # Example
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use wallet_pass_extract::config::ReportConfig;
//! use wallet_pass_extract::discover::{build_wallet_report, collect_wallet_paths};
//! use wallet_pass_extract::output::{ReportTargets, write_reports};
//!
//! let config = ReportConfig::default();
//! let wallets = collect_wallet_paths(&[PathBuf::from(".")], &config.extension).unwrap();
//! let (report, failures) = build_wallet_report(&wallets, &config.extract_options());
//! assert!(failures.is_empty());
//!
//! let targets = ReportTargets::timestamped(Path::new("."));
//! let outcome = write_reports(&report, &targets, config.encoding());
//! assert!(outcome.is_success());
//! ```
//!
//! [`Pass`]: wallet_pass_core::Pass
//! [`WalletReport`]: wallet_pass_core::WalletReport

pub mod config;
pub mod discover;
pub mod encoding;
pub mod error;
pub mod extractor;
pub mod output;

pub use error::{ConfigError, ExtractError, ReportWriteError, Result};
pub use extractor::extract_wallet;
