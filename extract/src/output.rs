//! JSON and CSV report writers.
//!
//! Both writers take a [`WalletReport`] and a destination path, overwrite the
//! destination, and return the written path so callers can tell the user
//! where the report went. Failures are [`ReportWriteError`]s; use
//! [`write_reports`] to attempt both formats independently.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wallet_pass_core::WalletReport;
//! use wallet_pass_extract::encoding::TextEncoding;
//! use wallet_pass_extract::output::{ReportTargets, write_reports};
//!
//! let report = WalletReport::new();
//! let targets = ReportTargets::timestamped(Path::new("."));
//! let outcome = write_reports(&report, &targets, TextEncoding::default());
//! for path in outcome.written() {
//!     println!("Creating report:\n\t{}", path.display());
//! }
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use wallet_pass_core::{CSV_HEADER, WalletReport};

use crate::encoding::TextEncoding;
use crate::error::ReportWriteError;

/// Indentation used by the JSON report.
const JSON_INDENT: &[u8] = b"    ";

/// `strftime` pattern of default report file stems.
pub const REPORT_STEM_FORMAT: &str = "%Y-%m-%d_%H:%M:%S%z";

/// Renders a report file stem such as `2024-03-09_14:05:00+0100`.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use wallet_pass_extract::output::default_report_stem;
///
/// let offset = FixedOffset::east_opt(3 * 3600).unwrap();
/// let now = offset.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
/// assert_eq!(default_report_stem(&now), "2024-03-09_14:05:00+0300");
/// ```
pub fn default_report_stem<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(REPORT_STEM_FORMAT).to_string()
}

/// Destination paths for the two report formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTargets {
    pub json: PathBuf,
    pub csv: PathBuf,
}

impl ReportTargets {
    /// Targets named `<stem>.json` and `<stem>.csv` inside `dir`.
    pub fn with_stem(dir: &Path, stem: &str) -> Self {
        Self {
            json: dir.join(format!("{stem}.json")),
            csv: dir.join(format!("{stem}.csv")),
        }
    }

    /// Targets named after the current local time, evaluated now.
    pub fn timestamped(dir: &Path) -> Self {
        Self::with_stem(dir, &default_report_stem(&Local::now()))
    }

    /// Replaces the JSON destination when `path` is set.
    pub fn override_json(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.json = path;
        }
        self
    }

    /// Replaces the CSV destination when `path` is set.
    pub fn override_csv(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.csv = path;
        }
        self
    }
}

/// Per-format results of [`write_reports`].
#[derive(Debug)]
pub struct ReportOutcome {
    pub json: Result<PathBuf, ReportWriteError>,
    pub csv: Result<PathBuf, ReportWriteError>,
}

impl ReportOutcome {
    /// Paths that were written successfully, JSON first.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        [&self.json, &self.csv]
            .into_iter()
            .filter_map(|result| result.as_ref().ok().map(PathBuf::as_path))
    }

    /// Write failures, JSON first.
    pub fn errors(&self) -> impl Iterator<Item = &ReportWriteError> {
        [&self.json, &self.csv]
            .into_iter()
            .filter_map(|result| result.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.json.is_ok() && self.csv.is_ok()
    }
}

/// Writes the JSON report, then the CSV report, regardless of whether the
/// first write failed.
pub fn write_reports(
    report: &WalletReport,
    targets: &ReportTargets,
    encoding: TextEncoding,
) -> ReportOutcome {
    ReportOutcome {
        json: write_json(report, &targets.json, encoding),
        csv: write_csv(report, &targets.csv, encoding),
    }
}

/// Renders the report as key-sorted JSON with 4-space indentation.
///
/// Non-ASCII text is kept literally. No byte-order mark is added.
pub fn render_json(report: &WalletReport) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    write_json_to(report, &mut buf)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Writes the JSON report to `path`, overwriting it.
pub fn write_json(
    report: &WalletReport,
    path: &Path,
    encoding: TextEncoding,
) -> Result<PathBuf, ReportWriteError> {
    let mut out = BufWriter::new(File::create(path).map_err(write_io(path))?);
    encoding.write_prefix(&mut out).map_err(write_io(path))?;
    write_json_to(report, &mut out).map_err(|source| {
        if source.is_io() {
            write_io(path)(source.into())
        } else {
            ReportWriteError::Json {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    out.flush().map_err(write_io(path))?;
    Ok(path.to_path_buf())
}

/// Renders the report as CSV text, header first. No byte-order mark is added.
pub fn render_csv(report: &WalletReport) -> csv::Result<String> {
    let buf = write_csv_to(report, Vec::new())?;
    String::from_utf8(buf)
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Writes the CSV report to `path`, overwriting it.
pub fn write_csv(
    report: &WalletReport,
    path: &Path,
    encoding: TextEncoding,
) -> Result<PathBuf, ReportWriteError> {
    let mut out = BufWriter::new(File::create(path).map_err(write_io(path))?);
    encoding.write_prefix(&mut out).map_err(write_io(path))?;
    let mut out = write_csv_to(report, out).map_err(|source| ReportWriteError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(write_io(path))?;
    Ok(path.to_path_buf())
}

fn write_json_to<W: Write>(report: &WalletReport, out: W) -> serde_json::Result<()> {
    // Going through `Value` sorts object keys at every level.
    let value = serde_json::to_value(report)?;
    let mut serializer =
        serde_json::Serializer::with_formatter(out, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer)
}

/// Writes header and rows, returning the underlying writer once flushed.
fn write_csv_to<W: Write>(report: &WalletReport, out: W) -> csv::Result<W> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for (wallet, pass) in report.rows() {
        writer.write_record(pass.csv_columns(wallet))?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|err| {
        csv::Error::from(io::Error::new(err.error().kind(), err.error().to_string()))
    })
}

fn write_io(path: &Path) -> impl FnOnce(io::Error) -> ReportWriteError {
    let path = path.to_path_buf();
    move |source| ReportWriteError::Io { path, source }
}
