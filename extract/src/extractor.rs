//! Pass extraction from nested wallet archives.
//!
//! A wallet is a zip archive whose top-level entries are themselves zip
//! archives, one per pass. Each inner archive carries a pass document at
//! [`PASS_DOCUMENT_MEMBER`].
//!
//! # Failure tolerance
//!
//! - An outer or inner archive that cannot be opened as a zip is fatal for
//!   the whole wallet ([`ExtractError::ArchiveOpen`]).
//! - An inner archive without a pass document, or whose document lacks a
//!   required field, yields no pass and extraction continues. These skips are
//!   listed in [`WalletExtraction::skipped`] but never surface as errors.
//!
//! Both levels unpack into [`tempfile::TempDir`]s owned by the call, so
//! temporary files are removed on every return path.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use wallet_pass_extract::extractor::extract_wallet;
//!
//! let passes = extract_wallet(Path::new("cards.ywe")).unwrap();
//! for pass in &passes {
//!     println!("{} ({})", pass.description, pass.serial_number);
//! }
//! ```

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::TempDir;
use tracing::{debug, info, warn};
use wallet_pass_core::{Pass, PassDecode, SkipReason};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::encoding::TextEncoding;
use crate::error::{ExtractError, Result};

/// Path of the pass document inside each inner archive.
pub const PASS_DOCUMENT_MEMBER: &str = "/pass.json";

/// File name the pass document is unpacked to.
const UNPACKED_DOCUMENT_NAME: &str = "pass.json";

const WALLET_DIR_PREFIX: &str = "wallet-";
const PASS_DIR_PREFIX: &str = "pass-";

/// Settings for one wallet extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Member name of the pass document. Looked up verbatim first, then
    /// without its leading `/`; the fallback also accepts archives whose
    /// writer dropped the root slash.
    pub member: String,
    /// Parent for temporary directories. `None` uses the system temp dir.
    pub temp_root: Option<PathBuf>,
    /// Decoding policy for the pass document.
    pub encoding: TextEncoding,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            member: PASS_DOCUMENT_MEMBER.to_string(),
            temp_root: None,
            encoding: TextEncoding::default(),
        }
    }
}

/// An inner archive that produced no pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// File name of the inner archive within the wallet.
    pub inner_archive: String,
    pub reason: SkipReason,
}

/// Result of extracting one wallet, with per-item diagnostics.
#[derive(Debug, Clone)]
pub struct WalletExtraction {
    pub wallet: PathBuf,
    /// Passes in inner-archive order.
    pub passes: Vec<Pass>,
    pub skipped: Vec<SkippedItem>,
    /// Number of inner archives found in the wallet.
    pub inner_archives: usize,
}

/// Extracts every pass from the wallet at `path` with default options.
pub fn extract_wallet(path: &Path) -> Result<Vec<Pass>> {
    extract_wallet_with_options(path, &ExtractOptions::default()).map(|run| run.passes)
}

/// Extracts every pass from the wallet at `path`, reporting skipped items.
///
/// Inner archives are processed in file-name order.
pub fn extract_wallet_with_options(
    path: &Path,
    options: &ExtractOptions,
) -> Result<WalletExtraction> {
    let mut wallet = open_archive(path)?;
    let staging = scoped_temp_dir(options, WALLET_DIR_PREFIX)?;
    let unpacked = unpack_archive(&mut wallet, path, staging.path())?;
    debug!(wallet = %path.display(), entries = unpacked, "Unpacked wallet");

    let inner_archives = list_children(staging.path())?;
    let mut run = WalletExtraction {
        wallet: path.to_path_buf(),
        passes: Vec::new(),
        skipped: Vec::new(),
        inner_archives: inner_archives.len(),
    };

    for inner in &inner_archives {
        match extract_pass(inner, options)? {
            PassDecode::Decoded(pass) => run.passes.push(pass),
            PassDecode::Skipped(reason) => {
                let name = inner
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                debug!(
                    wallet = %path.display(),
                    inner_archive = %name,
                    reason = %reason,
                    "Skipping inner archive"
                );
                run.skipped.push(SkippedItem {
                    inner_archive: name,
                    reason,
                });
            }
        }
    }

    info!(
        wallet = %path.display(),
        passes = run.passes.len(),
        skipped = run.skipped.len(),
        "Extracted wallet"
    );
    Ok(run)
}

/// Opens one inner archive and decodes its pass document.
fn extract_pass(inner: &Path, options: &ExtractOptions) -> Result<PassDecode> {
    let mut archive = open_archive(inner)?;
    let scratch = scoped_temp_dir(options, PASS_DIR_PREFIX)?;

    let Some(index) = find_member(&archive, &options.member) else {
        return Ok(PassDecode::Skipped(SkipReason::MissingMember));
    };

    let document_path = scratch.path().join(UNPACKED_DOCUMENT_NAME);
    {
        let mut member = archive.by_index(index).map_err(archive_open(inner))?;
        let mut out = File::create(&document_path).map_err(io_error(&document_path))?;
        io::copy(&mut member, &mut out).map_err(io_error(&document_path))?;
    }

    let bytes = fs::read(&document_path).map_err(io_error(&document_path))?;
    let text = options
        .encoding
        .decode(&bytes)
        .ok_or_else(|| ExtractError::Encoding {
            path: inner.to_path_buf(),
        })?;
    let document: Map<String, Value> =
        serde_json::from_str(&text).map_err(|source| ExtractError::Document {
            path: inner.to_path_buf(),
            source,
        })?;

    Ok(Pass::from_document(&document))
}

fn find_member(archive: &ZipArchive<File>, member: &str) -> Option<usize> {
    archive
        .index_for_name(member)
        .or_else(|| archive.index_for_name(member.trim_start_matches('/')))
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|err| archive_open(path)(ZipError::Io(err)))?;
    ZipArchive::new(file).map_err(archive_open(path))
}

/// Writes every entry of `archive` below `dest`, returning the file count.
///
/// Entries whose names would escape `dest` are skipped.
fn unpack_archive(archive: &mut ZipArchive<File>, path: &Path, dest: &Path) -> Result<usize> {
    let mut count = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_open(path))?;

        let Some(relative) = entry_relative_path(entry.name()) else {
            warn!(wallet = %path.display(), entry = entry.name(), "Skipping entry with unsafe path");
            continue;
        };
        let output_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&output_path).map_err(io_error(&output_path))?;
            continue;
        }
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let mut outfile = File::create(&output_path).map_err(io_error(&output_path))?;
        io::copy(&mut entry, &mut outfile).map_err(io_error(&output_path))?;
        count += 1;
    }
    Ok(count)
}

/// Relative path an outer entry is unpacked to.
///
/// Leading `/` and `\\` are stripped, so `/1.pkpass` lands at `1.pkpass`.
/// Names that still climb out of the destination (`..`, drive prefixes) or
/// that are empty after stripping yield `None`.
fn entry_relative_path(name: &str) -> Option<PathBuf> {
    if name.contains('\0') {
        return None;
    }
    let trimmed = name.trim_start_matches(['/', '\\']);
    let mut relative = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    // `C:` style names are plain components on Unix.
    if trimmed.split(['/', '\\']).any(|part| part == ".." || part.ends_with(':')) {
        return None;
    }
    (!relative.as_os_str().is_empty()).then_some(relative)
}

/// Immediate children of `dir`, sorted by path.
fn list_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(io_error(dir))?;
    children.sort();
    Ok(children)
}

fn scoped_temp_dir(options: &ExtractOptions, prefix: &str) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix);
    match &options.temp_root {
        Some(root) => builder.tempdir_in(root).map_err(io_error(root)),
        None => builder.tempdir().map_err(io_error(&std::env::temp_dir())),
    }
}

fn archive_open(path: &Path) -> impl FnOnce(ZipError) -> ExtractError {
    let path = path.to_path_buf();
    move |source| ExtractError::ArchiveOpen { path, source }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ExtractError {
    let path = path.to_path_buf();
    move |source| ExtractError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(io::Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in files {
            writer.start_file(name.to_string(), options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn write_zip(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, zip_bytes(files)).unwrap();
        path
    }

    const DOCUMENT: &[u8] = br#"{
        "serialNumber": "1",
        "passTypeIdentifier": "pass.com.example",
        "organizationName": "Example",
        "description": "Card",
        "barcodes": []
    }"#;

    #[test]
    fn test_entry_relative_path_strips_leading_separators() {
        assert_eq!(entry_relative_path("/1.pkpass"), Some(PathBuf::from("1.pkpass")));
        assert_eq!(entry_relative_path("\\\\2.pkpass"), Some(PathBuf::from("2.pkpass")));
        assert_eq!(entry_relative_path("./dir/3.pkpass"), Some(PathBuf::from("dir/3.pkpass")));
        assert_eq!(entry_relative_path("plain.pkpass"), Some(PathBuf::from("plain.pkpass")));
    }

    #[test]
    fn test_entry_relative_path_rejects_escaping_names() {
        assert_eq!(entry_relative_path("../evil.pkpass"), None);
        assert_eq!(entry_relative_path("/a/../../evil.pkpass"), None);
        assert_eq!(entry_relative_path("a\\..\\..\\evil.pkpass"), None);
        assert_eq!(entry_relative_path("C:\\evil.pkpass"), None);
        assert_eq!(entry_relative_path("/"), None);
        assert_eq!(entry_relative_path(""), None);
    }

    #[test]
    fn test_unpack_archive_keeps_root_prefixed_entries() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            dir.path(),
            "wallet.ywe",
            &[("/1.pkpass", b"one"), ("2.pkpass", b"two"), ("../escape.pkpass", b"x")],
        );
        let dest = TempDir::new().unwrap();
        let mut archive = open_archive(&path).unwrap();
        let count = unpack_archive(&mut archive, &path, dest.path()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read(dest.path().join("1.pkpass")).unwrap(), b"one");
        assert_eq!(fs::read(dest.path().join("2.pkpass")).unwrap(), b"two");
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_find_member_accepts_name_without_leading_slash() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "inner.pkpass", &[("pass.json", DOCUMENT)]);
        let archive = open_archive(&path).unwrap();
        assert_eq!(find_member(&archive, PASS_DOCUMENT_MEMBER), Some(0));
        assert_eq!(find_member(&archive, "/manifest.json"), None);
    }

    #[test]
    fn test_extract_pass_reads_leading_slash_member() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            dir.path(),
            "inner.pkpass",
            &[("icon.png", b"png"), ("/pass.json", DOCUMENT)],
        );
        let decoded = extract_pass(&path, &ExtractOptions::default()).unwrap();
        assert_eq!(decoded.into_pass().unwrap().serial_number, "1");
    }

    #[test]
    fn test_extract_pass_reports_missing_member() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "inner.pkpass", &[("manifest.json", b"{}")]);
        let decoded = extract_pass(&path, &ExtractOptions::default()).unwrap();
        assert_eq!(decoded, PassDecode::Skipped(SkipReason::MissingMember));
    }

    #[test]
    fn test_extract_pass_tolerates_bom() {
        let dir = TempDir::new().unwrap();
        let mut document = crate::encoding::UTF8_BOM.to_vec();
        document.extend_from_slice(DOCUMENT);
        let path = write_zip(dir.path(), "inner.pkpass", &[("/pass.json", document.as_slice())]);
        let decoded = extract_pass(&path, &ExtractOptions::default()).unwrap();
        assert!(matches!(decoded, PassDecode::Decoded(_)));
    }

    #[test]
    fn test_extract_pass_rejects_non_object_document() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "inner.pkpass", &[("/pass.json", b"[1, 2]")]);
        let err = extract_pass(&path, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Document { .. }));
    }

    #[test]
    fn test_extract_pass_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "inner.pkpass", &[("/pass.json", b"{\"a\": \"\xff\"}")]);
        let err = extract_pass(&path, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::Encoding { .. }));
    }

    #[test]
    fn test_unpack_archive_recreates_directories() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(dir.path(), "wallet.ywe", &[("nested/a.pkpass", b"x"), ("b.pkpass", b"y")]);
        let dest = TempDir::new().unwrap();
        let mut archive = open_archive(&path).unwrap();
        let count = unpack_archive(&mut archive, &path, dest.path()).unwrap();
        assert_eq!(count, 2);
        assert!(dest.path().join("nested").join("a.pkpass").is_file());
        assert_eq!(
            list_children(dest.path()).unwrap(),
            vec![dest.path().join("b.pkpass"), dest.path().join("nested")]
        );
    }

    #[test]
    fn test_open_archive_rejects_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not-a-zip.ywe");
        fs::write(&path, b"plain text").unwrap();
        let err = open_archive(&path).unwrap_err();
        assert!(matches!(err, ExtractError::ArchiveOpen { .. }));
    }
}
