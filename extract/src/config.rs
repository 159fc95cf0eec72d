//! Report run configuration.
//!
//! Defines the YAML-serializable settings for a report run: which files count
//! as wallets, where the pass document lives inside each inner archive, and
//! how reports are written. Every field has a default, so an empty file is a
//! valid configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! extension: ywe
//! member: /pass.json
//! output_dir: reports
//! bom: true
//! ```

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discover::DEFAULT_WALLET_EXTENSION;
use crate::encoding::TextEncoding;
use crate::error::ConfigError;
use crate::extractor::{ExtractOptions, PASS_DOCUMENT_MEMBER};

/// Settings for one report run.
///
/// # Examples
///
/// ```
/// use wallet_pass_extract::config::ReportConfig;
///
/// let config: ReportConfig = serde_yaml::from_str("output_dir: reports\nbom: false\n").unwrap();
/// assert_eq!(config.extension, "ywe");
/// assert_eq!(config.member, "/pass.json");
/// assert!(!config.encoding().bom);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Extension of wallet files when scanning directories.
    pub extension: String,
    /// Pass document member inside each inner archive.
    pub member: String,
    /// Directory for timestamp-named reports.
    pub output_dir: PathBuf,
    /// Prefix reports with a UTF-8 byte-order mark.
    pub bom: bool,
    /// Parent for temporary extraction directories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_root: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_WALLET_EXTENSION.to_string(),
            member: PASS_DOCUMENT_MEMBER.to_string(),
            output_dir: PathBuf::from("."),
            bom: true,
            temp_root: None,
        }
    }
}

impl ReportConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if parsing fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Saves the configuration as YAML.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Output encoding policy.
    pub fn encoding(&self) -> TextEncoding {
        TextEncoding { bom: self.bom }
    }

    /// Extraction options derived from this configuration.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            member: self.member.clone(),
            temp_root: self.temp_root.clone(),
            ..ExtractOptions::default()
        }
    }
}
