//! Pass document decoding.
//!
//! Copies the required fields out of a parsed `pass.json` object. A document
//! that lacks a required field, or carries it with the wrong JSON type, is not
//! an error: decoding yields [`PassDecode::Skipped`] and the caller moves on to
//! the next inner archive.
//!
//! # Examples
//!
//! ```
//! use wallet_pass_core::*;
//!
//! let document = serde_json::json!({
//!     "serialNumber": "1",
//!     "passTypeIdentifier": "pass.com.example",
//!     "organizationName": "Example",
//!     "barcodes": []
//! });
//!
//! let decoded = Pass::from_document(document.as_object().unwrap());
//! assert_eq!(decoded, PassDecode::Skipped(SkipReason::MissingField("description")));
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Barcode, Pass};

/// Top-level fields a pass document must carry, in check order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "barcodes",
    "serialNumber",
    "passTypeIdentifier",
    "organizationName",
    "description",
];

/// Why an inner archive produced no pass.
///
/// These are expected data-shape variations, absorbed by the extraction loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The inner archive has no pass document member.
    #[error("pass document not found in archive")]
    MissingMember,
    /// A required field is absent from the document.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// A required field is present but has an unexpected type.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),
}

/// Outcome of decoding one pass document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassDecode {
    Decoded(Pass),
    Skipped(SkipReason),
}

impl PassDecode {
    /// Returns the pass, discarding the skip reason.
    pub fn into_pass(self) -> Option<Pass> {
        match self {
            Self::Decoded(pass) => Some(pass),
            Self::Skipped(_) => None,
        }
    }
}

impl From<Result<Pass, SkipReason>> for PassDecode {
    fn from(result: Result<Pass, SkipReason>) -> Self {
        match result {
            Ok(pass) => Self::Decoded(pass),
            Err(reason) => Self::Skipped(reason),
        }
    }
}

impl Pass {
    /// Builds a pass from a parsed pass document.
    ///
    /// All [`REQUIRED_FIELDS`] are checked for presence first, so a document
    /// missing `description` reports that even when `barcodes` is malformed.
    pub fn from_document(document: &Map<String, Value>) -> PassDecode {
        decode_pass(document).into()
    }
}

impl Barcode {
    /// Builds a barcode from one entry of a document's `barcodes` array.
    ///
    /// `format`, `message` and `messageEncoding` must be strings; `altText` is
    /// optional but must be a string when present.
    pub fn from_document(entry: &Value) -> Result<Barcode, SkipReason> {
        let entry = entry
            .as_object()
            .ok_or(SkipReason::InvalidField("barcodes"))?;

        let alt_text = match entry.get("altText") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => return Err(SkipReason::InvalidField("altText")),
        };

        Ok(Barcode {
            alt_text,
            format: string_field(entry, "format")?,
            message: string_field(entry, "message")?,
            message_encoding: string_field(entry, "messageEncoding")?,
        })
    }
}

fn decode_pass(document: &Map<String, Value>) -> Result<Pass, SkipReason> {
    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .find(|field| !document.contains_key(**field))
    {
        return Err(SkipReason::MissingField(*missing));
    }

    let barcodes = document["barcodes"]
        .as_array()
        .ok_or(SkipReason::InvalidField("barcodes"))?
        .iter()
        .map(Barcode::from_document)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pass {
        barcodes,
        description: string_field(document, "description")?,
        organization_name: string_field(document, "organizationName")?,
        pass_type_identifier: string_field(document, "passTypeIdentifier")?,
        serial_number: string_field(document, "serialNumber")?,
    })
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> Result<String, SkipReason> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(SkipReason::InvalidField(field)),
        None => Err(SkipReason::MissingField(field)),
    }
}
