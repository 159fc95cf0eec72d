//! Record type definitions for extracted passes.
//!
//! The types serialize with [`serde`]. Field declaration order is
//! alphabetical so that struct serialization already matches the key-sorted
//! layout of the JSON report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One scannable code attached to a pass.
///
/// Keys keep the pass document's camelCase spelling when serialized.
///
/// # Examples
///
/// ```
/// use wallet_pass_core::Barcode;
///
/// let barcode = Barcode::new("PKBarcodeFormatPDF417", "123", "iso-8859-1").with_alt_text("a");
/// let json = serde_json::to_string(&barcode).unwrap();
/// assert_eq!(
///     json,
///     r#"{"altText":"a","format":"PKBarcodeFormatPDF417","message":"123","messageEncoding":"iso-8859-1"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    /// Human-readable text shown under the code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Symbology identifier (e.g. `PKBarcodeFormatQR`).
    pub format: String,
    /// Encoded payload.
    pub message: String,
    /// Text encoding of the payload (e.g. `iso-8859-1`).
    pub message_encoding: String,
}

impl Barcode {
    /// Creates a barcode without alternate text.
    pub fn new(format: &str, message: &str, message_encoding: &str) -> Self {
        Self {
            alt_text: None,
            format: format.to_string(),
            message: message.to_string(),
            message_encoding: message_encoding.to_string(),
        }
    }

    /// Adds alternate display text.
    pub fn with_alt_text(mut self, alt_text: &str) -> Self {
        self.alt_text = Some(alt_text.to_string());
        self
    }
}

/// A pass extracted from one inner archive of a wallet.
///
/// Constructed by [`Pass::from_document`](crate::Pass::from_document) once
/// every required field is present, or directly via [`Pass::new`].
///
/// # Examples
///
/// ```
/// use wallet_pass_core::{Barcode, Pass};
///
/// let pass = Pass::new("SN-1", "pass.com.example", "Example", "Boarding pass")
///     .with_barcode(Barcode::new("PKBarcodeFormatQR", "SN-1", "utf-8"));
/// assert_eq!(pass.barcodes.len(), 1);
/// assert_eq!(pass.serial_number, "SN-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pass {
    /// Barcodes in source order. May be empty.
    pub barcodes: Vec<Barcode>,
    pub description: String,
    pub organization_name: String,
    pub pass_type_identifier: String,
    /// Opaque identifier assigned by the issuer.
    pub serial_number: String,
}

impl Pass {
    /// Creates a pass with no barcodes.
    pub fn new(
        serial_number: &str,
        pass_type_identifier: &str,
        organization_name: &str,
        description: &str,
    ) -> Self {
        Self {
            barcodes: Vec::new(),
            description: description.to_string(),
            organization_name: organization_name.to_string(),
            pass_type_identifier: pass_type_identifier.to_string(),
            serial_number: serial_number.to_string(),
        }
    }

    /// Appends a barcode, keeping insertion order.
    pub fn with_barcode(mut self, barcode: Barcode) -> Self {
        self.barcodes.push(barcode);
        self
    }
}

/// Passes grouped by wallet identifier (usually the wallet's path).
///
/// Backed by a [`BTreeMap`], so iteration and serialization are always in
/// lexicographic wallet order regardless of insertion order.
///
/// # Examples
///
/// ```
/// use wallet_pass_core::{Pass, WalletReport};
///
/// let mut report = WalletReport::new();
/// report.insert("b.ywe", vec![Pass::new("2", "t", "o", "d")]);
/// report.insert("a.ywe", Vec::new());
///
/// let wallets: Vec<&str> = report.wallets().collect();
/// assert_eq!(wallets, ["a.ywe", "b.ywe"]);
/// assert_eq!(report.pass_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletReport {
    wallets: BTreeMap<String, Vec<Pass>>,
}

impl WalletReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the passes of one wallet, replacing any previous entry.
    pub fn insert(&mut self, wallet: impl Into<String>, passes: Vec<Pass>) {
        self.wallets.insert(wallet.into(), passes);
    }

    /// Returns the passes recorded for `wallet`.
    pub fn get(&self, wallet: &str) -> Option<&[Pass]> {
        self.wallets.get(wallet).map(Vec::as_slice)
    }

    /// Wallet identifiers in sorted order.
    pub fn wallets(&self) -> impl Iterator<Item = &str> {
        self.wallets.keys().map(String::as_str)
    }

    /// Number of wallets, including wallets without passes.
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Total number of passes across all wallets.
    pub fn pass_count(&self) -> usize {
        self.wallets.values().map(Vec::len).sum()
    }

    /// Every pass paired with its wallet, in wallet-then-record order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &Pass)> {
        self.wallets
            .iter()
            .flat_map(|(wallet, passes)| passes.iter().map(move |pass| (wallet.as_str(), pass)))
    }
}

impl FromIterator<(String, Vec<Pass>)> for WalletReport {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Pass>)>>(iter: I) -> Self {
        Self {
            wallets: iter.into_iter().collect(),
        }
    }
}
