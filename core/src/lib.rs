//! Core record types for wallet pass reports.
//!
//! This crate defines the in-memory shape of a pass extracted from a wallet
//! archive and the report mapping that groups passes by wallet:
//!
//! - [`Pass`] — one extracted pass (serial number, pass type, organization,
//!   description, and its barcodes).
//! - [`Barcode`] — one scannable code attached to a pass.
//! - [`WalletReport`] — wallet identifier → passes, iterated in sorted key
//!   order.
//!
//! Decoding ([`Pass::from_document`]) copies fields out of a parsed pass
//! document and reports missing or mistyped fields as a [`SkipReason`]
//! instead of an error.
//!
//! Column rendering ([`render_barcodes`], [`Pass::csv_columns`]) produces the
//! flat row layout used by CSV reports.
//!
//! # Example
//!
//! ```
//! use wallet_pass_core::*;
//!
//! let document = serde_json::json!({
//!     "serialNumber": "0001",
//!     "passTypeIdentifier": "pass.com.example.loyalty",
//!     "organizationName": "Example Coffee",
//!     "description": "Loyalty card",
//!     "barcodes": [
//!         { "format": "PKBarcodeFormatQR", "message": "0001", "messageEncoding": "utf-8" }
//!     ]
//! });
//!
//! let pass = match Pass::from_document(document.as_object().unwrap()) {
//!     PassDecode::Decoded(pass) => pass,
//!     PassDecode::Skipped(reason) => panic!("unexpected skip: {reason}"),
//! };
//!
//! let mut report = WalletReport::new();
//! report.insert("cards.ywe", vec![pass]);
//! assert_eq!(report.pass_count(), 1);
//! assert_eq!(report.rows().next().unwrap().0, "cards.ywe");
//! ```

mod columns;
mod decode;
mod types;

pub use columns::{CSV_HEADER, render_barcodes};
pub use decode::{PassDecode, REQUIRED_FIELDS, SkipReason};
pub use types::*;
