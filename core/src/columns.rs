//! Flat column rendering for CSV reports.

use crate::{Barcode, Pass};

/// Header row of the CSV report.
///
/// The spelling ("Barecodes", "Sertial Number") is part of the established
/// report format and must not be corrected.
pub const CSV_HEADER: [&str; 6] = [
    "Wallet Name",
    "Barecodes",
    "Description",
    "Organization Name",
    "Pass Type Identifier",
    "Sertial Number",
];

/// Renders barcodes as one human-readable string.
///
/// Each barcode becomes
/// `BarcodeNO: {i}; altText: {a}; format: {f}; message: {m}; messageEncoding: {e};`
/// with a 1-based index; entries are concatenated without a separator. A
/// missing `altText` renders as an empty value.
///
/// # Examples
///
/// ```
/// use wallet_pass_core::{Barcode, render_barcodes};
///
/// let barcodes = [Barcode::new("PDF417", "123", "iso-8859-1").with_alt_text("a")];
/// assert_eq!(
///     render_barcodes(&barcodes),
///     "BarcodeNO: 1; altText: a; format: PDF417; message: 123; messageEncoding: iso-8859-1;"
/// );
/// ```
pub fn render_barcodes(barcodes: &[Barcode]) -> String {
    barcodes
        .iter()
        .enumerate()
        .map(|(idx, barcode)| {
            format!(
                "BarcodeNO: {}; altText: {}; format: {}; message: {}; messageEncoding: {};",
                idx + 1,
                barcode.alt_text.as_deref().unwrap_or(""),
                barcode.format,
                barcode.message,
                barcode.message_encoding,
            )
        })
        .collect()
}

impl Pass {
    /// Returns the CSV row for this pass, in [`CSV_HEADER`] order.
    pub fn csv_columns(&self, wallet: &str) -> [String; 6] {
        [
            wallet.to_string(),
            render_barcodes(&self.barcodes),
            self.description.clone(),
            self.organization_name.clone(),
            self.pass_type_identifier.clone(),
            self.serial_number.clone(),
        ]
    }
}
