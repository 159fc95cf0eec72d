//! Text encoding policy for pass documents and report files.
//!
//! Input documents are UTF-8 with an optional byte-order mark. Report files
//! are UTF-8 and, by default, start with a byte-order mark so spreadsheet
//! tools detect the encoding.

use std::borrow::Cow;
use std::io::{self, Write};

use encoding_rs::UTF_8;
use serde::{Deserialize, Serialize};

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Byte-order-mark handling for text written by the report writers.
///
/// Decoding always tolerates a leading BOM; the `bom` flag only
/// controls output.
///
/// # Examples
///
/// ```
/// use wallet_pass_extract::encoding::TextEncoding;
///
/// let text = TextEncoding::default().decode(b"\xEF\xBB\xBF{}").unwrap();
/// assert_eq!(text, "{}");
///
/// let mut out = Vec::new();
/// TextEncoding::without_bom().write_prefix(&mut out).unwrap();
/// assert!(out.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEncoding {
    /// Prefix written text with [`UTF8_BOM`].
    pub bom: bool,
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self { bom: true }
    }
}

impl TextEncoding {
    /// Policy that writes plain UTF-8 without a byte-order mark.
    pub fn without_bom() -> Self {
        Self { bom: false }
    }

    /// Decodes UTF-8 bytes, dropping a leading BOM.
    ///
    /// Returns `None` when the bytes are not valid UTF-8.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if had_errors { None } else { Some(text) }
    }

    /// Writes the configured prefix (the BOM, or nothing).
    pub fn write_prefix<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.bom {
            out.write_all(UTF8_BOM)?;
        }
        Ok(())
    }
}
