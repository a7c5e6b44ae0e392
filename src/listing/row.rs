//! Document rows: wire shape, display shape, and the mapping between them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// The document kinds stored in the documents collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// An invoice ("factura")
    Invoice,

    /// A delivery note ("albarán")
    Albaran,
}

impl DocumentType {
    /// The store's string encoding of the document type
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Invoice => "INVOICE",
            DocumentType::Albaran => "ALBARAN",
        }
    }
}

/// A document record as stored, prior to any interpretation
///
/// `total` is a decimal-as-string and `emited_at` a `dd-mm-yyyy` string;
/// both stay raw here and are parsed during row mapping. `albaran_number`
/// may hold the store's "no related albaran" sentinels.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    /// Store-assigned record identifier
    pub id: String,

    /// Document number, e.g. `"F-1"`
    pub doc_number: String,

    /// Total amount as a decimal string
    pub total: String,

    /// Emission date as `dd-mm-yyyy`
    pub emited_at: String,

    /// Related delivery-note reference, if any
    #[serde(default)]
    pub albaran_number: Option<Value>,
}

/// A display-ready document row
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    /// Store-assigned record identifier
    pub id: String,

    /// Document number
    pub document_number: String,

    /// Parsed total amount
    pub total: f64,

    /// Parsed emission date
    pub emited_at: NaiveDate,

    /// Related delivery-note reference as stored, sentinels included
    pub albaran_number: Option<String>,
}

impl TryFrom<RawDocument> for DocumentRow {
    type Error = Error;

    /// Map a raw record to its display shape
    ///
    /// Parsing is strict: an unparseable total or a date that is not
    /// `dd-mm-yyyy` rejects the record instead of producing a NaN amount or
    /// a degenerate date.
    fn try_from(raw: RawDocument) -> Result<Self, Error> {
        let total: f64 = raw
            .total
            .trim()
            .parse()
            .map_err(|_| Error::malformed_document(&raw.id, format!("total '{}'", raw.total)))?;

        if !total.is_finite() {
            return Err(Error::malformed_document(
                &raw.id,
                format!("total '{}'", raw.total),
            ));
        }

        let emited_at = NaiveDate::parse_from_str(raw.emited_at.trim(), "%d-%m-%Y")
            .map_err(|_| {
                Error::malformed_document(&raw.id, format!("emited_at '{}'", raw.emited_at))
            })?;

        let albaran_number = raw.albaran_number.map(|value| match value {
            Value::String(s) => s,
            other => other.to_string(),
        });

        Ok(Self {
            id: raw.id,
            document_number: raw.doc_number,
            total,
            emited_at,
            albaran_number,
        })
    }
}

impl DocumentRow {
    /// The related albaran reference, with the store's "none" sentinels
    /// (`-1`, `INVOICE`) filtered out
    pub fn related_albaran(&self) -> Option<&str> {
        self.albaran_number
            .as_deref()
            .map(str::trim)
            .filter(|reference| {
                !reference.is_empty() && *reference != "-1" && *reference != "INVOICE"
            })
    }

    /// Render the emission date as `dd-mm-yyyy` for display
    pub fn format_date(&self) -> String {
        self.emited_at.format("%d-%m-%Y").to_string()
    }

    /// Render the total as a two-decimal currency string
    pub fn format_total(&self) -> String {
        format!("{:.2} €", self.total)
    }
}
