//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations
//! must implement, plus the serialized payloads they exchange. The nested
//! document form travels as a single text payload; the tabular form travels
//! as a named-sheet container so storage adapters stay free to pick their
//! own on-disk encoding.

use crate::deck::Deck;
use crate::error::FormatError;

/// One sheet of the tabular container: CSV text with a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub content: String,
}

/// The workbook-like container exchanged with tabular storage adapters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
    /// Advisory constraint manifest as JSON. An editing aid attached next to
    /// the sheets; reconstruction never reads it back.
    pub constraints: Option<String>,
}

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedDeck {
    /// Single text document (e.g. the JSON nested form)
    Text(String),
    /// Multi-sheet tabular container
    Sheets(Workbook),
}

/// Trait for deck formats
///
/// Implementors provide bidirectional conversion between a serialized
/// representation and the deck entity model. Formats can support parsing,
/// serialization, or both.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "json", "workbook")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (serialized → deck)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (deck → serialized)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse a serialized payload into a deck
    ///
    /// Default implementation returns NotSupported error.
    /// Formats that support parsing should override this method.
    fn parse(&self, _source: &SerializedDeck) -> Result<Deck, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a deck into this format's payload
    ///
    /// Default implementation returns NotSupported error.
    /// Formats that support serialization should override this method.
    fn serialize(&self, _deck: &Deck) -> Result<SerializedDeck, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
