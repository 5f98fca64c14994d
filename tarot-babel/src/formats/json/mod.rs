//! Nested document format: a JSON array of cards.
//!
//! All parsing and serialization is offloaded to serde_json against the
//! typed deck model, so a document missing a required field fails at the
//! boundary with serde's field and position context.

use crate::deck::Deck;
use crate::error::FormatError;
use crate::format::{Format, SerializedDeck};
use serde::Serialize;

/// JSON adapter for the nested form.
#[derive(Debug, Clone)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    /// Pretty output with a 4-space indent, the shape the hand-edited deck
    /// documents use.
    pub fn new() -> Self {
        JsonFormat { pretty: true }
    }

    /// Compact single-line output.
    pub fn compact() -> Self {
        JsonFormat { pretty: false }
    }
}

impl Default for JsonFormat {
    fn default() -> Self {
        JsonFormat::new()
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Nested deck document (JSON array of cards)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &SerializedDeck) -> Result<Deck, FormatError> {
        let text = match source {
            SerializedDeck::Text(text) => text,
            SerializedDeck::Sheets(_) => {
                return Err(FormatError::ParseError(
                    "json input must be a text document, not a sheet container".to_string(),
                ))
            }
        };
        serde_json::from_str(text).map_err(|error| FormatError::ParseError(error.to_string()))
    }

    fn serialize(&self, deck: &Deck) -> Result<SerializedDeck, FormatError> {
        let text = if self.pretty {
            let mut out = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
            deck.serialize(&mut serializer)
                .map_err(|error| FormatError::SerializationError(error.to_string()))?;
            String::from_utf8(out)
                .map_err(|error| FormatError::SerializationError(error.to_string()))?
        } else {
            serde_json::to_string(deck)
                .map_err(|error| FormatError::SerializationError(error.to_string()))?
        };
        Ok(SerializedDeck::Text(text))
    }
}
