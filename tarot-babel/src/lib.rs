//! Bidirectional conversion between the nested tarot deck document and its
//! tabular workbook form.
//!
//!     A deck lives in two representations. The nested form is one JSON
//!     document: an array of cards, each with its pictorial elements, the
//!     detail annotations on those elements, and the upright/reversed
//!     meanings with their scenarios. The tabular form is five independent
//!     tables keyed by natural identifiers, the shape a human edits in a
//!     spreadsheet. This crate is the engine that moves a deck between the
//!     two without losing a row.
//!
//!     This is a pure lib: it powers the tarot CLI but is shell agnostic.
//!     No code here touches the filesystem, std streams or env vars.
//!
//! Architecture
//!
//!     The heavy lifting is format agnostic. One relational schema
//!     (./schema/mod.rs) fixes the five tables, their columns and the
//!     advisory constraint model; the two engines in ./common implement
//!     flattening (nested to tabular) and reconstruction (tabular to
//!     nested) over that schema. Format adapters never reimplement any of
//!     this. They only move bytes in and out of the entity model
//!     (./deck/mod.rs), so swapping the storage encoding never touches the
//!     conversion logic.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait + serialized payloads
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── deck                    # Typed entity model (the nested form)
//!     ├── schema                  # Tables, constraint model, linter
//!     ├── common                  # Flatten + reconstruct engines
//!     └── formats
//!         ├── json                # Nested document adapter (serde_json)
//!         └── workbook            # Sheet container adapter (csv payloads)
//!
//! Constraints
//!
//!     The tabular storage has no native integrity enforcement, so the
//!     rules (references, enumerations, ranges, the data-derived suit
//!     domain) are declared as data in ./schema/constraints.rs and projected
//!     into a manifest that adapters attach as editing metadata. Import
//!     never enforces them: inconsistent rows degrade into warnings and the
//!     linter (./schema/lint.rs) is the tool that makes the drift visible.
//!
//! Formats
//!
//!     Format capabilities are implemented with the Format trait: a parse()
//!     and serialize() method, a name and file extensions, discovered
//!     through the FormatRegistry. Concrete encodings are offloaded to
//!     specialized crates (serde_json for the document, csv for the sheet
//!     payloads); the adapters only map between those crates' views and the
//!     entity model.

pub mod common;
pub mod deck;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod schema;

pub use error::FormatError;
pub use format::{Format, SerializedDeck, Sheet, Workbook};
pub use registry::FormatRegistry;

/// Flattens a nested deck into the five relational tables.
pub fn flatten(
    deck: &deck::Deck,
) -> Result<schema::TableSet, common::flatten::FlattenError> {
    common::flatten::deck_to_tables(deck)
}

/// Rebuilds the nested deck from the five relational tables.
///
/// Total over arbitrary tables: inconsistent rows are reported in the
/// outcome's warnings instead of failing the deck.
pub fn reconstruct(tables: &schema::TableSet) -> common::reconstruct::ReconstructOutcome {
    common::reconstruct::tables_to_deck(tables)
}
