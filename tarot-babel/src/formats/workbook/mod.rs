//! Tabular workbook format.
//!
//! Serialization runs the flatten engine and renders one CSV sheet per
//! table, in canonical table order, plus the advisory constraint manifest.
//! Parsing resolves sheet names (configured names first, canonical
//! identifiers always accepted), decodes the CSV payloads and runs the
//! reconstruct engine. Data-quality findings cross this seam as `tracing`
//! warnings so callers can report partial success card by card.

mod sheets;

use crate::common::flatten::deck_to_tables;
use crate::common::reconstruct::tables_to_deck;
use crate::deck::Deck;
use crate::error::FormatError;
use crate::format::{Format, SerializedDeck, Sheet, Workbook};
use crate::schema::constraints::manifest_for;
use crate::schema::{TableId, TableSet};

/// Sheet names used by the workbook container. Canonical identifiers by
/// default; localized workbooks override them.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetNames {
    pub main: String,
    pub element_coords: String,
    pub element_details: String,
    pub meanings: String,
    pub scenarios: String,
}

impl SheetNames {
    pub fn canonical() -> Self {
        SheetNames {
            main: TableId::Main.name().to_string(),
            element_coords: TableId::ElementCoords.name().to_string(),
            element_details: TableId::ElementDetails.name().to_string(),
            meanings: TableId::Meanings.name().to_string(),
            scenarios: TableId::Scenarios.name().to_string(),
        }
    }

    pub fn for_table(&self, id: TableId) -> &str {
        match id {
            TableId::Main => &self.main,
            TableId::ElementCoords => &self.element_coords,
            TableId::ElementDetails => &self.element_details,
            TableId::Meanings => &self.meanings,
            TableId::Scenarios => &self.scenarios,
        }
    }

    /// Resolve a sheet name to its table: configured names first, canonical
    /// identifiers as a fallback so renamed workbooks stay importable.
    pub fn resolve(&self, name: &str) -> Option<TableId> {
        TableId::ALL
            .into_iter()
            .find(|id| self.for_table(*id) == name)
            .or_else(|| TableId::ALL.into_iter().find(|id| id.name() == name))
    }
}

impl Default for SheetNames {
    fn default() -> Self {
        SheetNames::canonical()
    }
}

/// Workbook adapter for the tabular form.
#[derive(Debug, Clone)]
pub struct WorkbookFormat {
    names: SheetNames,
    write_constraints: bool,
}

impl WorkbookFormat {
    pub fn new() -> Self {
        WorkbookFormat {
            names: SheetNames::canonical(),
            write_constraints: true,
        }
    }

    pub fn with_names(names: SheetNames) -> Self {
        WorkbookFormat {
            names,
            write_constraints: true,
        }
    }

    /// Skip the constraint manifest when serializing.
    pub fn without_constraints(mut self) -> Self {
        self.write_constraints = false;
        self
    }

    pub fn names(&self) -> &SheetNames {
        &self.names
    }

    /// Decode a sheet container into the five tables without reconstructing.
    /// Sheets that resolve to no table are ignored with a warning; missing
    /// sheets decode as empty tables.
    pub fn read_tables(&self, workbook: &Workbook) -> Result<TableSet, FormatError> {
        let mut tables = TableSet::default();
        for sheet in &workbook.sheets {
            match self.names.resolve(&sheet.name) {
                Some(id) => *tables.rows_mut(id) = sheets::decode(&sheet.content)?,
                None => tracing::warn!(sheet = %sheet.name, "ignoring unrecognized sheet"),
            }
        }
        Ok(tables)
    }
}

impl Default for WorkbookFormat {
    fn default() -> Self {
        WorkbookFormat::new()
    }
}

impl Format for WorkbookFormat {
    fn name(&self) -> &str {
        "workbook"
    }

    fn description(&self) -> &str {
        "Tabular workbook container (one CSV sheet per table)"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &SerializedDeck) -> Result<Deck, FormatError> {
        let workbook = match source {
            SerializedDeck::Sheets(workbook) => workbook,
            SerializedDeck::Text(_) => {
                return Err(FormatError::ParseError(
                    "workbook input must be a sheet container, not a text document".to_string(),
                ))
            }
        };
        let tables = self.read_tables(workbook)?;
        let outcome = tables_to_deck(&tables);
        for warning in &outcome.warnings {
            tracing::warn!("{warning}");
        }
        Ok(outcome.deck)
    }

    fn serialize(&self, deck: &Deck) -> Result<SerializedDeck, FormatError> {
        let tables = deck_to_tables(deck)
            .map_err(|error| FormatError::SerializationError(error.to_string()))?;

        let mut rendered = Vec::new();
        for id in TableId::ALL {
            rendered.push(Sheet {
                name: self.names.for_table(id).to_string(),
                content: sheets::encode(id.columns(), tables.rows(id))?,
            });
        }

        let constraints = if self.write_constraints {
            let manifest = manifest_for(&tables);
            Some(
                manifest
                    .to_json()
                    .map_err(|error| FormatError::SerializationError(error.to_string()))?,
            )
        } else {
            None
        };

        Ok(SerializedDeck::Sheets(Workbook {
            sheets: rendered,
            constraints,
        }))
    }
}
