//! Relational schema shared by both conversion directions.
//!
//! The tabular form is five independent tables keyed by natural identifiers.
//! This module pins down their names, column order and cell conventions;
//! [`constraints`] layers the advisory rule set on top of them and [`lint`]
//! checks a table set against those rules. Both engines build on these
//! definitions, so the schema can only drift in one place.
//!
//! Cells are stored as written. A blank cell is the empty string, never a
//! sentinel value, and rows are append-only while flattening.

pub mod constraints;
pub mod lint;

use serde::Serialize;
use std::fmt;

/// Identifies one of the five tables of the tabular form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableId {
    Main,
    ElementCoords,
    ElementDetails,
    Meanings,
    Scenarios,
}

impl TableId {
    /// Canonical table order; the flatten engine populates and the workbook
    /// adapter writes sheets in this order.
    pub const ALL: [TableId; 5] = [
        TableId::Main,
        TableId::ElementCoords,
        TableId::ElementDetails,
        TableId::Meanings,
        TableId::Scenarios,
    ];

    /// Canonical sheet identifier. Storage adapters may expose localized
    /// names instead, but this identifier is always accepted on import.
    pub fn name(self) -> &'static str {
        match self {
            TableId::Main => "Main",
            TableId::ElementCoords => "ElementCoords",
            TableId::ElementDetails => "ElementDetails",
            TableId::Meanings => "Meanings",
            TableId::Scenarios => "Scenarios",
        }
    }

    /// Column headers, in cell order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableId::Main => &["card_label", "suit", "image", "image3d"],
            TableId::ElementCoords => &["card_label", "element_label", "x", "y", "r"],
            TableId::ElementDetails => &["card_label", "element_label", "type", "content"],
            TableId::Meanings => &["card_label", "polarity", "keywords", "summary", "meaning"],
            TableId::Scenarios => &["card_label", "polarity", "type", "content"],
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tabular row; cells in [`TableId::columns`] order.
pub type Row = Vec<String>;

/// The five tables of one deck. A plain value: engines take and return table
/// sets, there is no process-wide workbook state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableSet {
    pub main: Vec<Row>,
    pub element_coords: Vec<Row>,
    pub element_details: Vec<Row>,
    pub meanings: Vec<Row>,
    pub scenarios: Vec<Row>,
}

impl TableSet {
    pub fn rows(&self, id: TableId) -> &[Row] {
        match id {
            TableId::Main => &self.main,
            TableId::ElementCoords => &self.element_coords,
            TableId::ElementDetails => &self.element_details,
            TableId::Meanings => &self.meanings,
            TableId::Scenarios => &self.scenarios,
        }
    }

    pub fn rows_mut(&mut self, id: TableId) -> &mut Vec<Row> {
        match id {
            TableId::Main => &mut self.main,
            TableId::ElementCoords => &mut self.element_coords,
            TableId::ElementDetails => &mut self.element_details,
            TableId::Meanings => &mut self.meanings,
            TableId::Scenarios => &mut self.scenarios,
        }
    }
}

/// Fetch a cell by position, reading short rows as blank-padded.
pub fn cell(row: &Row, index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Column positions, matching [`TableId::columns`] order. Every child table
/// carries its card label in the first column.
pub mod col {
    pub const CARD_LABEL: usize = 0;

    pub mod main {
        pub const SUIT: usize = 1;
        pub const IMAGE: usize = 2;
        pub const IMAGE3D: usize = 3;
    }

    pub mod coords {
        pub const ELEMENT_LABEL: usize = 1;
        pub const X: usize = 2;
        pub const Y: usize = 3;
        pub const R: usize = 4;
    }

    pub mod details {
        pub const ELEMENT_LABEL: usize = 1;
        pub const KIND: usize = 2;
        pub const CONTENT: usize = 3;
    }

    pub mod meanings {
        pub const POLARITY: usize = 1;
        pub const KEYWORDS: usize = 2;
        pub const SUMMARY: usize = 3;
        pub const MEANING: usize = 4;
    }

    pub mod scenarios {
        pub const POLARITY: usize = 1;
        pub const KIND: usize = 2;
        pub const CONTENT: usize = 3;
    }
}
