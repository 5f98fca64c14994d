//! Reconstructs the nested deck from the five relational tables.
//!
//! # The High-Level Concept
//!
//! The tabular form carries no nesting, only natural keys. Reconstruction
//! groups every child table by its card label and reattaches the pieces in
//! Main-table row order. The tables are append-only and may have been edited
//! by hand, so the walk is total: inconsistent rows degrade into warnings
//! instead of aborting the deck.
//!
//! # The Algorithm
//!
//! For each Main row, in table order:
//!
//! 1. Build the element list from ElementCoords rows for this card. The
//!    first row for an element label wins; later duplicates are legal
//!    append-only noise and are ignored. Each element then collects its
//!    ElementDetails rows in table order.
//! 2. Build the meaning pair: for each polarity take the first matching
//!    Meanings row, split the keyword cell back into a list (blank cell
//!    means empty list) and copy the text cells verbatim. A missing row
//!    leaves empty defaults; extra rows are reported.
//! 3. Append Scenarios rows to their polarity, preserving table order.
//!
//! Child rows whose card label has no Main row are orphans: reported and
//! skipped, never fatal.

use crate::common::split_keywords;
use crate::deck::{
    Card, Deck, Detail, DetailKind, Element, Meaning, MeaningPair, Polarity, Scenario,
};
use crate::schema::constraints::{parse_coordinate, CoordCell};
use crate::schema::{cell, col, Row, TableId, TableSet};
use std::collections::HashSet;
use std::fmt;

/// A recoverable data-quality finding made while reconstructing. Row numbers
/// are 1-based data rows, header excluded.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconstructWarning {
    /// Child-table row referencing a card absent from Main; skipped.
    OrphanRow {
        table: TableId,
        row: usize,
        card: String,
    },
    /// No Meanings row for this card and polarity; empty defaults used.
    MissingMeaning { card: String, polarity: Polarity },
    /// More than one Meanings row for this card and polarity; first wins.
    ExtraMeaning {
        card: String,
        polarity: Polarity,
        count: usize,
    },
    /// Polarity cell outside upright/reversed; the row is skipped.
    UnknownPolarity {
        table: TableId,
        row: usize,
        value: String,
    },
    /// Detail type outside the closed enumeration; the row is skipped.
    UnknownDetailKind {
        card: String,
        element: String,
        value: String,
    },
    /// Coordinate cell that is not an integer; read as blank.
    InvalidCoordinate {
        card: String,
        element: String,
        column: &'static str,
        value: String,
    },
}

impl fmt::Display for ReconstructWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconstructWarning::OrphanRow { table, row, card } => {
                write!(f, "{table} row {row}: orphan row for unknown card '{card}', skipped")
            }
            ReconstructWarning::MissingMeaning { card, polarity } => {
                write!(f, "card '{card}': no {polarity} row in Meanings, using empty defaults")
            }
            ReconstructWarning::ExtraMeaning { card, polarity, count } => {
                write!(f, "card '{card}': {count} {polarity} rows in Meanings, first row wins")
            }
            ReconstructWarning::UnknownPolarity { table, row, value } => {
                write!(f, "{table} row {row}: unknown polarity '{value}', skipped")
            }
            ReconstructWarning::UnknownDetailKind { card, element, value } => {
                write!(f, "card '{card}', element '{element}': unknown detail type '{value}', skipped")
            }
            ReconstructWarning::InvalidCoordinate { card, element, column, value } => {
                write!(f, "card '{card}', element '{element}': coordinate {column}='{value}' is not an integer, read as blank")
            }
        }
    }
}

/// The rebuilt deck plus everything worth telling the caller about the
/// tables it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructOutcome {
    pub deck: Deck,
    pub warnings: Vec<ReconstructWarning>,
}

/// Rebuilds the nested deck, one card per Main row, in Main row order.
pub fn tables_to_deck(tables: &TableSet) -> ReconstructOutcome {
    let mut warnings = Vec::new();

    let known: HashSet<&str> = tables
        .main
        .iter()
        .map(|row| cell(row, col::CARD_LABEL))
        .collect();
    report_orphans(tables, &known, &mut warnings);

    let cards = tables
        .main
        .iter()
        .map(|row| build_card(row, tables, &mut warnings))
        .collect();

    ReconstructOutcome {
        deck: Deck::new(cards),
        warnings,
    }
}

fn report_orphans(
    tables: &TableSet,
    known: &HashSet<&str>,
    warnings: &mut Vec<ReconstructWarning>,
) {
    for table in [
        TableId::ElementCoords,
        TableId::ElementDetails,
        TableId::Meanings,
        TableId::Scenarios,
    ] {
        for (index, row) in tables.rows(table).iter().enumerate() {
            let card = cell(row, col::CARD_LABEL);
            if !known.contains(card) {
                warnings.push(ReconstructWarning::OrphanRow {
                    table,
                    row: index + 1,
                    card: card.to_string(),
                });
            }
        }
    }
}

fn build_card(main_row: &Row, tables: &TableSet, warnings: &mut Vec<ReconstructWarning>) -> Card {
    let label = cell(main_row, col::CARD_LABEL).to_string();
    let elements = build_elements(&label, tables, warnings);
    let meanings = build_meanings(&label, tables, warnings);

    Card {
        suit: cell(main_row, col::main::SUIT).to_string(),
        image: cell(main_row, col::main::IMAGE).to_string(),
        image3d: cell(main_row, col::main::IMAGE3D).to_string(),
        label,
        elements,
        meanings,
    }
}

fn build_elements(
    card: &str,
    tables: &TableSet,
    warnings: &mut Vec<ReconstructWarning>,
) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for row in &tables.element_coords {
        if cell(row, col::CARD_LABEL) != card {
            continue;
        }
        let label = cell(row, col::coords::ELEMENT_LABEL);
        // First-wins: later coordinate rows for the same element are legal
        // duplicates, not errors.
        if !seen.insert(label) {
            continue;
        }
        elements.push(Element {
            label: label.to_string(),
            x: coordinate(card, label, "x", cell(row, col::coords::X), warnings),
            y: coordinate(card, label, "y", cell(row, col::coords::Y), warnings),
            r: coordinate(card, label, "r", cell(row, col::coords::R), warnings),
            details: Vec::new(),
        });
    }

    for element in &mut elements {
        element.details = build_details(card, &element.label, tables, warnings);
    }
    elements
}

fn coordinate(
    card: &str,
    element: &str,
    column: &'static str,
    value: &str,
    warnings: &mut Vec<ReconstructWarning>,
) -> Option<i64> {
    match parse_coordinate(value) {
        CoordCell::Blank => None,
        CoordCell::Value(number) => Some(number),
        CoordCell::Invalid => {
            warnings.push(ReconstructWarning::InvalidCoordinate {
                card: card.to_string(),
                element: element.to_string(),
                column,
                value: value.to_string(),
            });
            None
        }
    }
}

fn build_details(
    card: &str,
    element: &str,
    tables: &TableSet,
    warnings: &mut Vec<ReconstructWarning>,
) -> Vec<Detail> {
    let mut details = Vec::new();
    for row in &tables.element_details {
        if cell(row, col::CARD_LABEL) != card
            || cell(row, col::details::ELEMENT_LABEL) != element
        {
            continue;
        }
        let raw = cell(row, col::details::KIND);
        match DetailKind::parse(raw) {
            Some(kind) => details.push(Detail {
                kind,
                content: cell(row, col::details::CONTENT).to_string(),
            }),
            None => warnings.push(ReconstructWarning::UnknownDetailKind {
                card: card.to_string(),
                element: element.to_string(),
                value: raw.to_string(),
            }),
        }
    }
    details
}

fn build_meanings(
    card: &str,
    tables: &TableSet,
    warnings: &mut Vec<ReconstructWarning>,
) -> MeaningPair {
    let mut pair = MeaningPair::default();

    for polarity in Polarity::ALL {
        let rows: Vec<&Row> = tables
            .meanings
            .iter()
            .filter(|row| {
                cell(row, col::CARD_LABEL) == card
                    && cell(row, col::meanings::POLARITY) == polarity.as_str()
            })
            .collect();
        match rows.first() {
            None => warnings.push(ReconstructWarning::MissingMeaning {
                card: card.to_string(),
                polarity,
            }),
            Some(row) => {
                if rows.len() > 1 {
                    warnings.push(ReconstructWarning::ExtraMeaning {
                        card: card.to_string(),
                        polarity,
                        count: rows.len(),
                    });
                }
                *pair.get_mut(polarity) = Meaning {
                    keywords: split_keywords(cell(row, col::meanings::KEYWORDS)),
                    summary: cell(row, col::meanings::SUMMARY).to_string(),
                    meaning: cell(row, col::meanings::MEANING).to_string(),
                    scenarios: Vec::new(),
                };
            }
        }
    }

    for (index, row) in tables.meanings.iter().enumerate() {
        if cell(row, col::CARD_LABEL) != card {
            continue;
        }
        let raw = cell(row, col::meanings::POLARITY);
        if Polarity::parse(raw).is_none() {
            warnings.push(ReconstructWarning::UnknownPolarity {
                table: TableId::Meanings,
                row: index + 1,
                value: raw.to_string(),
            });
        }
    }

    for (index, row) in tables.scenarios.iter().enumerate() {
        if cell(row, col::CARD_LABEL) != card {
            continue;
        }
        let raw = cell(row, col::scenarios::POLARITY);
        match Polarity::parse(raw) {
            Some(polarity) => pair.get_mut(polarity).scenarios.push(Scenario {
                kind: cell(row, col::scenarios::KIND).to_string(),
                content: cell(row, col::scenarios::CONTENT).to_string(),
            }),
            None => warnings.push(ReconstructWarning::UnknownPolarity {
                table: TableId::Scenarios,
                row: index + 1,
                value: raw.to_string(),
            }),
        }
    }

    pair
}
