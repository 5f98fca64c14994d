//! Advisory linter for the tabular form.
//!
//! Reconstruction accepts inconsistent rows as written; this linter is the
//! place where drift from the constraint model becomes visible. It walks a
//! table set against every declared rule plus the natural-key cardinalities
//! and reports findings without blocking anything.

use super::constraints::{parse_coordinate, CoordCell, COORD_MAX, COORD_MIN};
use super::{cell, col, TableId, TableSet};
use crate::deck::{DetailKind, Polarity};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One advisory finding. `row` is the 1-based data row, header excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub table: TableId,
    pub row: usize,
    pub column: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {} [{}]: {}",
            self.table, self.row, self.column, self.message
        )
    }
}

/// Check a table set against the constraint model.
pub fn lint(tables: &TableSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_main(tables, &mut violations);
    check_card_references(tables, &mut violations);
    check_detail_elements(tables, &mut violations);
    check_enumerations(tables, &mut violations);
    check_coordinate_ranges(tables, &mut violations);
    check_meaning_cardinality(tables, &mut violations);

    violations
}

fn check_main(tables: &TableSet, violations: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    for (index, row) in tables.main.iter().enumerate() {
        let label = cell(row, col::CARD_LABEL);
        if label.is_empty() {
            violations.push(Violation {
                table: TableId::Main,
                row: index + 1,
                column: "card_label",
                message: "blank card label".to_string(),
            });
        } else if !seen.insert(label) {
            violations.push(Violation {
                table: TableId::Main,
                row: index + 1,
                column: "card_label",
                message: format!("duplicate card label '{label}'"),
            });
        }
        if cell(row, col::main::SUIT).is_empty() {
            violations.push(Violation {
                table: TableId::Main,
                row: index + 1,
                column: "suit",
                message: "blank suit".to_string(),
            });
        }
    }
}

fn check_card_references(tables: &TableSet, violations: &mut Vec<Violation>) {
    let known: HashSet<&str> = tables
        .main
        .iter()
        .map(|row| cell(row, col::CARD_LABEL))
        .collect();

    for table in [
        TableId::ElementCoords,
        TableId::ElementDetails,
        TableId::Meanings,
        TableId::Scenarios,
    ] {
        for (index, row) in tables.rows(table).iter().enumerate() {
            let card = cell(row, col::CARD_LABEL);
            if !known.contains(card) {
                violations.push(Violation {
                    table,
                    row: index + 1,
                    column: "card_label",
                    message: format!("references unknown card '{card}'"),
                });
            }
        }
    }
}

fn check_detail_elements(tables: &TableSet, violations: &mut Vec<Violation>) {
    let placed: HashSet<(&str, &str)> = tables
        .element_coords
        .iter()
        .map(|row| {
            (
                cell(row, col::CARD_LABEL),
                cell(row, col::coords::ELEMENT_LABEL),
            )
        })
        .collect();
    let known: HashSet<&str> = tables
        .main
        .iter()
        .map(|row| cell(row, col::CARD_LABEL))
        .collect();

    for (index, row) in tables.element_details.iter().enumerate() {
        let card = cell(row, col::CARD_LABEL);
        let element = cell(row, col::details::ELEMENT_LABEL);
        // Orphan cards are already reported; only flag the element reference
        // when the card itself resolves.
        if known.contains(card) && !placed.contains(&(card, element)) {
            violations.push(Violation {
                table: TableId::ElementDetails,
                row: index + 1,
                column: "element_label",
                message: format!("references element '{element}' with no coordinate row"),
            });
        }
    }
}

fn check_enumerations(tables: &TableSet, violations: &mut Vec<Violation>) {
    for (index, row) in tables.element_details.iter().enumerate() {
        let kind = cell(row, col::details::KIND);
        if DetailKind::parse(kind).is_none() {
            violations.push(Violation {
                table: TableId::ElementDetails,
                row: index + 1,
                column: "type",
                message: format!("'{kind}' is not one of visual, symbolism, interpretation"),
            });
        }
    }

    for (table, polarity_column) in [
        (TableId::Meanings, col::meanings::POLARITY),
        (TableId::Scenarios, col::scenarios::POLARITY),
    ] {
        for (index, row) in tables.rows(table).iter().enumerate() {
            let polarity = cell(row, polarity_column);
            if Polarity::parse(polarity).is_none() {
                violations.push(Violation {
                    table,
                    row: index + 1,
                    column: "polarity",
                    message: format!("'{polarity}' is not one of upright, reversed"),
                });
            }
        }
    }
}

fn check_coordinate_ranges(tables: &TableSet, violations: &mut Vec<Violation>) {
    const COLUMNS: [(&str, usize); 3] = [
        ("x", col::coords::X),
        ("y", col::coords::Y),
        ("r", col::coords::R),
    ];

    for (index, row) in tables.element_coords.iter().enumerate() {
        for (column, position) in COLUMNS {
            let value = cell(row, position);
            match parse_coordinate(value) {
                CoordCell::Blank => {}
                CoordCell::Value(number) => {
                    if !(COORD_MIN..=COORD_MAX).contains(&number) {
                        violations.push(Violation {
                            table: TableId::ElementCoords,
                            row: index + 1,
                            column,
                            message: format!(
                                "{number} is outside the {COORD_MIN}..{COORD_MAX} range"
                            ),
                        });
                    }
                }
                CoordCell::Invalid => violations.push(Violation {
                    table: TableId::ElementCoords,
                    row: index + 1,
                    column,
                    message: format!("'{value}' is not an integer"),
                }),
            }
        }
    }
}

fn check_meaning_cardinality(tables: &TableSet, violations: &mut Vec<Violation>) {
    let mut counts: HashMap<(&str, Polarity), usize> = HashMap::new();
    for row in &tables.meanings {
        if let Some(polarity) = Polarity::parse(cell(row, col::meanings::POLARITY)) {
            *counts
                .entry((cell(row, col::CARD_LABEL), polarity))
                .or_default() += 1;
        }
    }

    for (index, row) in tables.main.iter().enumerate() {
        let card = cell(row, col::CARD_LABEL);
        for polarity in Polarity::ALL {
            match counts.get(&(card, polarity)).copied().unwrap_or(0) {
                0 => violations.push(Violation {
                    table: TableId::Main,
                    row: index + 1,
                    column: "card_label",
                    message: format!("card '{card}' has no {polarity} row in Meanings"),
                }),
                1 => {}
                extra => violations.push(Violation {
                    table: TableId::Main,
                    row: index + 1,
                    column: "card_label",
                    message: format!("card '{card}' has {extra} {polarity} rows in Meanings"),
                }),
            }
        }
    }
}
