//! Declarative constraint model attached to the relational schema.
//!
//! The tabular storage format has no native enforcement of references, enums
//! or ranges, so the rules live here as data. They are projected into a
//! manifest as a separate step from row population; storage adapters attach
//! the manifest as editing metadata (dropdowns, range hints) for humans
//! working on the tabular form. Reconstruction never reads it back.

use super::{cell, col, TableId, TableSet};
use crate::deck::{DetailKind, Polarity};
use serde::Serialize;

pub const COORD_MIN: i64 = 0;
pub const COORD_MAX: i64 = 1000;

/// A single advisory rule attached to one column of the tabular form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    /// The column must hold a value present in the referenced column.
    Reference {
        table: TableId,
        column: &'static str,
        references: TableId,
        referenced_column: &'static str,
        /// The reference is scoped to rows sharing the same card label.
        within_card: bool,
    },
    /// The column must hold one of the listed values.
    Enumeration {
        table: TableId,
        column: &'static str,
        allowed: Vec<String>,
    },
    /// The column must hold an integer in `[min, max]`; blank permitted.
    Range {
        table: TableId,
        column: &'static str,
        min: i64,
        max: i64,
        allow_blank: bool,
    },
}

/// The advisory rule set derived for one flattened deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintManifest {
    pub constraints: Vec<Constraint>,
}

impl ConstraintManifest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Distinct suit values in Main row order. The suit domain is a closed list
/// derived from the deck itself, not a fixed global enumeration.
pub fn suit_domain(tables: &TableSet) -> Vec<String> {
    let mut suits: Vec<String> = Vec::new();
    for row in &tables.main {
        let suit = cell(row, col::main::SUIT);
        if !suit.is_empty() && !suits.iter().any(|known| known == suit) {
            suits.push(suit.to_string());
        }
    }
    suits
}

/// Build the manifest for a flattened table set.
pub fn manifest_for(tables: &TableSet) -> ConstraintManifest {
    let mut constraints = Vec::new();

    for table in [
        TableId::ElementCoords,
        TableId::ElementDetails,
        TableId::Meanings,
        TableId::Scenarios,
    ] {
        constraints.push(Constraint::Reference {
            table,
            column: "card_label",
            references: TableId::Main,
            referenced_column: "card_label",
            within_card: false,
        });
    }
    constraints.push(Constraint::Reference {
        table: TableId::ElementDetails,
        column: "element_label",
        references: TableId::ElementCoords,
        referenced_column: "element_label",
        within_card: true,
    });

    constraints.push(Constraint::Enumeration {
        table: TableId::Main,
        column: "suit",
        allowed: suit_domain(tables),
    });
    constraints.push(Constraint::Enumeration {
        table: TableId::ElementDetails,
        column: "type",
        allowed: DetailKind::ALL
            .into_iter()
            .map(|kind| kind.as_str().to_string())
            .collect(),
    });
    for table in [TableId::Meanings, TableId::Scenarios] {
        constraints.push(Constraint::Enumeration {
            table,
            column: "polarity",
            allowed: Polarity::ALL
                .into_iter()
                .map(|polarity| polarity.as_str().to_string())
                .collect(),
        });
    }

    for column in ["x", "y", "r"] {
        constraints.push(Constraint::Range {
            table: TableId::ElementCoords,
            column,
            min: COORD_MIN,
            max: COORD_MAX,
            allow_blank: true,
        });
    }

    ConstraintManifest { constraints }
}

/// A coordinate cell as the engines and the linter read it.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordCell {
    Blank,
    Value(i64),
    Invalid,
}

/// Parse a coordinate cell. Integral floats are accepted because spreadsheet
/// tooling round-trips integer cells as `100.0`.
pub fn parse_coordinate(value: &str) -> CoordCell {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return CoordCell::Blank;
    }
    if let Ok(number) = trimmed.parse::<i64>() {
        return CoordCell::Value(number);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
            return CoordCell::Value(float as i64);
        }
    }
    CoordCell::Invalid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables_with_suits(suits: &[&str]) -> TableSet {
        let mut tables = TableSet::default();
        for (index, suit) in suits.iter().enumerate() {
            tables.main.push(vec![
                format!("card-{index}"),
                suit.to_string(),
                String::new(),
                String::new(),
            ]);
        }
        tables
    }

    #[test]
    fn suit_domain_deduplicates_in_first_seen_order() {
        let tables = tables_with_suits(&["Major", "Cups", "Major", "", "Swords"]);
        assert_eq!(suit_domain(&tables), vec!["Major", "Cups", "Swords"]);
    }

    #[test]
    fn manifest_links_every_child_table_to_main() {
        let manifest = manifest_for(&tables_with_suits(&["Major"]));
        let card_references = manifest
            .constraints
            .iter()
            .filter(|constraint| {
                matches!(
                    constraint,
                    Constraint::Reference {
                        references: TableId::Main,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(card_references, 4);
    }

    #[test]
    fn manifest_serializes_with_rule_tags() {
        let manifest = manifest_for(&tables_with_suits(&["Major"]));
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"rule\": \"enumeration\""));
        assert!(json.contains("\"Major\""));
        assert!(json.contains("\"max\": 1000"));
    }

    #[test]
    fn coordinate_cells_accept_integers_and_integral_floats() {
        assert_eq!(parse_coordinate(""), CoordCell::Blank);
        assert_eq!(parse_coordinate("  "), CoordCell::Blank);
        assert_eq!(parse_coordinate("100"), CoordCell::Value(100));
        assert_eq!(parse_coordinate("100.0"), CoordCell::Value(100));
        assert_eq!(parse_coordinate("-5"), CoordCell::Value(-5));
        assert_eq!(parse_coordinate("12.5"), CoordCell::Invalid);
        assert_eq!(parse_coordinate("north"), CoordCell::Invalid);
    }
}
