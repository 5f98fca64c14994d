//! Flattens the nested deck into the five relational tables.
//!
//! # The High-Level Concept
//!
//! Walking each card and its nested collections in document order lets us
//! emit independent table rows that can later be joined back together by
//! their natural keys. The card label threads through every child row, so
//! no row depends on its position relative to rows of other tables.
//!
//! # The Algorithm
//!
//! For each card, in deck order:
//!
//! 1. Append one Main row.
//! 2. Append one ElementCoords row per element, in element order; absent
//!    coordinates become blank cells, never zero.
//! 3. Append one ElementDetails row per detail, nested inside the element
//!    walk so detail order is preserved.
//! 4. Append exactly two Meanings rows, upright then reversed, with the
//!    keyword list joined into a single cell.
//! 5. Append one Scenarios row per scenario, all upright rows before all
//!    reversed rows, each side in document order.
//!
//! The input deck is never mutated and the same deck always produces the
//! same tables. Reconstruction (`reconstruct`) performs the exact reverse
//! walk, so the pair round-trips any well-formed document.

use crate::common::join_keywords;
use crate::deck::{Card, Deck, Polarity};
use crate::schema::TableSet;
use std::collections::HashSet;
use std::fmt;

/// Error raised while flattening a nested deck.
#[derive(Debug, Clone, PartialEq)]
pub enum FlattenError {
    /// A record is missing a required field; carries the offending card and
    /// the field name.
    MalformedRecord { card: String, field: &'static str },
    /// An invariant of the relational schema cannot be satisfied.
    SchemaViolation(String),
}

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlattenError::MalformedRecord { card, field } => {
                write!(f, "malformed record: card {card} has an empty '{field}'")
            }
            FlattenError::SchemaViolation(message) => {
                write!(f, "schema violation: {message}")
            }
        }
    }
}

impl std::error::Error for FlattenError {}

/// Flattens an ordered deck into the five tables of the relational schema.
pub fn deck_to_tables(deck: &Deck) -> Result<TableSet, FlattenError> {
    let mut tables = TableSet::default();
    let mut seen_labels: HashSet<&str> = HashSet::new();

    for (index, card) in deck.cards.iter().enumerate() {
        if card.label.is_empty() {
            return Err(FlattenError::MalformedRecord {
                card: format!("#{}", index + 1),
                field: "label",
            });
        }
        if !seen_labels.insert(&card.label) {
            return Err(FlattenError::SchemaViolation(format!(
                "duplicate card label '{}' breaks the Main natural key",
                card.label
            )));
        }
        append_card(card, &mut tables)?;
    }

    Ok(tables)
}

fn append_card(card: &Card, tables: &mut TableSet) -> Result<(), FlattenError> {
    tables.main.push(vec![
        card.label.clone(),
        card.suit.clone(),
        card.image.clone(),
        card.image3d.clone(),
    ]);

    for element in &card.elements {
        if element.label.is_empty() {
            return Err(FlattenError::MalformedRecord {
                card: format!("'{}'", card.label),
                field: "elements.label",
            });
        }
        tables.element_coords.push(vec![
            card.label.clone(),
            element.label.clone(),
            coordinate_cell(element.x),
            coordinate_cell(element.y),
            coordinate_cell(element.r),
        ]);
        for detail in &element.details {
            tables.element_details.push(vec![
                card.label.clone(),
                element.label.clone(),
                detail.kind.as_str().to_string(),
                detail.content.clone(),
            ]);
        }
    }

    for polarity in Polarity::ALL {
        let meaning = card.meanings.get(polarity);
        tables.meanings.push(vec![
            card.label.clone(),
            polarity.as_str().to_string(),
            join_keywords(&meaning.keywords),
            meaning.summary.clone(),
            meaning.meaning.clone(),
        ]);
    }

    for polarity in Polarity::ALL {
        for scenario in &card.meanings.get(polarity).scenarios {
            tables.scenarios.push(vec![
                card.label.clone(),
                polarity.as_str().to_string(),
                scenario.kind.clone(),
                scenario.content.clone(),
            ]);
        }
    }

    Ok(())
}

/// Absent coordinates become blank cells, never zero.
fn coordinate_cell(value: Option<i64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}
