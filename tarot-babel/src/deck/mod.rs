//! Typed entity model for the nested deck document.
//!
//! The nested form is a JSON array of cards, each carrying its elements,
//! element details and the two interpretive meanings. These types are the
//! in-memory shape of that document: closed structs and enums with fixed
//! fields, so a missing or misspelled field is caught at the serde boundary
//! instead of surfacing as a stringly-typed surprise deep in a conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered collection of cards, the nested form of one deck.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Deck { cards }
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Deck::new(cards)
    }
}

/// One illustrated card. The label is the natural key of the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub label: String,
    pub suit: String,
    pub image: String,
    pub image3d: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    pub meanings: MeaningPair,
}

/// A pictorial element on a card, unique by label within its card.
///
/// Coordinates are optional; an element may be named without being placed.
/// `i64` rather than an unsigned type so that out-of-range tabular cells are
/// carried as written, leaving the range rule to the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<i64>,
    #[serde(default)]
    pub details: Vec<Detail>,
}

/// A single annotation attached to an element. Multiple details of the same
/// kind may coexist and keep their document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    #[serde(rename = "type")]
    pub kind: DetailKind,
    pub content: String,
}

/// The closed set of detail annotation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Visual,
    Symbolism,
    Interpretation,
}

impl DetailKind {
    pub const ALL: [DetailKind; 3] = [
        DetailKind::Visual,
        DetailKind::Symbolism,
        DetailKind::Interpretation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DetailKind::Visual => "visual",
            DetailKind::Symbolism => "symbolism",
            DetailKind::Interpretation => "interpretation",
        }
    }

    pub fn parse(value: &str) -> Option<DetailKind> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one meaning per polarity; a card is never missing either side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeaningPair {
    pub upright: Meaning,
    pub reversed: Meaning,
}

impl MeaningPair {
    pub fn get(&self, polarity: Polarity) -> &Meaning {
        match polarity {
            Polarity::Upright => &self.upright,
            Polarity::Reversed => &self.reversed,
        }
    }

    pub fn get_mut(&mut self, polarity: Polarity) -> &mut Meaning {
        match polarity {
            Polarity::Upright => &mut self.upright,
            Polarity::Reversed => &mut self.reversed,
        }
    }
}

/// Interpretive text for one polarity of one card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// A situational reading under one polarity. The tag is an open set
/// ("love", "business", ...), unlike [`DetailKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

/// One of the two fixed interpretive orientations of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Upright,
    Reversed,
}

impl Polarity {
    /// Canonical order: upright rows always precede reversed rows.
    pub const ALL: [Polarity; 2] = [Polarity::Upright, Polarity::Reversed];

    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Upright => "upright",
            Polarity::Reversed => "reversed",
        }
    }

    pub fn parse(value: &str) -> Option<Polarity> {
        Self::ALL.into_iter().find(|polarity| polarity.as_str() == value)
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
