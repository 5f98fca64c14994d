//! Shared deck fixtures for the integration tests.

use tarot_babel::deck::{
    Card, Deck, Detail, DetailKind, Element, Meaning, MeaningPair, Scenario,
};

/// The one-card deck from the original document set.
pub fn the_fool() -> Card {
    Card {
        label: "The Fool".to_string(),
        suit: "Major".to_string(),
        image: "cards/fool.png".to_string(),
        image3d: "cards/fool.glb".to_string(),
        elements: vec![Element {
            label: "Dog".to_string(),
            x: Some(100),
            y: Some(200),
            r: Some(0),
            details: vec![Detail {
                kind: DetailKind::Visual,
                content: "white dog".to_string(),
            }],
        }],
        meanings: MeaningPair {
            upright: Meaning {
                keywords: vec!["new beginnings".to_string()],
                summary: "S".to_string(),
                meaning: "M".to_string(),
                scenarios: vec![Scenario {
                    kind: "love".to_string(),
                    content: "C".to_string(),
                }],
            },
            reversed: Meaning::default(),
        },
    }
}

/// A richer card: several elements, mixed detail kinds, scenarios on both
/// polarities, one unplaced element.
pub fn the_tower() -> Card {
    Card {
        label: "The Tower".to_string(),
        suit: "Major".to_string(),
        image: "cards/tower.png".to_string(),
        image3d: "cards/tower.glb".to_string(),
        elements: vec![
            Element {
                label: "Lightning".to_string(),
                x: Some(512),
                y: Some(64),
                r: Some(45),
                details: vec![
                    Detail {
                        kind: DetailKind::Visual,
                        content: "a bolt splitting the crown".to_string(),
                    },
                    Detail {
                        kind: DetailKind::Symbolism,
                        content: "sudden revelation".to_string(),
                    },
                ],
            },
            Element {
                label: "Crown".to_string(),
                x: None,
                y: None,
                r: None,
                details: vec![Detail {
                    kind: DetailKind::Interpretation,
                    content: "false beliefs toppled".to_string(),
                }],
            },
        ],
        meanings: MeaningPair {
            upright: Meaning {
                keywords: vec!["upheaval".to_string(), "awakening".to_string()],
                summary: "Sudden change".to_string(),
                meaning: "Structures fall".to_string(),
                scenarios: vec![
                    Scenario {
                        kind: "business".to_string(),
                        content: "a venture collapses".to_string(),
                    },
                    Scenario {
                        kind: "wealth".to_string(),
                        content: "an unexpected loss".to_string(),
                    },
                ],
            },
            reversed: Meaning {
                keywords: vec!["averted disaster".to_string()],
                summary: "Resisted change".to_string(),
                meaning: "The fall is delayed".to_string(),
                scenarios: vec![Scenario {
                    kind: "relationship".to_string(),
                    content: "a truth withheld".to_string(),
                }],
            },
        },
    }
}

pub fn sample_deck() -> Deck {
    Deck::new(vec![the_fool(), the_tower()])
}
