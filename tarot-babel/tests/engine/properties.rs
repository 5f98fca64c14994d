//! Property tests for the round-trip law over generated well-formed decks.
//!
//! Well-formed means what the document format itself guarantees: card labels
//! unique across the deck, element labels unique within a card, keywords
//! free of the cell separator. Labels are assigned positionally so the
//! generators cannot collide.

use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use tarot_babel::deck::{
    Card, Deck, Detail, DetailKind, Element, Meaning, MeaningPair, Scenario,
};
use tarot_babel::formats::WorkbookFormat;
use tarot_babel::{flatten, reconstruct, Format};

fn keyword() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn text() -> impl Strategy<Value = String> {
    // Printable ASCII, including the CSV delimiter and quotes.
    "[ -~]{0,24}"
}

fn coordinate() -> impl Strategy<Value = Option<i64>> {
    option::of(0i64..=1000)
}

fn detail() -> impl Strategy<Value = Detail> {
    (
        prop_oneof![
            Just(DetailKind::Visual),
            Just(DetailKind::Symbolism),
            Just(DetailKind::Interpretation),
        ],
        text(),
    )
        .prop_map(|(kind, content)| Detail { kind, content })
}

fn scenario() -> impl Strategy<Value = Scenario> {
    ("[a-z]{1,8}", text()).prop_map(|(kind, content)| Scenario { kind, content })
}

fn meaning() -> impl Strategy<Value = Meaning> {
    (vec(keyword(), 0..4), text(), text(), vec(scenario(), 0..3)).prop_map(
        |(keywords, summary, meaning, scenarios)| Meaning {
            keywords,
            summary,
            meaning,
            scenarios,
        },
    )
}

fn element_body() -> impl Strategy<Value = Element> {
    (coordinate(), coordinate(), coordinate(), vec(detail(), 0..3)).prop_map(
        |(x, y, r, details)| Element {
            label: String::new(),
            x,
            y,
            r,
            details,
        },
    )
}

fn card_body() -> impl Strategy<Value = Card> {
    (
        "[A-Z][a-z]{0,6}",
        text(),
        text(),
        vec(element_body(), 0..3),
        meaning(),
        meaning(),
    )
        .prop_map(|(suit, image, image3d, elements, upright, reversed)| Card {
            label: String::new(),
            suit,
            image,
            image3d,
            elements,
            meanings: MeaningPair { upright, reversed },
        })
}

fn deck() -> impl Strategy<Value = Deck> {
    vec(card_body(), 0..4).prop_map(|cards| {
        let cards = cards
            .into_iter()
            .enumerate()
            .map(|(card_index, mut card)| {
                card.label = format!("card-{card_index}");
                for (element_index, element) in card.elements.iter_mut().enumerate() {
                    element.label = format!("element-{element_index}");
                }
                card
            })
            .collect();
        Deck::new(cards)
    })
}

proptest! {
    #[test]
    fn round_trip_law(deck in deck()) {
        let tables = flatten(&deck).expect("generated decks are well-formed");
        let outcome = reconstruct(&tables);
        prop_assert_eq!(&outcome.deck, &deck);
        prop_assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn flatten_is_deterministic(deck in deck()) {
        prop_assert_eq!(flatten(&deck).unwrap(), flatten(&deck).unwrap());
    }

    #[test]
    fn workbook_round_trip_survives_csv_encoding(deck in deck()) {
        let format = WorkbookFormat::new();
        let serialized = format.serialize(&deck).expect("workbook serializes");
        let parsed = format.parse(&serialized).expect("workbook parses");
        prop_assert_eq!(parsed, deck);
    }
}
