//! Round-trip tests for the flatten <-> reconstruct engine pair.

use crate::common::{sample_deck, the_fool};
use tarot_babel::deck::Deck;
use tarot_babel::schema::TableId;
use tarot_babel::{flatten, reconstruct};

#[test]
fn round_trip_reproduces_the_document() {
    let deck = sample_deck();
    let tables = flatten(&deck).expect("sample deck flattens");
    let outcome = reconstruct(&tables);

    assert_eq!(outcome.deck, deck);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn flatten_twice_yields_identical_tables() {
    let deck = sample_deck();
    assert_eq!(flatten(&deck).unwrap(), flatten(&deck).unwrap());
}

#[test]
fn the_fool_flattens_to_the_documented_row_counts() {
    let tables = flatten(&Deck::new(vec![the_fool()])).unwrap();

    assert_eq!(tables.rows(TableId::Main).len(), 1);
    assert_eq!(tables.rows(TableId::ElementCoords).len(), 1);
    assert_eq!(tables.rows(TableId::ElementDetails).len(), 1);
    assert_eq!(tables.rows(TableId::Meanings).len(), 2);
    assert_eq!(tables.rows(TableId::Scenarios).len(), 1);

    let outcome = reconstruct(&tables);
    assert_eq!(outcome.deck.cards, vec![the_fool()]);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn orphan_rows_do_not_abort_the_rest_of_the_deck() {
    let deck = sample_deck();
    let mut tables = flatten(&deck).unwrap();
    tables.element_coords.push(vec![
        "The Moon".to_string(),
        "Crab".to_string(),
        "10".to_string(),
        "20".to_string(),
        "30".to_string(),
    ]);

    let outcome = reconstruct(&tables);
    assert_eq!(outcome.deck, deck);
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn duplicate_coordinate_rows_keep_the_first_occurrence() {
    let deck = sample_deck();
    let mut tables = flatten(&deck).unwrap();
    tables.element_coords.push(vec![
        "The Fool".to_string(),
        "Dog".to_string(),
        "1".to_string(),
        "2".to_string(),
        "3".to_string(),
    ]);

    let outcome = reconstruct(&tables);
    assert_eq!(outcome.deck, deck);
}

#[test]
fn reconstruction_follows_main_row_order() {
    let deck = sample_deck();
    let mut tables = flatten(&deck).unwrap();
    tables.main.reverse();

    let labels: Vec<String> = reconstruct(&tables)
        .deck
        .cards
        .into_iter()
        .map(|card| card.label)
        .collect();
    assert_eq!(labels, vec!["The Tower", "The Fool"]);
}
