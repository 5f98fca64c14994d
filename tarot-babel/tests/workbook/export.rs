//! Workbook serialization: sheet layout and the constraint sidecar.

use crate::common::sample_deck;
use serde_json::Value;
use tarot_babel::{Format, SerializedDeck, Workbook};
use tarot_babel::formats::WorkbookFormat;

fn exported() -> Workbook {
    match WorkbookFormat::new().serialize(&sample_deck()).unwrap() {
        SerializedDeck::Sheets(workbook) => workbook,
        other => panic!("expected sheets, got {other:?}"),
    }
}

#[test]
fn every_sheet_starts_with_its_column_headers() {
    let workbook = exported();
    let headers: Vec<&str> = workbook
        .sheets
        .iter()
        .map(|sheet| sheet.content.lines().next().unwrap())
        .collect();
    assert_eq!(
        headers,
        vec![
            "card_label,suit,image,image3d",
            "card_label,element_label,x,y,r",
            "card_label,element_label,type,content",
            "card_label,polarity,keywords,summary,meaning",
            "card_label,polarity,type,content",
        ]
    );
}

#[test]
fn keyword_cells_are_joined_with_comma_space() {
    let workbook = exported();
    let meanings = &workbook.sheets[3];
    assert!(meanings.content.contains("\"upheaval, awakening\""));
}

#[test]
fn unplaced_elements_serialize_blank_coordinates() {
    let workbook = exported();
    let coords = &workbook.sheets[1];
    assert!(coords.content.contains("The Tower,Crown,,,\n"));
}

#[test]
fn the_sidecar_derives_the_suit_domain_from_the_deck() {
    let manifest: Value =
        serde_json::from_str(&exported().constraints.unwrap()).unwrap();
    let constraints = manifest["constraints"].as_array().unwrap();

    let suit_rule = constraints
        .iter()
        .find(|constraint| {
            constraint["rule"] == "enumeration" && constraint["column"] == "suit"
        })
        .expect("suit enumeration rule present");
    assert_eq!(suit_rule["allowed"], serde_json::json!(["Major"]));
}

#[test]
fn the_sidecar_carries_reference_and_range_rules() {
    let manifest: Value =
        serde_json::from_str(&exported().constraints.unwrap()).unwrap();
    let constraints = manifest["constraints"].as_array().unwrap();

    let references = constraints
        .iter()
        .filter(|constraint| constraint["rule"] == "reference")
        .count();
    assert_eq!(references, 5);

    let ranges: Vec<&Value> = constraints
        .iter()
        .filter(|constraint| constraint["rule"] == "range")
        .collect();
    assert_eq!(ranges.len(), 3);
    for range in ranges {
        assert_eq!(range["min"], 0);
        assert_eq!(range["max"], 1000);
        assert_eq!(range["allow_blank"], true);
    }
}
