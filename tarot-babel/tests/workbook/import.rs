//! Workbook parsing: hand-built sheet containers, spreadsheet quirks.

use crate::common::sample_deck;
use tarot_babel::formats::WorkbookFormat;
use tarot_babel::{Format, SerializedDeck, Sheet, Workbook};

fn sheet(name: &str, content: &str) -> Sheet {
    Sheet {
        name: name.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn full_round_trip_through_the_format_trait() {
    let deck = sample_deck();
    let format = WorkbookFormat::new();
    let serialized = format.serialize(&deck).unwrap();
    assert_eq!(format.parse(&serialized).unwrap(), deck);
}

#[test]
fn pandas_style_float_cells_read_as_integers() {
    let workbook = Workbook {
        sheets: vec![
            sheet(
                "Main",
                "card_label,suit,image,image3d\nThe Fool,Major,a.png,a.glb\n",
            ),
            sheet(
                "ElementCoords",
                "card_label,element_label,x,y,r\nThe Fool,Dog,100.0,200.0,0.0\n",
            ),
            sheet(
                "Meanings",
                "card_label,polarity,keywords,summary,meaning\n\
                 The Fool,upright,,S,M\nThe Fool,reversed,,,\n",
            ),
        ],
        constraints: None,
    };

    let deck = WorkbookFormat::new()
        .parse(&SerializedDeck::Sheets(workbook))
        .unwrap();
    let element = &deck.cards[0].elements[0];
    assert_eq!(element.x, Some(100));
    assert_eq!(element.y, Some(200));
    assert_eq!(element.r, Some(0));
}

#[test]
fn orphan_rows_are_dropped_without_aborting() {
    let workbook = Workbook {
        sheets: vec![
            sheet(
                "Main",
                "card_label,suit,image,image3d\nThe Fool,Major,a.png,a.glb\n",
            ),
            sheet(
                "Meanings",
                "card_label,polarity,keywords,summary,meaning\n\
                 The Fool,upright,,S,M\nThe Fool,reversed,,,\n\
                 The Moon,upright,,,\n",
            ),
            sheet(
                "Scenarios",
                "card_label,polarity,type,content\nThe Moon,upright,love,C\n",
            ),
        ],
        constraints: None,
    };

    let deck = WorkbookFormat::new()
        .parse(&SerializedDeck::Sheets(workbook))
        .unwrap();
    assert_eq!(deck.cards.len(), 1);
    assert_eq!(deck.cards[0].label, "The Fool");
    assert!(deck.cards[0].meanings.upright.scenarios.is_empty());
}

#[test]
fn unknown_sheets_are_ignored() {
    let workbook = Workbook {
        sheets: vec![
            sheet(
                "Main",
                "card_label,suit,image,image3d\nThe Fool,Major,a.png,a.glb\n",
            ),
            sheet("Notes", "whatever,content\nfree,form\n"),
            sheet(
                "Meanings",
                "card_label,polarity,keywords,summary,meaning\n\
                 The Fool,upright,,S,M\nThe Fool,reversed,,,\n",
            ),
        ],
        constraints: None,
    };

    let deck = WorkbookFormat::new()
        .parse(&SerializedDeck::Sheets(workbook))
        .unwrap();
    assert_eq!(deck.cards.len(), 1);
}

#[test]
fn the_constraint_sidecar_is_never_consulted() {
    let mut format_input = match WorkbookFormat::new().serialize(&sample_deck()).unwrap() {
        SerializedDeck::Sheets(workbook) => workbook,
        other => panic!("expected sheets, got {other:?}"),
    };
    // Corrupt the sidecar; reconstruction must not care.
    format_input.constraints = Some("not even json".to_string());

    let deck = WorkbookFormat::new()
        .parse(&SerializedDeck::Sheets(format_input))
        .unwrap();
    assert_eq!(deck, sample_deck());
}
