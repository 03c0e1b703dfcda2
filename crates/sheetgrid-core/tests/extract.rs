//! End-to-end extraction over a hand-built document tree.

use pretty_assertions::assert_eq;
use sheetgrid_core::{
    extract_grids, BoldMarker, Border, Cell, CellAttributes, CellFormat, CellType, ColorRef,
    Document, Fill, Font, Row, SchemeColor, Sheet, StyleSheet, ThemeScheme,
};

/// A workbook exercising shared strings, booleans, merges, and styles at once.
fn fixture() -> Document {
    let styles = StyleSheet {
        cell_formats: vec![
            CellFormat::default(),
            // 1: bold + theme fill
            CellFormat {
                font_id: Some(1),
                fill_id: Some(1),
                border_id: None,
            },
            // 2: bordered with a direct fill color
            CellFormat {
                font_id: Some(0),
                fill_id: Some(2),
                border_id: Some(1),
            },
        ],
        fonts: vec![
            Font::default(),
            Font {
                bold: Some(BoldMarker::implicit()),
            },
        ],
        fills: vec![
            Fill::default(),
            Fill {
                foreground: Some(ColorRef::theme(2)),
            },
            Fill {
                foreground: Some(ColorRef::rgb("FFAABBCC")),
            },
        ],
        borders: vec![
            Border::default(),
            Border {
                left: true,
                right: true,
                top: true,
                bottom: true,
                diagonal: false,
            },
        ],
    };

    let theme = ThemeScheme {
        colors: vec![
            SchemeColor::system("dk1"),
            SchemeColor::srgb("lt1", "FFFFFF"),
            SchemeColor::srgb("dk2", "FF112233"),
            SchemeColor::srgb("lt2", "EEECE1"),
            SchemeColor::srgb("accent1", "4F81BD"),
            SchemeColor::srgb("accent2", "C0504D"),
        ],
    };

    let mut header = Sheet::new("Header");
    header.rows = vec![
        Row::new(vec![
            Cell::new("A1")
                .with_type(CellType::SharedString)
                .with_value("0")
                .with_style(1),
            Cell::new("C1").with_type(CellType::Boolean).with_value("0"),
        ]),
        Row::new(vec![Cell::new("B2")
            .with_type(CellType::Boolean)
            .with_value("1")]),
    ];
    header.merges = vec!["A1:B2".to_string()];

    let mut detail = Sheet::new("Detail");
    detail.rows = vec![Row::new(vec![Cell::new("A1")
        .with_value("42")
        .with_style(2)])];

    Document {
        sheets: vec![
            header,
            Sheet::new("Scratch").with_hidden(true),
            detail,
        ],
        shared_strings: vec!["Title".into(), "Unused".into()],
        styles,
        theme: Some(theme),
    }
}

#[test]
fn hidden_sheets_never_appear() {
    let grids = extract_grids(&fixture());
    let titles: Vec<_> = grids.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, ["Header", "Detail"]);
}

#[test]
fn every_row_has_the_sheet_width() {
    let grids = extract_grids(&fixture());
    for row in &grids[0].rows {
        assert_eq!(row.len(), 3);
    }
    assert_eq!(grids[1].rows[0].len(), 1);
}

#[test]
fn values_resolve_through_every_representation() {
    let grids = extract_grids(&fixture());
    let header = &grids[0];

    // Shared string at index 0, with a styled anchor
    assert_eq!(header.rows[0][0].value, "Title");
    // Boolean false
    assert_eq!(header.rows[0][2].value, "FALSE");
    // Boolean true
    assert_eq!(header.rows[1][1].value, "TRUE");
    // Untyped verbatim
    assert_eq!(grids[1].rows[0][0].value, "42");
}

#[test]
fn merge_fills_empty_slots_only() {
    let grids = extract_grids(&fixture());
    let header = &grids[0];

    // B1 and A2 are inside A1:B2 with no explicit record
    assert_eq!(header.rows[0][1].value, "Title");
    assert_eq!(header.rows[1][0].value, "Title");
    // B2 has its own explicit value and keeps it
    assert_eq!(header.rows[1][1].value, "TRUE");
    // C2 is outside the merge and stays empty
    assert_eq!(header.rows[1][2].value, "");
}

#[test]
fn styles_resolve_on_explicit_cells() {
    let grids = extract_grids(&fixture());

    // Theme fill and implicit bold on the anchor
    assert_eq!(
        grids[0].rows[0][0].attributes,
        Some(CellAttributes {
            border: false,
            color: Some("#112233".into()),
            bold: true,
        })
    );

    // Border plus direct (alpha-stripped) fill on the detail sheet
    assert_eq!(
        grids[1].rows[0][0].attributes,
        Some(CellAttributes {
            border: true,
            color: Some("#AABBCC".into()),
            bold: false,
        })
    );

    // Unstyled cells carry no attributes, and merge fills never add any
    assert_eq!(grids[0].rows[0][2].attributes, None);
    assert_eq!(grids[0].rows[1][0].attributes, None);
}

#[test]
fn grids_serialize_without_empty_placeholders() {
    let grids = extract_grids(&fixture());
    let json = serde_json::to_value(&grids[0]).unwrap();

    // Unstyled slot: no "attributes" key at all
    let plain = &json["rows"][0][2];
    assert_eq!(plain["value"], "FALSE");
    assert!(plain.get("attributes").is_none());

    // Styled slot keeps only resolved attributes
    let styled = &json["rows"][0][0];
    assert_eq!(styled["attributes"]["bold"], true);
    assert_eq!(styled["attributes"]["color"], "#112233");
}
