//! Merge-range flattening
//!
//! Flattens a worksheet's merge declarations into a reference → value map:
//! every cell inside a merge rectangle maps to the anchor cell's resolved
//! value. The materializer consults this map only for slots whose explicit
//! value is empty.

use ahash::AHashMap;
use log::warn;

use crate::document::{Cell, Sheet};
use crate::error::{Error, Result};
use crate::reference::{column_name, parse_reference, split_reference};
use crate::value::resolve_cell_value;

/// Build the merge fallback map for a worksheet.
///
/// Malformed ranges and ranges whose anchor cell has no record are dropped
/// without failing the extraction. Ranges are processed in declaration
/// order, so a later range wins any overlap.
pub fn merge_fill_map(sheet: &Sheet, shared_strings: &[String]) -> AHashMap<String, String> {
    let mut map = AHashMap::new();

    for merge in &sheet.merges {
        let ((start_col, start_row), (end_col, end_row)) = match parse_merge(merge) {
            Ok(endpoints) => endpoints,
            Err(err) => {
                warn!("dropping merge range: {err}");
                continue;
            }
        };

        let Some(anchor) = find_cell(sheet, start_col, start_row) else {
            warn!("dropping merge range '{merge}': no anchor cell record");
            continue;
        };
        let anchor_value = resolve_cell_value(anchor, shared_strings);

        for row in start_row..=end_row {
            for col in start_col..=end_col {
                let reference = format!("{}{}", column_name(col), row);
                map.insert(reference, anchor_value.clone());
            }
        }
    }

    map
}

/// Parse a `"A1:B2"` merge declaration into its endpoint coordinates
/// (1-based columns and rows).
fn parse_merge(merge: &str) -> Result<((u32, u32), (u32, u32))> {
    let (start, end) = merge
        .split_once(':')
        .ok_or_else(|| Error::InvalidRange(merge.to_string()))?;

    Ok((parse_reference(start)?, parse_reference(end)?))
}

/// Look up the explicit cell record at the given 1-based coordinates.
///
/// Rows are positional, so the record must live in row `row - 1` and carry a
/// reference with a matching column.
fn find_cell(sheet: &Sheet, col: u32, row: u32) -> Option<&Cell> {
    let cells = &sheet.rows.get(row.checked_sub(1)? as usize)?.cells;

    cells.iter().find(|cell| {
        let (name, cell_row) = split_reference(&cell.reference);
        cell_row == row && crate::reference::column_index(name) == Some(col)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Row;

    fn sheet_with(merges: &[&str], rows: Vec<Row>) -> Sheet {
        Sheet {
            title: "S".into(),
            hidden: false,
            rows,
            merges: merges.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_rectangle_flattened_to_anchor_value() {
        let sheet = sheet_with(
            &["A1:B2"],
            vec![
                Row::new(vec![Cell::new("A1").with_value("X")]),
                Row::empty(),
            ],
        );

        let map = merge_fill_map(&sheet, &[]);
        assert_eq!(map.len(), 4);
        for reference in ["A1", "B1", "A2", "B2"] {
            assert_eq!(map.get(reference).map(String::as_str), Some("X"));
        }
    }

    #[test]
    fn test_malformed_ranges_dropped() {
        let sheet = sheet_with(
            &["A1B2", "A1:", ":B2", "A0:B2", "1:2"],
            vec![Row::new(vec![Cell::new("A1").with_value("X")])],
        );

        assert!(merge_fill_map(&sheet, &[]).is_empty());
    }

    #[test]
    fn test_out_of_bounds_endpoint_dropped() {
        // An endpoint past the last real column would make the rectangle
        // walk effectively unbounded; the range is dropped instead.
        let sheet = sheet_with(
            &["A1:ZZZZZZZZ9"],
            vec![Row::new(vec![Cell::new("A1").with_value("X")])],
        );

        assert!(merge_fill_map(&sheet, &[]).is_empty());
    }

    #[test]
    fn test_missing_anchor_dropped() {
        let sheet = sheet_with(
            &["C3:D4"],
            vec![Row::new(vec![Cell::new("A1").with_value("X")])],
        );

        assert!(merge_fill_map(&sheet, &[]).is_empty());
    }

    #[test]
    fn test_last_declared_range_wins_overlap() {
        let sheet = sheet_with(
            &["A1:B1", "B1:C1"],
            vec![Row::new(vec![
                Cell::new("A1").with_value("first"),
                Cell::new("B1").with_value("second"),
            ])],
        );

        let map = merge_fill_map(&sheet, &[]);
        assert_eq!(map.get("A1").map(String::as_str), Some("first"));
        assert_eq!(map.get("B1").map(String::as_str), Some("second"));
        assert_eq!(map.get("C1").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_anchor_value_goes_through_value_resolver() {
        use crate::document::CellType;

        let shared = vec!["Alpha".to_string(), "Beta".to_string()];
        let sheet = sheet_with(
            &["A1:A2"],
            vec![Row::new(vec![Cell::new("A1")
                .with_type(CellType::SharedString)
                .with_value("1")])],
        );

        let map = merge_fill_map(&sheet, &shared);
        assert_eq!(map.get("A2").map(String::as_str), Some("Beta"));
    }
}
