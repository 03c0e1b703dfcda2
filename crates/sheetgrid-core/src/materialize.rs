//! Sheet materialization
//!
//! The orchestrator: walks each visible worksheet, resolves values and
//! styles for every explicit cell, back-fills merged regions, and emits one
//! fixed-width grid per sheet.

use log::{debug, warn};

use crate::document::{Document, Sheet};
use crate::grid::{CellSlot, SheetGrid};
use crate::merge::merge_fill_map;
use crate::reference::{column_index, column_name, split_reference};
use crate::style::resolve_style;
use crate::value::resolve_cell_value;

/// Extract one grid per visible worksheet, in workbook order.
///
/// This never fails: a document with no sheets, or sheets with no rows,
/// simply contributes nothing.
pub fn extract_grids(document: &Document) -> Vec<SheetGrid> {
    document
        .sheets
        .iter()
        .filter(|sheet| !sheet.hidden)
        .map(|sheet| materialize_sheet(sheet, document))
        .collect()
}

fn materialize_sheet(sheet: &Sheet, document: &Document) -> SheetGrid {
    // Pre-pass: the widest column observed anywhere in the sheet fixes the
    // slot count of every row.
    let max_columns = sheet
        .rows
        .iter()
        .flat_map(|row| &row.cells)
        .filter_map(|cell| column_index(split_reference(&cell.reference).0))
        .max()
        .unwrap_or(0);

    let merge_fills = merge_fill_map(sheet, &document.shared_strings);

    debug!(
        "materializing sheet '{}': {} rows, {} columns, {} merge fills",
        sheet.title,
        sheet.rows.len(),
        max_columns,
        merge_fills.len()
    );

    let mut rows = Vec::with_capacity(sheet.rows.len());

    for (row_index, row) in sheet.rows.iter().enumerate() {
        let row_number = row_index as u32 + 1;
        let mut slots: Vec<CellSlot> = (0..max_columns).map(CellSlot::empty).collect();

        for cell in &row.cells {
            let (name, _) = split_reference(&cell.reference);
            let Some(col) = column_index(name) else {
                warn!(
                    "sheet '{}': dropping cell with unparsable reference '{}'",
                    sheet.title, cell.reference
                );
                continue;
            };

            // col is 1-based and bounded by the pre-pass; a miss here means
            // the reference fell outside the sheet and the cell is dropped.
            let Some(slot) = slots.get_mut((col - 1) as usize) else {
                continue;
            };

            slot.value = resolve_cell_value(cell, &document.shared_strings);
            slot.attributes =
                resolve_style(cell.style_index, &document.styles, document.theme.as_ref());
        }

        // Merge back-fill: only slots still empty after explicit placement,
        // so an explicit value is never overwritten.
        if !merge_fills.is_empty() {
            for (slot_index, slot) in slots.iter_mut().enumerate() {
                if !slot.value.is_empty() {
                    continue;
                }
                let reference = format!("{}{}", column_name(slot_index as u32 + 1), row_number);
                if let Some(fallback) = merge_fills.get(&reference) {
                    slot.value = fallback.clone();
                }
            }
        }

        rows.push(slots);
    }

    SheetGrid {
        title: sheet.title.clone(),
        rows,
    }
}
