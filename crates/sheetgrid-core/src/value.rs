//! Cell value resolution
//!
//! Turns one raw cell record into its display text. This is pure and total:
//! absent or malformed inputs degrade to an empty string, never an error.

use crate::document::{Cell, CellType};

/// Resolve a cell's display value against the shared string table.
///
/// - No stored text resolves to an empty string.
/// - Shared-string cells parse the stored text as an index; invalid or
///   out-of-range indices resolve to an empty string.
/// - Boolean cells map `"0"` to `"FALSE"` and anything else to `"TRUE"`.
/// - Inline-string cells return the inline text, if any.
/// - Untyped cells return the stored text verbatim.
pub fn resolve_cell_value(cell: &Cell, shared_strings: &[String]) -> String {
    let Some(raw) = cell.value.as_deref() else {
        return String::new();
    };

    match cell.cell_type {
        Some(CellType::SharedString) => raw
            .parse::<usize>()
            .ok()
            .and_then(|index| shared_strings.get(index))
            .cloned()
            .unwrap_or_default(),
        Some(CellType::Boolean) => {
            if raw == "0" { "FALSE" } else { "TRUE" }.to_string()
        }
        Some(CellType::InlineString) => cell.inline_text.clone().unwrap_or_default(),
        None => raw.to_string(),
    }
}
