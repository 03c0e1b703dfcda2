//! # sheetgrid-core
//!
//! Extraction core that turns a parsed spreadsheet package into normalized,
//! presentation-aware grids: one fixed-width grid of cell slots per visible
//! worksheet, each slot carrying its resolved display value and, when
//! present, resolved visual attributes (border, fill color, bold).
//!
//! The input is a read-only [`Document`] tree built by a loader (see the
//! `sheetgrid-xlsx` crate); this crate performs no I/O and no validation of
//! the package itself. Extraction is a synchronous single pass per document,
//! and independent extractions share no mutable state.
//!
//! ## Example
//!
//! ```rust
//! use sheetgrid_core::{extract_grids, Cell, Document, Row, Sheet};
//!
//! let mut sheet = Sheet::new("Report");
//! sheet.rows = vec![Row::new(vec![Cell::new("A1").with_value("Hello")])];
//!
//! let mut document = Document::new();
//! document.sheets.push(sheet);
//!
//! let grids = extract_grids(&document);
//! assert_eq!(grids[0].title, "Report");
//! assert_eq!(grids[0].rows[0][0].value, "Hello");
//! ```

pub mod document;
pub mod error;
pub mod grid;
pub mod materialize;
pub mod merge;
pub mod reference;
pub mod style;
pub mod value;

// Re-exports for convenience
pub use document::{
    BoldMarker, Border, Cell, CellFormat, CellType, ColorRef, Document, Fill, Font, Row,
    SchemeColor, Sheet, StyleSheet, ThemeScheme,
};
pub use error::{Error, Result};
pub use grid::{CellAttributes, CellSlot, SheetGrid};
pub use materialize::extract_grids;
pub use merge::merge_fill_map;
pub use style::{resolve_color, resolve_style};
pub use value::resolve_cell_value;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;
