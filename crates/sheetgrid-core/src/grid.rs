//! Extracted grid (output model)
//!
//! The materializer emits one [`SheetGrid`] per visible worksheet. Every row
//! in a grid has exactly the same slot count, equal to the highest column
//! index observed anywhere in that worksheet.

/// A materialized worksheet: its title and fixed-width rows
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetGrid {
    pub title: String,
    pub rows: Vec<Vec<CellSlot>>,
}

/// One cell slot in a materialized row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSlot {
    /// Column index (0-based)
    pub column: u32,
    /// Resolved display value; empty when nothing resolved
    pub value: String,
    /// Present only when at least one visual attribute resolved
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub attributes: Option<CellAttributes>,
}

impl CellSlot {
    /// An empty slot at the given 0-based column
    pub fn empty(column: u32) -> Self {
        Self {
            column,
            value: String::new(),
            attributes: None,
        }
    }
}

/// Resolved visual attributes for a cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAttributes {
    /// Any border edge declared on the cell's format
    pub border: bool,
    /// Resolved fill color as `#RRGGBB`; omitted when the priority chain
    /// yields no color
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub color: Option<String>,
    pub bold: bool,
}

impl CellAttributes {
    /// True when no attribute resolved; such a set is never attached to a slot
    pub fn is_empty(&self) -> bool {
        !self.border && self.color.is_none() && !self.bold
    }
}
