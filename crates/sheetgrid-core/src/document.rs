//! Raw document tree (input model)
//!
//! These types describe an already-parsed spreadsheet package as handed over
//! by a loader such as `sheetgrid-xlsx`. The tree is read-only from the
//! extraction core's point of view: every lookup during materialization is a
//! borrow into these structures.
//!
//! Rows are dense and positional: the row at index `i` is spreadsheet row
//! `i + 1`. Loaders insert empty rows for gaps so merge back-fill can reach
//! rows that have no explicit cell records.

/// A complete parsed package: worksheets plus the workbook-scoped tables.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Worksheets in workbook order
    pub sheets: Vec<Sheet>,
    /// Shared string table, looked up by integer position
    pub shared_strings: Vec<String>,
    /// Workbook-scoped style tables
    pub styles: StyleSheet,
    /// Theme color scheme, when the package carries a theme part
    pub theme: Option<ThemeScheme>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single worksheet: title, visibility, rows, and merge declarations.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub title: String,
    /// Hidden sheets contribute nothing to the extracted output
    pub hidden: bool,
    /// Dense, positional rows (index `i` is spreadsheet row `i + 1`)
    pub rows: Vec<Row>,
    /// Merge ranges as source strings (`"A1:B2"`), in declaration order
    pub merges: Vec<String>,
}

impl Sheet {
    /// Create a visible sheet with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Mark the sheet hidden
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// One row of explicit cell records
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// A row with no explicit cells (used to densify row gaps)
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Declared data type of a cell's stored text
///
/// Unrecognized source tags map to `None` on the cell, which resolves the
/// stored text verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// Stored text is an index into the shared string table
    SharedString,
    /// Stored text is `"0"` (false) or anything else (true)
    Boolean,
    /// Value lives in the cell's inline text
    InlineString,
}

/// One explicit cell record as found in the source
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Combined reference string (`"B3"`)
    pub reference: String,
    /// Raw stored text, if any
    pub value: Option<String>,
    /// Declared data-type tag, if any
    pub cell_type: Option<CellType>,
    /// Inline text for inline-string cells
    pub inline_text: Option<String>,
    /// Index into the workbook's cell-format table
    pub style_index: Option<u32>,
}

impl Cell {
    /// Create a cell at the given reference with no value
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            ..Self::default()
        }
    }

    /// Set the stored text
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the declared data type
    pub fn with_type(mut self, cell_type: CellType) -> Self {
        self.cell_type = Some(cell_type);
        self
    }

    /// Set the inline text
    pub fn with_inline_text(mut self, text: impl Into<String>) -> Self {
        self.inline_text = Some(text.into());
        self
    }

    /// Set the style index
    pub fn with_style(mut self, style_index: u32) -> Self {
        self.style_index = Some(style_index);
        self
    }
}

/// Workbook-scoped style tables, all indexed positionally
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Cell formats, selected per cell via its style index
    pub cell_formats: Vec<CellFormat>,
    pub fonts: Vec<Font>,
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
}

/// A cell format bundling references into the component tables
#[derive(Debug, Clone, Copy, Default)]
pub struct CellFormat {
    pub font_id: Option<u32>,
    pub fill_id: Option<u32>,
    pub border_id: Option<u32>,
}

/// Border edge declarations for one border table entry
#[derive(Debug, Clone, Copy, Default)]
pub struct Border {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
    pub diagonal: bool,
}

impl Border {
    /// Whether any edge is declared
    pub fn any_edge(&self) -> bool {
        self.left || self.right || self.top || self.bottom || self.diagonal
    }
}

/// A font table entry; only the bold marker matters to the extraction core
#[derive(Debug, Clone, Default)]
pub struct Font {
    /// `Some` when the font declares a bold marker
    pub bold: Option<BoldMarker>,
}

/// A bold marker, with its explicit value when one was given
///
/// The source format treats a marker without an explicit value as true; the
/// style resolver applies that default, not the loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoldMarker {
    pub value: Option<bool>,
}

impl BoldMarker {
    /// Marker present with no explicit value
    pub fn implicit() -> Self {
        Self { value: None }
    }

    /// Marker present with an explicit value
    pub fn explicit(value: bool) -> Self {
        Self { value: Some(value) }
    }
}

/// A fill table entry; only the foreground color matters here
#[derive(Debug, Clone, Default)]
pub struct Fill {
    pub foreground: Option<ColorRef>,
}

/// A color as referenced by a fill: at most one of the three sources is
/// normally present, and they are consulted in priority order
/// (direct RGB, then theme index, then palette index).
#[derive(Debug, Clone, Default)]
pub struct ColorRef {
    /// Direct hex value, 6 (`RRGGBB`) or 8 (`AARRGGBB`) characters
    pub rgb: Option<String>,
    /// Positional index into the theme color scheme
    pub theme: Option<u32>,
    /// Index into the fixed legacy palette
    pub indexed: Option<u32>,
}

impl ColorRef {
    pub fn rgb(value: impl Into<String>) -> Self {
        Self {
            rgb: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn theme(index: u32) -> Self {
        Self {
            theme: Some(index),
            ..Self::default()
        }
    }

    pub fn indexed(index: u32) -> Self {
        Self {
            indexed: Some(index),
            ..Self::default()
        }
    }
}

/// Ordered theme color scheme; a theme reference is a positional index into
/// `colors`, so order is load-bearing.
#[derive(Debug, Clone, Default)]
pub struct ThemeScheme {
    pub colors: Vec<SchemeColor>,
}

/// One named scheme color
#[derive(Debug, Clone, Default)]
pub struct SchemeColor {
    pub name: String,
    /// Direct hex value; `None` for system-color entries, which therefore
    /// resolve to no color
    pub rgb: Option<String>,
}

impl SchemeColor {
    pub fn srgb(name: impl Into<String>, rgb: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rgb: Some(rgb.into()),
        }
    }

    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rgb: None,
        }
    }
}
