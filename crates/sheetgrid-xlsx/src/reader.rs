//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::debug;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{read_styles_xml, read_theme_xml};
use sheetgrid_core::{Cell, CellType, Document, Row, Sheet};

/// Decode Excel's `_xHHHH_` escape sequences.
///
/// The source format encodes characters that are awkward in XML this way:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut saw_x = false;
        let mut hex_chars = String::new();
        let mut is_escape = false;

        if chars.peek() == Some(&'x') {
            chars.next();
            saw_x = true;

            for _ in 0..4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                chars.next();
                if let Some(decoded) =
                    u32::from_str_radix(&hex_chars, 16).ok().and_then(char::from_u32)
                {
                    result.push(decoded);
                    is_escape = true;
                }
            }
        }

        if !is_escape {
            // Not a valid escape sequence, output what we consumed
            result.push('_');
            if saw_x {
                result.push('x');
                result.push_str(&hex_chars);
            }
        }
    }

    result
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a document tree from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Document> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a document tree from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Document> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let mut document = Document::new();
        document.shared_strings = Self::read_shared_strings(&mut archive)?;
        document.styles = Self::read_styles(&mut archive)?;
        document.theme = Self::read_theme(&mut archive)?;

        // Sheet names and visibility, in workbook order
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        for (name, hidden, r_id) in sheet_info {
            let mut sheet = Sheet::new(&name).with_hidden(hidden);
            if let Some(path) = sheet_paths.get(&r_id) {
                Self::read_worksheet(&mut archive, path, &mut sheet)?;
            }
            debug!(
                "loaded sheet '{}': {} rows, {} merges",
                sheet.title,
                sheet.rows.len(),
                sheet.merges.len()
            );
            document.sheets.push(sheet);
        }

        Ok(document)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<sheetgrid_core::StyleSheet> {
        let file = match archive.by_name("xl/styles.xml") {
            Ok(f) => f,
            Err(_) => return Ok(sheetgrid_core::StyleSheet::default()),
        };
        read_styles_xml(BufReader::new(file))
    }

    fn read_theme<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Option<sheetgrid_core::ThemeScheme>> {
        let file = match archive.by_name("xl/theme/theme1.xml") {
            Ok(f) => f,
            Err(_) => return Ok(None), // No theme part is valid
        };
        read_theme_xml(BufReader::new(file)).map(Some)
    }

    /// Read workbook.xml to get sheet names, visibility, and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, bool, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;
                    let mut hidden = false;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"r:id" => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"state" => {
                                let state = attr.unescape_value().ok();
                                hidden = matches!(
                                    state.as_deref(),
                                    Some("hidden") | Some("veryHidden")
                                );
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, hidden, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = if let Some(stripped) = target.strip_prefix('/') {
                                stripped.to_string()
                            } else {
                                format!("xl/{}", target)
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read one worksheet part into the sheet's rows and merge list
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        sheet: &mut Sheet,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();

        let mut current_row: Option<Row> = None;
        let mut current_cell: Option<Cell> = None;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        Self::densify_rows(sheet, &e);
                        current_row = Some(Row::empty());
                    }
                    b"c" => {
                        current_cell = Some(Self::parse_cell_start(&e));
                    }
                    b"v" if current_cell.is_some() => {
                        in_value = true;
                    }
                    b"is" if current_cell.is_some() => {
                        in_inline_str = true;
                    }
                    b"t" if in_inline_str => {
                        in_inline_text = true;
                    }
                    b"mergeCell" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"ref" {
                                if let Ok(reference) = attr.unescape_value() {
                                    sheet.merges.push(reference.to_string());
                                }
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        // A row with no cell children still occupies its slot
                        Self::densify_rows(sheet, &e);
                        sheet.rows.push(Row::empty());
                    }
                    b"c" => {
                        // Valueless cell, usually style-only
                        let cell = Self::parse_cell_start(&e);
                        if let Some(row) = current_row.as_mut() {
                            row.cells.push(cell);
                        }
                    }
                    b"mergeCell" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"ref" {
                                if let Ok(reference) = attr.unescape_value() {
                                    sheet.merges.push(reference.to_string());
                                }
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"row" => {
                        if let Some(row) = current_row.take() {
                            sheet.rows.push(row);
                        }
                    }
                    b"c" => {
                        if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take())
                        {
                            row.cells.push(cell);
                        }
                    }
                    b"v" => {
                        in_value = false;
                    }
                    b"is" => {
                        in_inline_str = false;
                    }
                    b"t" if in_inline_str => {
                        in_inline_text = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_value {
                        if let (Some(cell), Ok(text)) = (current_cell.as_mut(), e.unescape()) {
                            cell.value = Some(decode_excel_escapes(&text));
                        }
                    } else if in_inline_text {
                        if let (Some(cell), Ok(text)) = (current_cell.as_mut(), e.unescape()) {
                            // Inline string: keep the text in both slots so
                            // the value resolver sees stored text present
                            let decoded = decode_excel_escapes(&text);
                            cell.value = Some(decoded.clone());
                            cell.inline_text = Some(decoded);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Insert empty rows for any gap between the last loaded row and the
    /// declared row number, keeping rows dense and positional.
    fn densify_rows(sheet: &mut Sheet, e: &quick_xml::events::BytesStart<'_>) {
        let declared = e
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == b"r")
            .and_then(|attr| attr.unescape_value().ok())
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(sheet.rows.len() + 1);

        while sheet.rows.len() + 1 < declared {
            sheet.rows.push(Row::empty());
        }
    }

    /// Build a cell from its element attributes (`r`, `t`, `s`)
    fn parse_cell_start(e: &quick_xml::events::BytesStart<'_>) -> Cell {
        let mut cell = Cell::default();

        for attr in e.attributes().flatten() {
            let Ok(value) = attr.unescape_value() else {
                continue;
            };
            match attr.key.as_ref() {
                b"r" => cell.reference = value.to_string(),
                b"t" => {
                    cell.cell_type = match value.as_ref() {
                        "s" => Some(CellType::SharedString),
                        "b" => Some(CellType::Boolean),
                        "inlineStr" => Some(CellType::InlineString),
                        _ => None,
                    };
                }
                b"s" => cell.style_index = value.parse().ok(),
                _ => {}
            }
        }

        cell
    }
}
