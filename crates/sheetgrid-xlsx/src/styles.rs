//! XLSX styles (styles.xml) and theme (theme1.xml) read helpers
//!
//! Only the slices of the style part that the extraction core consumes are
//! loaded: bold markers from fonts, foreground colors from fills, edge
//! declarations from borders, and the id triples from cellXfs.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use sheetgrid_core::{
    BoldMarker, Border, CellFormat, ColorRef, Fill, Font, SchemeColor, StyleSheet, ThemeScheme,
};

/// Read `xl/styles.xml` into the core's style tables.
pub(crate) fn read_styles_xml<R: BufRead>(reader: R) -> XlsxResult<StyleSheet> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut styles = StyleSheet::default();

    // Section flags keep dxf blocks (which reuse the same element names)
    // out of the positional tables.
    let mut in_fonts = false;
    let mut in_fills = false;
    let mut in_borders = false;
    let mut in_cell_xfs = false;

    let mut current_font: Option<Font> = None;
    let mut current_fill: Option<Fill> = None;
    let mut current_border: Option<Border> = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"fonts" => {
                    in_fonts = true;
                }
                b"fills" => {
                    in_fills = true;
                }
                b"borders" => {
                    in_borders = true;
                }
                b"cellXfs" => {
                    in_cell_xfs = true;
                }
                b"font" if in_fonts => {
                    current_font = Some(Font::default());
                }
                b"fill" if in_fills => {
                    current_fill = Some(Fill::default());
                }
                b"border" if in_borders => {
                    current_border = Some(Border::default());
                }
                b"b" => {
                    if let Some(font) = current_font.as_mut() {
                        font.bold = Some(parse_bold_marker(&e));
                    }
                }
                b"fgColor" => {
                    if let Some(fill) = current_fill.as_mut() {
                        fill.foreground = Some(parse_color_ref(&e));
                    }
                }
                b"left" | b"right" | b"top" | b"bottom" | b"diagonal" => {
                    if let Some(border) = current_border.as_mut() {
                        if edge_declared(&e) {
                            set_border_edge(border, e.name().as_ref());
                        }
                    }
                }
                b"xf" if in_cell_xfs => {
                    styles.cell_formats.push(parse_xf(&e));
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"font" if in_fonts => {
                    styles.fonts.push(Font::default());
                }
                b"fill" if in_fills => {
                    styles.fills.push(Fill::default());
                }
                b"b" => {
                    if let Some(font) = current_font.as_mut() {
                        font.bold = Some(parse_bold_marker(&e));
                    }
                }
                b"fgColor" => {
                    if let Some(fill) = current_fill.as_mut() {
                        fill.foreground = Some(parse_color_ref(&e));
                    }
                }
                b"border" if in_borders => {
                    styles.borders.push(Border::default());
                }
                b"left" | b"right" | b"top" | b"bottom" | b"diagonal" => {
                    if let Some(border) = current_border.as_mut() {
                        if edge_declared(&e) {
                            set_border_edge(border, e.name().as_ref());
                        }
                    }
                }
                b"xf" if in_cell_xfs => {
                    styles.cell_formats.push(parse_xf(&e));
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"fonts" => {
                    in_fonts = false;
                }
                b"fills" => {
                    in_fills = false;
                }
                b"borders" => {
                    in_borders = false;
                }
                b"cellXfs" => {
                    in_cell_xfs = false;
                }
                b"font" => {
                    if let Some(font) = current_font.take() {
                        styles.fonts.push(font);
                    }
                }
                b"fill" => {
                    if let Some(fill) = current_fill.take() {
                        styles.fills.push(fill);
                    }
                }
                b"border" => {
                    if let Some(border) = current_border.take() {
                        styles.borders.push(border);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(styles)
}

/// A bold marker keeps its explicit `val` when one is present; the
/// implicit-true default is applied by the style resolver, not here.
fn parse_bold_marker(e: &BytesStart<'_>) -> BoldMarker {
    let value = e
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"val")
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.as_ref() != "0" && v.as_ref() != "false");

    BoldMarker { value }
}

fn parse_color_ref(e: &BytesStart<'_>) -> ColorRef {
    let mut color = ColorRef::default();

    for attr in e.attributes().flatten() {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        match attr.key.as_ref() {
            b"rgb" => color.rgb = Some(value.to_string()),
            b"theme" => color.theme = value.parse().ok(),
            b"indexed" => color.indexed = value.parse().ok(),
            _ => {}
        }
    }

    color
}

/// An edge counts as declared when it carries a real line style.
fn edge_declared(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"style")
        .and_then(|attr| attr.unescape_value().ok())
        .is_some_and(|style| style.as_ref() != "none")
}

fn set_border_edge(border: &mut Border, edge: &[u8]) {
    match edge {
        b"left" => border.left = true,
        b"right" => border.right = true,
        b"top" => border.top = true,
        b"bottom" => border.bottom = true,
        _ => border.diagonal = true,
    }
}

fn parse_xf(e: &BytesStart<'_>) -> CellFormat {
    let mut format = CellFormat::default();

    for attr in e.attributes().flatten() {
        let Ok(value) = attr.unescape_value() else {
            continue;
        };
        match attr.key.as_ref() {
            b"fontId" => format.font_id = value.parse().ok(),
            b"fillId" => format.fill_id = value.parse().ok(),
            b"borderId" => format.border_id = value.parse().ok(),
            _ => {}
        }
    }

    format
}

/// Read `xl/theme/theme1.xml` into the ordered color scheme.
///
/// Scheme colors are kept in document order because theme references index
/// into the sequence positionally. System colors are recorded name-only and
/// therefore resolve to no color downstream.
pub(crate) fn read_theme_xml<R: BufRead>(reader: R) -> XlsxResult<ThemeScheme> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut scheme = ThemeScheme::default();

    let mut in_clr_scheme = false;
    let mut current_name: Option<String> = None;
    let mut current_rgb: Option<String> = None;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let local = e.name().local_name().as_ref().to_vec();
                if local == b"clrScheme" {
                    in_clr_scheme = true;
                } else if in_clr_scheme && current_name.is_none() {
                    current_name = Some(String::from_utf8_lossy(&local).into_owned());
                    current_rgb = None;
                } else if in_clr_scheme && local == b"srgbClr" {
                    current_rgb = val_attr(&e);
                }
                // sysClr carries no usable hex; current_rgb stays None
            }
            Ok(Event::Empty(e)) => {
                if in_clr_scheme && e.name().local_name().as_ref() == b"srgbClr" {
                    current_rgb = val_attr(&e);
                }
            }
            Ok(Event::End(e)) => {
                let local = e.name().local_name().as_ref().to_vec();
                if local == b"clrScheme" {
                    in_clr_scheme = false;
                } else if in_clr_scheme
                    && current_name.as_deref().map(str::as_bytes) == Some(local.as_slice())
                {
                    scheme.colors.push(SchemeColor {
                        name: current_name.take().unwrap_or_default(),
                        rgb: current_rgb.take(),
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(scheme)
}

fn val_attr(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"val")
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.to_string())
}
