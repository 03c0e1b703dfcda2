//! Style resolution
//!
//! Turns a cell's style index into the small set of presentation attributes
//! the grid carries: border presence, fill color, bold. Every lookup is
//! bounds-checked; an out-of-range id skips that one attribute and never
//! aborts the rest.

use crate::document::{ColorRef, StyleSheet, ThemeScheme};
use crate::grid::CellAttributes;

/// Resolve a cell's visual attributes from the workbook style tables.
///
/// Returns `None` when the style index is absent, out of range, or resolves
/// to no attribute at all.
pub fn resolve_style(
    style_index: Option<u32>,
    styles: &StyleSheet,
    theme: Option<&ThemeScheme>,
) -> Option<CellAttributes> {
    let format = styles.cell_formats.get(style_index? as usize)?;

    let mut attrs = CellAttributes::default();

    if let Some(border) = format
        .border_id
        .and_then(|id| styles.borders.get(id as usize))
    {
        attrs.border = border.any_edge();
    }

    if let Some(fill) = format.fill_id.and_then(|id| styles.fills.get(id as usize)) {
        attrs.color = fill
            .foreground
            .as_ref()
            .and_then(|color| resolve_color(color, theme));
    }

    if let Some(font) = format.font_id.and_then(|id| styles.fonts.get(id as usize)) {
        // A bold marker with no explicit value means bold; the format's
        // default for the marker is implicit-true.
        attrs.bold = font
            .bold
            .map(|marker| marker.value.unwrap_or(true))
            .unwrap_or(false);
    }

    if attrs.is_empty() {
        None
    } else {
        Some(attrs)
    }
}

/// One step of the color priority chain.
///
/// Returns `None` when the rule does not apply to this color reference, and
/// `Some(outcome)` when it does; an applicable rule may still yield no color
/// (`Some(None)`), which ends the chain without producing a color.
type ColorRule = fn(&ColorRef, Option<&ThemeScheme>) -> Option<Option<String>>;

/// Resolution attempts in strict priority order; the first applicable rule
/// wins and later rules are never consulted.
const COLOR_RULES: [ColorRule; 3] = [direct_rgb, theme_color, indexed_color];

/// Resolve a fill color reference to a `#RRGGBB` string, if any.
pub fn resolve_color(color: &ColorRef, theme: Option<&ThemeScheme>) -> Option<String> {
    COLOR_RULES
        .iter()
        .find_map(|rule| rule(color, theme))
        .flatten()
}

fn direct_rgb(color: &ColorRef, _theme: Option<&ThemeScheme>) -> Option<Option<String>> {
    let hex = color.rgb.as_deref()?;
    Some(Some(normalize_hex(hex)))
}

fn theme_color(color: &ColorRef, theme: Option<&ThemeScheme>) -> Option<Option<String>> {
    let index = color.theme?;
    Some(
        theme
            .and_then(|scheme| scheme.colors.get(index as usize))
            .and_then(|entry| entry.rgb.as_deref())
            .map(normalize_hex),
    )
}

fn indexed_color(color: &ColorRef, _theme: Option<&ThemeScheme>) -> Option<Option<String>> {
    let index = color.indexed?;
    Some(
        INDEXED_PALETTE
            .get(index as usize)
            .map(|&(r, g, b)| format!("#{:02X}{:02X}{:02X}", r, g, b)),
    )
}

/// Normalize a stored hex color: 8-character values carry a leading alpha
/// pair that is dropped; the result is uppercased and `#`-prefixed.
fn normalize_hex(hex: &str) -> String {
    let hex = if hex.len() == 8 && hex.is_ascii() {
        &hex[2..]
    } else {
        hex
    };
    format!("#{}", hex.to_ascii_uppercase())
}

/// Standard legacy color palette, indexed positionally
const INDEXED_PALETTE: [(u8, u8, u8); 56] = [
    (0, 0, 0),       // 0: Black
    (255, 255, 255), // 1: White
    (255, 0, 0),     // 2: Red
    (0, 255, 0),     // 3: Bright Green
    (0, 0, 255),     // 4: Blue
    (255, 255, 0),   // 5: Yellow
    (255, 0, 255),   // 6: Pink
    (0, 255, 255),   // 7: Turquoise
    (0, 0, 0),       // 8: Black
    (255, 255, 255), // 9: White
    (255, 0, 0),     // 10: Red
    (0, 255, 0),     // 11: Bright Green
    (0, 0, 255),     // 12: Blue
    (255, 255, 0),   // 13: Yellow
    (255, 0, 255),   // 14: Pink
    (0, 255, 255),   // 15: Turquoise
    (128, 0, 0),     // 16: Dark Red
    (0, 128, 0),     // 17: Green
    (0, 0, 128),     // 18: Dark Blue
    (128, 128, 0),   // 19: Dark Yellow
    (128, 0, 128),   // 20: Violet
    (0, 128, 128),   // 21: Teal
    (192, 192, 192), // 22: 25% Gray
    (128, 128, 128), // 23: 50% Gray
    (153, 153, 255), // 24: Periwinkle
    (153, 51, 102),  // 25: Plum
    (255, 255, 204), // 26: Ivory
    (204, 255, 255), // 27: Light Turquoise
    (102, 0, 102),   // 28: Dark Purple
    (255, 128, 128), // 29: Coral
    (0, 102, 204),   // 30: Ocean Blue
    (204, 204, 255), // 31: Ice Blue
    (0, 0, 128),     // 32: Dark Blue
    (255, 0, 255),   // 33: Pink
    (255, 255, 0),   // 34: Yellow
    (0, 255, 255),   // 35: Turquoise
    (128, 0, 128),   // 36: Violet
    (128, 0, 0),     // 37: Dark Red
    (0, 128, 128),   // 38: Teal
    (0, 0, 255),     // 39: Blue
    (0, 204, 255),   // 40: Sky Blue
    (204, 255, 255), // 41: Light Turquoise
    (204, 255, 204), // 42: Light Green
    (255, 255, 153), // 43: Light Yellow
    (153, 204, 255), // 44: Pale Blue
    (255, 153, 204), // 45: Rose
    (204, 153, 255), // 46: Lavender
    (255, 204, 153), // 47: Tan
    (51, 102, 255),  // 48: Light Blue
    (51, 204, 204),  // 49: Aqua
    (153, 204, 0),   // 50: Lime
    (255, 204, 0),   // 51: Gold
    (255, 153, 0),   // 52: Light Orange
    (255, 102, 0),   // 53: Orange
    (102, 102, 153), // 54: Blue-Gray
    (150, 150, 150), // 55: 40% Gray
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BoldMarker, Border, CellFormat, Fill, Font, SchemeColor};

    fn styles() -> StyleSheet {
        StyleSheet {
            cell_formats: vec![
                // 0: default, nothing set
                CellFormat::default(),
                // 1: bordered, filled, bold
                CellFormat {
                    font_id: Some(1),
                    fill_id: Some(1),
                    border_id: Some(1),
                },
                // 2: dangling ids everywhere
                CellFormat {
                    font_id: Some(9),
                    fill_id: Some(9),
                    border_id: Some(9),
                },
                // 3: bold only, explicit false
                CellFormat {
                    font_id: Some(2),
                    fill_id: None,
                    border_id: None,
                },
            ],
            fonts: vec![
                Font::default(),
                Font {
                    bold: Some(BoldMarker::implicit()),
                },
                Font {
                    bold: Some(BoldMarker::explicit(false)),
                },
            ],
            fills: vec![
                Fill::default(),
                Fill {
                    foreground: Some(ColorRef::rgb("FFAABBCC")),
                },
            ],
            borders: vec![
                Border::default(),
                Border {
                    top: true,
                    ..Border::default()
                },
            ],
        }
    }

    fn theme() -> ThemeScheme {
        ThemeScheme {
            colors: vec![
                SchemeColor::system("dk1"),
                SchemeColor::srgb("lt1", "FFFFFF"),
                SchemeColor::srgb("dk2", "FF112233"),
                SchemeColor::srgb("lt2", "EEECE1"),
                SchemeColor::srgb("accent1", "4F81BD"),
                SchemeColor::srgb("accent2", "C0504D"),
            ],
        }
    }

    #[test]
    fn test_no_style_index() {
        assert_eq!(resolve_style(None, &styles(), None), None);
    }

    #[test]
    fn test_style_index_out_of_range() {
        assert_eq!(resolve_style(Some(42), &styles(), None), None);
    }

    #[test]
    fn test_default_format_resolves_to_nothing() {
        assert_eq!(resolve_style(Some(0), &styles(), None), None);
    }

    #[test]
    fn test_full_resolution() {
        let attrs = resolve_style(Some(1), &styles(), None).unwrap();
        assert!(attrs.border);
        assert!(attrs.bold);
        assert_eq!(attrs.color.as_deref(), Some("#AABBCC"));
    }

    #[test]
    fn test_dangling_ids_skip_each_attribute() {
        // Format 2 points every id past its table; all attributes are
        // skipped rather than failing resolution.
        assert_eq!(resolve_style(Some(2), &styles(), None), None);
    }

    #[test]
    fn test_bold_explicit_false() {
        assert_eq!(resolve_style(Some(3), &styles(), None), None);
    }

    #[test]
    fn test_direct_rgb_drops_alpha() {
        let color = ColorRef::rgb("FFAABBCC");
        assert_eq!(resolve_color(&color, None).as_deref(), Some("#AABBCC"));
    }

    #[test]
    fn test_direct_rgb_six_chars() {
        let color = ColorRef::rgb("aabbcc");
        assert_eq!(resolve_color(&color, None).as_deref(), Some("#AABBCC"));
    }

    #[test]
    fn test_theme_reference() {
        let theme = theme();
        let color = ColorRef::theme(2);
        assert_eq!(
            resolve_color(&color, Some(&theme)).as_deref(),
            Some("#112233")
        );
    }

    #[test]
    fn test_theme_index_out_of_range() {
        let theme = theme();
        let color = ColorRef::theme(6);
        assert_eq!(resolve_color(&color, Some(&theme)), None);
    }

    #[test]
    fn test_theme_system_color_has_no_rgb() {
        let theme = theme();
        let color = ColorRef::theme(0);
        assert_eq!(resolve_color(&color, Some(&theme)), None);
    }

    #[test]
    fn test_theme_reference_without_theme_part() {
        let color = ColorRef::theme(2);
        assert_eq!(resolve_color(&color, None), None);
    }

    #[test]
    fn test_indexed_palette() {
        let color = ColorRef::indexed(2);
        assert_eq!(resolve_color(&color, None).as_deref(), Some("#FF0000"));
    }

    #[test]
    fn test_indexed_out_of_range() {
        let color = ColorRef::indexed(200);
        assert_eq!(resolve_color(&color, None), None);
    }

    #[test]
    fn test_direct_rgb_wins_over_theme_and_indexed() {
        let theme = theme();
        let color = ColorRef {
            rgb: Some("FF00FF00".into()),
            theme: Some(2),
            indexed: Some(2),
        };
        assert_eq!(
            resolve_color(&color, Some(&theme)).as_deref(),
            Some("#00FF00")
        );
    }

    #[test]
    fn test_applicable_theme_rule_stops_the_chain() {
        // The theme reference applies even though it resolves to no color;
        // the indexed fallback is not consulted.
        let theme = theme();
        let color = ColorRef {
            rgb: None,
            theme: Some(0),
            indexed: Some(2),
        };
        assert_eq!(resolve_color(&color, Some(&theme)), None);
    }

    #[test]
    fn test_empty_reference_has_no_color() {
        assert_eq!(resolve_color(&ColorRef::default(), None), None);
    }
}
