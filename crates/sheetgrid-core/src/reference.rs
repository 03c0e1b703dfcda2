//! Spreadsheet reference arithmetic
//!
//! Column names are base-26 numerals using A-Z as digits with value 1-26
//! (there is no zero digit): A=1, Z=26, AA=27, XFD=16384. Indices here are
//! 1-based; the materializer converts to 0-based slot positions at the edge.

use crate::error::{Error, Result};
use crate::MAX_COLS;

/// Convert a column name to its 1-based index.
///
/// Returns `None` for empty or non-alphabetic input, and for names past the
/// last real column (`XFD`); callers treat such references as malformed and
/// drop them rather than sizing anything by them.
///
/// # Examples
/// ```
/// use sheetgrid_core::reference::column_index;
///
/// assert_eq!(column_index("A"), Some(1));
/// assert_eq!(column_index("AA"), Some(27));
/// assert_eq!(column_index("A1"), None);
/// assert_eq!(column_index("XFE"), None);
/// ```
pub fn column_index(name: &str) -> Option<u32> {
    if name.is_empty() {
        return None;
    }

    let mut index: u32 = 0;
    for c in name.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }

    if index > MAX_COLS {
        return None;
    }

    Some(index)
}

/// Convert a 1-based column index to its name (1 = A, 26 = Z, 27 = AA, etc.)
///
/// Returns an empty string for index 0.
pub fn column_name(index: u32) -> String {
    let mut name = String::new();
    let mut n = index;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        name.insert(0, c);
        n /= 26;
    }

    name
}

/// Split a combined reference like `"BC23"` into its alphabetic column name
/// and 1-based row number.
///
/// Missing or unparsable parts degrade to an empty name and row 0; this
/// never fails.
pub fn split_reference(reference: &str) -> (&str, u32) {
    let letters_end = reference
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(reference.len());

    let (name, digits) = reference.split_at(letters_end);
    let row = digits.parse::<u32>().unwrap_or(0);

    (name, row)
}

/// Parse a full reference into a (1-based column, 1-based row) pair.
///
/// Unlike [`split_reference`] this rejects references with a missing or
/// malformed component; the merge flattener uses it to drop bad endpoints.
pub fn parse_reference(reference: &str) -> Result<(u32, u32)> {
    let (name, row) = split_reference(reference);

    let col = column_index(name)
        .ok_or_else(|| Error::InvalidReference(reference.to_string()))?;
    if row == 0 {
        return Err(Error::InvalidReference(reference.to_string()));
    }

    Ok((col, row))
}
