//! # sheetgrid-xlsx
//!
//! XLSX (Office Open XML) loader for sheetgrid: reads a package into the
//! raw document tree that `sheetgrid-core` extracts grids from.
//!
//! This is deliberately a loader, not a validator: beyond locating the
//! required parts it trusts the package, and malformed details degrade the
//! same way they do inside the extraction core.

pub mod error;
pub mod reader;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
