//! # gridsmith-core
//!
//! In-memory workbook model used by the gridsmith generators.
//!
//! This crate provides the types every generated workbook is built from:
//! - [`CellValue`] - numbers, strings, booleans and verbatim formula strings
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing and merge ranges
//! - [`Style`] - font and fill attributes, deduplicated per sheet by [`StylePool`]
//! - [`Workbook`], [`Worksheet`] - the document structures
//!
//! ## Example
//!
//! ```rust
//! use gridsmith_core::{CellRange, Style, Workbook};
//!
//! let mut workbook = Workbook::empty();
//! let index = workbook.add_worksheet_with_name("LoanParameters").unwrap();
//! let sheet = workbook.worksheet_mut(index).unwrap();
//!
//! sheet.set_cell_value("A1", "Loan Parameters").unwrap();
//! sheet.set_cell_style("A1", &Style::new().bold(true).font_size(14.0)).unwrap();
//! sheet.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
//!
//! // Row/column indices are 0-based
//! sheet.set_cell_value_at(1, 1, 0.05).unwrap();
//! sheet.set_cell_formula_at(2, 1, "=B2*12").unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use error::{Error, Result};
pub use style::{Color, FillStyle, FontStyle, Style, StylePool};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
