//! # gridsmith
//!
//! Generates the sample workbooks consumed by the sheet-to-code converter:
//! a financial model, a data-analysis workbook and an inventory tracker.
//!
//! Every sheet is described as a list of [`RowDescriptor`]s and written by
//! the sheet builder, [`populate`]. Sample data comes from [`PyRandom`], a
//! Mersenne Twister that reproduces CPython's `random` module, so the
//! generated numbers match the reference workbooks exactly.
//!
//! ## Features
//!
//! - `xlsx` (default): save workbooks through `gridsmith-xlsx`. Without it
//!   workbooks can still be built in memory, but saving returns
//!   [`Error::XlsxUnavailable`].
//!
//! ## Example
//!
//! ```rust
//! use gridsmith::prelude::*;
//!
//! let mut sheet = Worksheet::new("Summary");
//! let rows = [
//!     RowDescriptor::title("Executive Summary", 2),
//!     RowDescriptor::label_formula("Total Sales", "=SUM(RawData!A2:A101)"),
//! ];
//! let next_row = populate(&mut sheet, &rows, 1, &SheetStyle::analysis()).unwrap();
//! assert_eq!(next_row, 3);
//!
//! let workbook = WorkbookKind::InventoryTracking.build().unwrap();
//! assert_eq!(workbook.sheet_count(), 6);
//! ```

pub mod builder;
pub mod catalog;
pub mod error;
pub mod generate;
pub mod prelude;
pub mod references;
pub mod sample;
pub mod schema;
pub mod style;
pub mod workbooks;

pub use builder::populate;
pub use catalog::{catalog, CatalogEntry, WorkbookKind};
pub use error::{Error, Result};
pub use generate::{generate, generate_all, read_workbook, save_workbook, xlsx_available};
pub use references::{dangling_references, sheet_references, DanglingReference};
pub use sample::{PyRandom, PySample, SAMPLE_SEED};
pub use schema::{CellInput, RowDescriptor};
pub use style::{ColumnWidths, SheetStyle};

pub use gridsmith_core::{CellRange, CellValue, Workbook, Worksheet};
