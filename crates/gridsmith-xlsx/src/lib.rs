//! # gridsmith-xlsx
//!
//! Office Open XML (`.xlsx`) container support for gridsmith workbooks.
//!
//! [`XlsxWriter`] serializes a [`gridsmith_core::Workbook`] with its styles,
//! column widths and merged regions. Output is byte-for-byte reproducible:
//! every zip entry carries the same fixed timestamp.
//!
//! [`XlsxReader`] loads sheet names, values, formulas, styles, merges and
//! column widths back into a workbook for inspection.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
