//! Common imports for gridsmith users
//!
//! ```rust
//! use gridsmith::prelude::*;
//! ```

pub use crate::{
    data_row, generate, generate_all, populate, save_workbook, CellInput, CellRange, CellValue,
    Error, Result, RowDescriptor, SheetStyle, Workbook, WorkbookKind, Worksheet,
};
