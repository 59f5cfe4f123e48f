//! Cell-related types
//!
//! - [`CellValue`] - what a cell holds
//! - [`CellAddress`] / [`CellRange`] - where it lives ("B2", "A1:C1")
//! - [`CellData`] - value plus style index, as kept in [`CellStorage`]

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::{CellData, CellStorage};
pub use value::CellValue;
