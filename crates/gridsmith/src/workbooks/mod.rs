//! The three generated workbooks
//!
//! Each module lays out its sheets as row schemas and hands them to
//! [`populate`](crate::populate). Cell addresses inside formulas depend on
//! the exact row placement of earlier blocks, so blocks are placed at fixed
//! rows and never reflowed.

pub mod data_analysis;
pub mod financial;
pub mod inventory;

use gridsmith_core::{Workbook, Worksheet};

use crate::error::Result;

/// Empty workbook holding `names` in order
fn new_workbook(names: &[&str]) -> Result<Workbook> {
    let mut workbook = Workbook::empty();
    for name in names {
        workbook.add_worksheet_with_name(name)?;
    }
    Ok(workbook)
}

fn sheet_mut<'a>(workbook: &'a mut Workbook, name: &str) -> Result<&'a mut Worksheet> {
    workbook
        .worksheet_by_name_mut(name)
        .ok_or_else(|| gridsmith_core::Error::SheetNotFound(name.to_string()).into())
}
