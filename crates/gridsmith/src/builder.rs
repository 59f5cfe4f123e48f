//! The sheet builder
//!
//! [`populate`] turns a slice of [`RowDescriptor`]s into cells, styles and
//! merge ranges on a worksheet. Every generated sheet goes through it.

use gridsmith_core::{CellRange, Style, Worksheet};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{CellInput, RowDescriptor};
use crate::style::SheetStyle;

/// Write `rows` into `sheet` starting at the 1-based row `start_row`.
///
/// Each descriptor occupies exactly one row, blank ones included, so the
/// block spans `start_row..start_row + rows.len()`. Returns the next free
/// 1-based row so blocks can be chained. Column widths from `style` are
/// applied on every call.
///
/// # Example
///
/// ```rust
/// use gridsmith::{populate, RowDescriptor, SheetStyle};
/// use gridsmith_core::Worksheet;
///
/// let mut sheet = Worksheet::new("LoanCalculations");
/// let rows = [
///     RowDescriptor::title("Loan Analysis", 2),
///     RowDescriptor::label_formula("Total Interest Paid", "=B3-LoanParameters!B4"),
///     RowDescriptor::Blank,
/// ];
///
/// let next = populate(&mut sheet, &rows, 1, &SheetStyle::financial()).unwrap();
/// assert_eq!(next, 4);
/// assert_eq!(sheet.merged_regions()[0].to_string(), "A1:B1");
/// ```
pub fn populate(
    sheet: &mut Worksheet,
    rows: &[RowDescriptor],
    start_row: u32,
    style: &SheetStyle,
) -> Result<u32> {
    if start_row == 0 {
        return Err(Error::InvalidStartRow(start_row));
    }

    let roles = Roles::from(style);
    let mut row = start_row - 1;

    for descriptor in rows {
        match descriptor {
            RowDescriptor::Title { label, span } => {
                write_spanning(sheet, row, label, &roles.title, *span)?;
            }
            RowDescriptor::Section { label, span } => {
                write_spanning(sheet, row, label, &roles.section, *span)?;
            }
            RowDescriptor::Header(labels) => {
                for (index, label) in labels.iter().enumerate() {
                    let col = column(index)?;
                    sheet.set_cell_value_at(row, col, label.as_str())?;
                    sheet.set_cell_style_at(row, col, &roles.header)?;
                }
            }
            RowDescriptor::LabelFormula { label, value } => {
                if !label.is_empty() {
                    sheet.set_cell_value_at(row, 0, label.as_str())?;
                    sheet.set_cell_style_at(row, 0, &roles.label)?;
                }
                write_input(sheet, row, 1, value)?;
            }
            RowDescriptor::Data(cells) => {
                for (index, cell) in cells.iter().enumerate() {
                    write_input(sheet, row, column(index)?, cell)?;
                }
                let labelled = cells.first().map_or(false, |first| !first.is_empty());
                if style.label_data_rows && labelled {
                    sheet.set_cell_style_at(row, 0, &roles.label)?;
                }
            }
            RowDescriptor::Blank => {}
        }
        row = row.saturating_add(1);
    }

    if let Some(widths) = style.column_widths {
        for col in 0..widths.count {
            sheet.set_column_width(col, widths.width)?;
        }
    }

    debug!(
        sheet = sheet.name(),
        start_row,
        rows = rows.len(),
        "populated sheet block"
    );

    Ok(row.saturating_add(1))
}

/// Styles resolved once per block
struct Roles {
    title: Style,
    header: Style,
    section: Style,
    label: Style,
}

impl From<&SheetStyle> for Roles {
    fn from(style: &SheetStyle) -> Self {
        Self {
            title: style.title(),
            header: style.header(),
            section: style.section(),
            label: style.label(),
        }
    }
}

fn write_spanning(
    sheet: &mut Worksheet,
    row: u32,
    label: &str,
    style: &Style,
    span: u16,
) -> Result<()> {
    sheet.set_cell_value_at(row, 0, label)?;
    sheet.set_cell_style_at(row, 0, style)?;
    if span > 1 {
        sheet.merge_cells(&CellRange::row_span(row, 0, span))?;
    }
    Ok(())
}

fn write_input(sheet: &mut Worksheet, row: u32, col: u16, input: &CellInput) -> Result<()> {
    if let Some(value) = input.to_cell_value() {
        sheet.set_cell_value_at(row, col, value)?;
    }
    Ok(())
}

fn column(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| {
        Error::Core(gridsmith_core::Error::ColumnOutOfBounds(
            index as u32,
            gridsmith_core::MAX_COLS - 1,
        ))
    })
}
