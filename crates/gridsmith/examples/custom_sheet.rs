//! Example: lay out a small budget sheet with the sheet builder and save it

use gridsmith::prelude::*;

fn main() -> Result<()> {
    let mut workbook = Workbook::empty();
    let index = workbook.add_worksheet_with_name("Budget")?;
    let sheet = workbook
        .worksheet_mut(index)
        .ok_or_else(|| Error::Core(gridsmith_core::Error::SheetNotFound("Budget".into())))?;

    let style = SheetStyle::analysis().with_labelled_rows();
    let rows = [
        RowDescriptor::title("Monthly Budget", 3),
        RowDescriptor::header(["Item", "Planned", "Actual"]),
        data_row!["Rent", 1200, 1200],
        data_row!["Groceries", 400, 452.5],
        data_row!["Transport", 150, 98],
    ];
    let next = populate(sheet, &rows, 1, &style)?;

    let totals = [
        RowDescriptor::Blank,
        RowDescriptor::section("Totals", 3),
        RowDescriptor::label_formula("Planned", "=SUM(B3:B5)"),
        RowDescriptor::label_formula("Actual", "=SUM(C3:C5)"),
    ];
    populate(sheet, &totals, next, &style)?;

    let path = std::env::temp_dir().join("budget.xlsx");
    save_workbook(&workbook, &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
