//! Write-then-read tests for the XLSX container

use std::io::Cursor;

use gridsmith_core::{CellRange, CellValue, Color, Style, Workbook};
use gridsmith_xlsx::{XlsxError, XlsxReader, XlsxWriter};
use pretty_assertions::assert_eq;

fn parameters_workbook() -> Workbook {
    let title = Style::new().bold(true).font_size(14.0);
    let label = Style::new().bold(true);
    let header = Style::new().bold(true).fill_color(Color::LIGHT_GRAY);

    let mut wb = Workbook::empty();

    let idx = wb.add_worksheet_with_name("Settings").unwrap();
    let sheet = wb.worksheet_mut(idx).unwrap();
    sheet.set_cell_value("A1", "Inventory Settings").unwrap();
    sheet.set_cell_style("A1", &title).unwrap();
    sheet.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
    sheet.set_cell_value("A2", "Lead Time Multiplier").unwrap();
    sheet.set_cell_style("A2", &label).unwrap();
    sheet.set_cell_value("B2", 1.5).unwrap();
    sheet.set_cell_value("C2", "Safety factor for lead time").unwrap();
    for col in 0..10 {
        sheet.set_column_width(col, 15.0).unwrap();
    }

    let idx = wb.add_worksheet_with_name("Reports").unwrap();
    let sheet = wb.worksheet_mut(idx).unwrap();
    sheet.set_cell_value("A1", "Metric").unwrap();
    sheet.set_cell_style("A1", &header).unwrap();
    sheet
        .set_cell_formula("B2", "=COUNTIF(CurrentInventory!D:D, \"CRITICAL\")")
        .unwrap();
    sheet.set_cell_value("C2", true).unwrap();
    sheet.set_cell_value("D2", "Outlier Threshold (σ) & <more>").unwrap();

    wb
}

fn round_trip(wb: &Workbook) -> Workbook {
    let mut buf = Vec::new();
    XlsxWriter::write(wb, Cursor::new(&mut buf)).unwrap();
    XlsxReader::read(Cursor::new(&buf)).unwrap()
}

#[test]
fn test_roundtrip_sheet_order_and_values() {
    let wb2 = round_trip(&parameters_workbook());

    assert_eq!(wb2.sheet_names(), vec!["Settings", "Reports"]);

    let settings = wb2.worksheet_by_name("Settings").unwrap();
    assert_eq!(
        settings.get_value("A1").unwrap(),
        CellValue::string("Inventory Settings")
    );
    assert_eq!(settings.get_value("B2").unwrap(), CellValue::Number(1.5));

    let reports = wb2.worksheet_by_name("Reports").unwrap();
    assert_eq!(
        reports.get_value("B2").unwrap().formula_text(),
        Some("=COUNTIF(CurrentInventory!D:D, \"CRITICAL\")")
    );
    assert_eq!(reports.get_value("C2").unwrap(), CellValue::Boolean(true));
    assert_eq!(
        reports.get_value("D2").unwrap().as_string(),
        Some("Outlier Threshold (σ) & <more>")
    );
}

#[test]
fn test_roundtrip_layout() {
    let wb2 = round_trip(&parameters_workbook());
    let settings = wb2.worksheet(0).unwrap();

    let merges: Vec<String> = settings
        .merged_regions()
        .iter()
        .map(|r| r.to_string())
        .collect();
    assert_eq!(merges, vec!["A1:B1"]);

    assert_eq!(settings.custom_column_widths().len(), 10);
    assert_eq!(settings.column_width(9), Some(15.0));
    assert_eq!(settings.column_width(10), None);
}

#[test]
fn test_roundtrip_styles() {
    let wb2 = round_trip(&parameters_workbook());

    let settings = wb2.worksheet(0).unwrap();
    let title = settings.cell_style("A1").unwrap().unwrap();
    assert!(title.font.bold);
    assert_eq!(title.font.size, 14.0);
    assert!(settings.cell_style("B2").unwrap().is_none());

    let reports = wb2.worksheet(1).unwrap();
    let header = reports.cell_style("A1").unwrap().unwrap();
    assert!(header.font.bold);
    assert_eq!(header.fill, gridsmith_core::FillStyle::solid(Color::LIGHT_GRAY));
}

#[test]
fn test_write_file_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.xlsx");

    XlsxWriter::write_file(&parameters_workbook(), &path).unwrap();
    let wb2 = XlsxReader::read_file(&path).unwrap();

    assert_eq!(wb2.sheet_count(), 2);
    assert_eq!(wb2.worksheet(0).unwrap().cell_count(), 4);
}

#[test]
fn test_read_rejects_non_xlsx() {
    let result = XlsxReader::read(Cursor::new(b"not a zip archive".to_vec()));
    assert!(matches!(result, Err(XlsxError::Zip(_))));
}
