//! Saving the generated workbooks and reading them back
#![cfg(feature = "xlsx")]

use std::fs;

use gridsmith::prelude::*;
use gridsmith::{dangling_references, read_workbook};
use pretty_assertions::assert_eq;

/// Two runs produce byte-identical files
#[test]
fn test_generation_is_reproducible() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let a = generate_all(first.path(), &WorkbookKind::ALL, |_, _| {}).unwrap();
    let b = generate_all(second.path(), &WorkbookKind::ALL, |_, _| {}).unwrap();

    for (left, right) in a.iter().zip(&b) {
        assert_eq!(left.file_name(), right.file_name());
        assert!(fs::read(left).unwrap() == fs::read(right).unwrap(), "{:?} differs", left);
    }
}

/// Regenerating into the same directory overwrites with identical bytes
#[test]
fn test_overwrite_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(WorkbookKind::InventoryTracking, dir.path()).unwrap();
    let before = fs::read(&path).unwrap();

    generate(WorkbookKind::InventoryTracking, dir.path()).unwrap();
    assert!(before == fs::read(&path).unwrap());
}

/// Seeded sales rows survive the file round trip
#[test]
fn test_raw_data_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = generate(WorkbookKind::DataAnalysis, dir.path()).unwrap();
    let workbook = read_workbook(&path).unwrap();
    let raw = workbook.worksheet_by_name("RawData").unwrap();

    let first_row: Vec<CellValue> = (0..5).map(|col| raw.get_value_at(1, col)).collect();
    assert_eq!(
        first_row,
        vec![
            CellValue::Number(3419.0),
            CellValue::string("North"),
            CellValue::string("Widget A"),
            CellValue::string("01/01/2024"),
            CellValue::string("C001"),
        ]
    );
    let total: f64 = (1..=100)
        .filter_map(|row| raw.get_value_at(row, 0).as_number())
        .sum();
    assert_eq!(total, 272_929.0);
}

/// Formulas, merges, widths and styles come back as written
#[test]
fn test_layout_read_back() {
    let dir = tempfile::tempdir().unwrap();

    for kind in WorkbookKind::ALL {
        let built = kind.build().unwrap();
        let path = generate(kind, dir.path()).unwrap();
        let read = read_workbook(&path).unwrap();

        assert_eq!(read.sheet_names(), built.sheet_names());
        for (original, loaded) in built.worksheets().zip(read.worksheets()) {
            let expected: Vec<(u32, u16, &str)> = original.formula_cells().collect();
            let actual: Vec<(u32, u16, &str)> = loaded.formula_cells().collect();
            assert_eq!(actual, expected, "{}", original.name());
            assert_eq!(loaded.merged_regions(), original.merged_regions());
            assert_eq!(loaded.custom_column_widths(), original.custom_column_widths());

            for (row, col, _) in original.iter_cells() {
                assert_eq!(
                    loaded.cell_style_at(row, col),
                    original.cell_style_at(row, col),
                    "{} {}:{}",
                    original.name(),
                    row,
                    col
                );
            }
        }
        assert!(dangling_references(&read).is_empty());
    }
}
