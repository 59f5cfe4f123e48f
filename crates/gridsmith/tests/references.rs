//! Cross-sheet references in the generated formulas

use gridsmith::prelude::*;
use gridsmith::{dangling_references, sheet_references};

/// Every formula names only sheets of its own workbook
#[test]
fn test_no_dangling_references() {
    for kind in WorkbookKind::ALL {
        let workbook = kind.build().unwrap();
        let dangling = dangling_references(&workbook);
        assert!(dangling.is_empty(), "{}: {:?}", kind, dangling);
    }
}

/// Removing a sheet exposes the formulas that pointed at it
#[test]
fn test_missing_sheet_is_reported() {
    let mut workbook = WorkbookKind::FinancialModel.build().unwrap();
    let index = workbook.sheet_index("CashFlows").unwrap();
    workbook.remove_worksheet(index).unwrap();

    let dangling = dangling_references(&workbook);
    let cells: Vec<String> = dangling
        .iter()
        .map(|d| format!("{}!{}", d.sheet, d.cell))
        .collect();
    assert!(cells.contains(&"InvestmentAnalysis!B8".to_string()));
    assert!(cells.contains(&"InvestmentAnalysis!B18".to_string()));
    assert!(dangling.iter().all(|d| d.target == "CashFlows"));
}

/// The inventory dashboard reads only CurrentInventory
#[test]
fn test_reports_reference_current_inventory() {
    let workbook = WorkbookKind::InventoryTracking.build().unwrap();
    let reports = workbook.worksheet_by_name("Reports").unwrap();

    for (_, _, formula) in reports.formula_cells() {
        for target in sheet_references(formula) {
            assert_eq!(target, "CurrentInventory", "{}", formula);
        }
    }
}
