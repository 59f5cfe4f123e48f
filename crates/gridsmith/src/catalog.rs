//! The fixed list of generated workbooks

use std::fmt;
use std::str::FromStr;

use gridsmith_core::Workbook;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::workbooks::{data_analysis, financial, inventory};

/// A workbook this crate knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkbookKind {
    FinancialModel,
    DataAnalysis,
    InventoryTracking,
}

impl WorkbookKind {
    /// All workbooks, in generation order
    pub const ALL: [WorkbookKind; 3] = [
        WorkbookKind::FinancialModel,
        WorkbookKind::DataAnalysis,
        WorkbookKind::InventoryTracking,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            WorkbookKind::FinancialModel => "financial-model",
            WorkbookKind::DataAnalysis => "data-analysis",
            WorkbookKind::InventoryTracking => "inventory-tracking",
        }
    }

    /// Output file name, e.g. `financial-model.xlsx`
    pub fn file_name(&self) -> String {
        format!("{}.xlsx", self.slug())
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> &'static [&'static str] {
        match self {
            WorkbookKind::FinancialModel => &financial::SHEETS,
            WorkbookKind::DataAnalysis => &data_analysis::SHEETS,
            WorkbookKind::InventoryTracking => &inventory::SHEETS,
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            WorkbookKind::FinancialModel => "Loan payments, amortization, investment growth, NPV/IRR",
            WorkbookKind::DataAnalysis => "Descriptive statistics over 100 seeded sales records",
            WorkbookKind::InventoryTracking => "Stock levels, reorder points, EOQ and alerts",
        }
    }

    /// Build the workbook in memory
    pub fn build(&self) -> Result<Workbook> {
        match self {
            WorkbookKind::FinancialModel => financial::build(),
            WorkbookKind::DataAnalysis => data_analysis::build(),
            WorkbookKind::InventoryTracking => inventory::build(),
        }
    }

    pub fn catalog_entry(&self) -> CatalogEntry {
        CatalogEntry {
            kind: *self,
            file_name: self.file_name(),
            description: self.description(),
            sheets: self.sheet_names().to_vec(),
        }
    }
}

impl fmt::Display for WorkbookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for WorkbookKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().trim_end_matches(".xlsx");
        WorkbookKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownWorkbook(s.to_string()))
    }
}

/// Serializable summary of one catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub kind: WorkbookKind,
    pub file_name: String,
    pub description: &'static str,
    pub sheets: Vec<&'static str>,
}

/// Every catalog entry, in generation order
pub fn catalog() -> Vec<CatalogEntry> {
    WorkbookKind::ALL.iter().map(WorkbookKind::catalog_entry).collect()
}
