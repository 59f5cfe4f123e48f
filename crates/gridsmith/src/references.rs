//! Cross-sheet references inside formula strings
//!
//! Formulas are stored verbatim and never parsed during generation. These
//! helpers only scan for `Sheet!` prefixes so tooling can report references
//! to sheets that do not exist.

use std::fmt;

use gridsmith_core::{CellAddress, Workbook};
use once_cell::sync::Lazy;
use regex::Regex;

/// Double-quoted string literal, `""` being an escaped quote
static STRING_LITERAL: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r#""(?:[^"]|"")*""#));

/// `Name!` or `'Quoted Name'!`
static SHEET_PREFIX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?:'((?:[^']|'')+)'|([A-Za-z_][A-Za-z0-9_.]*))!"));

/// Sheet names referenced by `formula`, in order of first appearance
///
/// ```rust
/// use gridsmith::sheet_references;
///
/// let refs = sheet_references("=NPV(LoanParameters!B13, CashFlows!B3:B12)");
/// assert_eq!(refs, vec!["LoanParameters", "CashFlows"]);
/// ```
pub fn sheet_references(formula: &str) -> Vec<String> {
    let (Ok(literal), Ok(prefix)) = (&*STRING_LITERAL, &*SHEET_PREFIX) else {
        return Vec::new();
    };

    let code = literal.replace_all(formula, "\"\"");
    let mut names: Vec<String> = Vec::new();
    for caps in prefix.captures_iter(&code) {
        let name = match (caps.get(1), caps.get(2)) {
            (Some(quoted), _) => quoted.as_str().replace("''", "'"),
            (None, Some(bare)) => bare.as_str().to_string(),
            (None, None) => continue,
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// A formula naming a sheet the workbook does not contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub sheet: String,
    pub cell: String,
    pub target: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{} refers to missing sheet '{}'", self.sheet, self.cell, self.target)
    }
}

/// Every formula reference to a sheet missing from `workbook`
pub fn dangling_references(workbook: &Workbook) -> Vec<DanglingReference> {
    let known: Vec<String> = workbook
        .sheet_names()
        .iter()
        .map(|name| name.to_lowercase())
        .collect();

    let mut dangling = Vec::new();
    for sheet in workbook.worksheets() {
        for (row, col, formula) in sheet.formula_cells() {
            for target in sheet_references(formula) {
                if !known.contains(&target.to_lowercase()) {
                    dangling.push(DanglingReference {
                        sheet: sheet.name().to_string(),
                        cell: CellAddress::new(row, col).to_a1_string(),
                        target,
                    });
                }
            }
        }
    }
    dangling
}
