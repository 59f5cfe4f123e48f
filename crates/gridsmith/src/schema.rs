//! Declarative row schema consumed by [`populate`](crate::populate)
//!
//! A sheet block is a slice of [`RowDescriptor`]s. Each descriptor names its
//! shape explicitly, so a two-cell data row can never be mistaken for a
//! label/formula pair.

use gridsmith_core::CellValue;

/// One cell of input, as authored in a workbook definition
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    /// Nothing is written
    Empty,
    /// Numeric literal
    Number(f64),
    /// Text literal, including preformatted dates
    Text(String),
    /// Formula text including the leading `=`; stored verbatim
    Formula(String),
}

impl CellInput {
    /// Text cell, even when it starts with `=`
    pub fn text<S: Into<String>>(text: S) -> Self {
        CellInput::Text(text.into())
    }

    /// Formula cell
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellInput::Formula(text.into())
    }

    /// True when nothing would be written
    pub fn is_empty(&self) -> bool {
        match self {
            CellInput::Empty => true,
            CellInput::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Convert to a stored cell value, `None` for empty input
    pub fn to_cell_value(&self) -> Option<CellValue> {
        match self {
            CellInput::Empty => None,
            CellInput::Number(n) => Some(CellValue::Number(*n)),
            CellInput::Text(s) if s.is_empty() => None,
            CellInput::Text(s) => Some(CellValue::String(s.clone())),
            CellInput::Formula(f) => Some(CellValue::Formula(f.clone())),
        }
    }
}

impl From<f64> for CellInput {
    fn from(value: f64) -> Self {
        CellInput::Number(value)
    }
}

impl From<i32> for CellInput {
    fn from(value: i32) -> Self {
        CellInput::Number(value as f64)
    }
}

impl From<u32> for CellInput {
    fn from(value: u32) -> Self {
        CellInput::Number(value as f64)
    }
}

/// Strings starting with `=` become formulas, everything else is text
impl From<&str> for CellInput {
    fn from(value: &str) -> Self {
        CellInput::from(value.to_string())
    }
}

impl From<String> for CellInput {
    fn from(value: String) -> Self {
        if value.starts_with('=') {
            CellInput::Formula(value)
        } else {
            CellInput::Text(value)
        }
    }
}

/// One logical row of a sheet block
///
/// Every variant consumes exactly one spreadsheet row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowDescriptor {
    /// Sheet title in column 1, merged across `span` columns
    Title { label: String, span: u16 },
    /// Section label in column 1, merged across `span` columns when `span > 1`
    Section { label: String, span: u16 },
    /// Column headers, one per column
    Header(Vec<String>),
    /// Row label in column 1 and a value or formula in column 2
    LabelFormula { label: String, value: CellInput },
    /// Plain cells written into columns 1..N
    Data(Vec<CellInput>),
    /// Spacer row
    Blank,
}

impl RowDescriptor {
    pub fn title<S: Into<String>>(label: S, span: u16) -> Self {
        RowDescriptor::Title {
            label: label.into(),
            span,
        }
    }

    pub fn section<S: Into<String>>(label: S, span: u16) -> Self {
        RowDescriptor::Section {
            label: label.into(),
            span,
        }
    }

    pub fn header<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RowDescriptor::Header(labels.into_iter().map(Into::into).collect())
    }

    pub fn label_formula<L: Into<String>, V: Into<CellInput>>(label: L, value: V) -> Self {
        RowDescriptor::LabelFormula {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn data<I, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellInput>,
    {
        RowDescriptor::Data(cells.into_iter().map(Into::into).collect())
    }
}

/// Build a [`RowDescriptor::Data`] row from mixed literals
///
/// ```rust
/// use gridsmith::{data_row, CellInput, RowDescriptor};
///
/// let row = data_row![1, "=B2-C9", "=LoanParameters!B4-B9"];
/// assert_eq!(
///     row,
///     RowDescriptor::Data(vec![
///         CellInput::Number(1.0),
///         CellInput::formula("=B2-C9"),
///         CellInput::formula("=LoanParameters!B4-B9"),
///     ])
/// );
/// ```
#[macro_export]
macro_rules! data_row {
    ($($cell:expr),* $(,)?) => {
        $crate::RowDescriptor::Data(vec![$($crate::CellInput::from($cell)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_classification() {
        assert_eq!(
            CellInput::from("=SUM(RawData!A2:A101)"),
            CellInput::Formula("=SUM(RawData!A2:A101)".into())
        );
        assert_eq!(CellInput::from("North"), CellInput::Text("North".into()));
        assert_eq!(CellInput::text("=literal"), CellInput::Text("=literal".into()));
    }

    #[test]
    fn test_empty_inputs_write_nothing() {
        assert!(CellInput::Empty.to_cell_value().is_none());
        assert!(CellInput::from("").to_cell_value().is_none());
        assert_eq!(
            CellInput::from(0).to_cell_value(),
            Some(CellValue::Number(0.0))
        );
    }

    #[test]
    fn test_formula_kept_verbatim() {
        let value = CellInput::formula("=IF(B15>0, \"Accept\", \"Reject\")").to_cell_value();
        assert_eq!(
            value.as_ref().and_then(CellValue::formula_text),
            Some("=IF(B15>0, \"Accept\", \"Reject\")")
        );
    }
}
