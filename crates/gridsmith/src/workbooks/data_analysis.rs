//! `data-analysis.xlsx`: descriptive statistics over seeded sales data

use gridsmith_core::Workbook;

use super::{new_workbook, sheet_mut};
use crate::builder::populate;
use crate::data_row;
use crate::error::Result;
use crate::sample::{sales_records, PyRandom, SalesRecord, REGIONS, SAMPLE_SEED};
use crate::schema::{CellInput, RowDescriptor};
use crate::style::SheetStyle;

pub const SHEETS: [&str; 4] = ["RawData", "Parameters", "Analysis", "Summary"];

pub fn build() -> Result<Workbook> {
    let records = sales_records(&mut PyRandom::new(SAMPLE_SEED));
    let mut workbook = new_workbook(&SHEETS)?;
    let style = SheetStyle::analysis();

    populate(sheet_mut(&mut workbook, "RawData")?, &raw_data(&records), 1, &style)?;
    populate(
        sheet_mut(&mut workbook, "Parameters")?,
        &parameters(),
        1,
        &style.clone().with_labelled_rows(),
    )?;

    let analysis = sheet_mut(&mut workbook, "Analysis")?;
    populate(analysis, &statistics(), 1, &style)?;
    populate(analysis, &regional_analysis(), 24, &style)?;

    populate(sheet_mut(&mut workbook, "Summary")?, &summary(), 1, &style)?;

    Ok(workbook)
}

fn raw_data(records: &[SalesRecord]) -> Vec<RowDescriptor> {
    let mut rows = vec![RowDescriptor::header([
        "Sales Amount",
        "Region",
        "Product",
        "Date",
        "Customer ID",
    ])];
    rows.extend(records.iter().map(|record| {
        RowDescriptor::Data(vec![
            CellInput::from(record.amount),
            CellInput::text(record.region),
            CellInput::text(record.product),
            CellInput::text(record.date.as_str()),
            CellInput::text(record.customer_id.as_str()),
        ])
    }));
    rows
}

fn parameters() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Analysis Parameters", 2),
        data_row!["Confidence Level", 0.95, "95% confidence"],
        data_row!["Significance Threshold", 0.05, "5% significance"],
        data_row!["Moving Average Window", 7, "7-day window"],
        data_row!["Outlier Threshold (σ)", 3, "3 standard deviations"],
        data_row!["Minimum Sample Size", 30, "Min 30 samples"],
        data_row!["Top N Items", 10, "Top 10 analysis"],
        data_row!["Sales Target", 2500, "$2,500 target"],
    ]
}

/// Basic statistics (rows 1-10) and percentiles (rows 12-17)
fn statistics() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Basic Statistics", 2),
        RowDescriptor::label_formula("Mean Sales", "=AVERAGE(RawData!A2:A101)"),
        RowDescriptor::label_formula("Median Sales", "=MEDIAN(RawData!A2:A101)"),
        RowDescriptor::label_formula("Standard Deviation", "=STDEV(RawData!A2:A101)"),
        RowDescriptor::label_formula("Variance", "=VAR(RawData!A2:A101)"),
        RowDescriptor::label_formula("Min Sales", "=MIN(RawData!A2:A101)"),
        RowDescriptor::label_formula("Max Sales", "=MAX(RawData!A2:A101)"),
        RowDescriptor::label_formula("Range", "=B7-B6"),
        RowDescriptor::label_formula("Count", "=COUNT(RawData!A2:A101)"),
        RowDescriptor::label_formula(
            "Count Above Target",
            "=COUNTIF(RawData!A2:A101, \">\"&Parameters!B8)",
        ),
        RowDescriptor::Blank,
        RowDescriptor::section("Percentile Analysis", 2),
        RowDescriptor::label_formula("25th Percentile", "=PERCENTILE(RawData!A2:A101, 0.25)"),
        RowDescriptor::label_formula("50th Percentile", "=PERCENTILE(RawData!A2:A101, 0.50)"),
        RowDescriptor::label_formula("75th Percentile", "=PERCENTILE(RawData!A2:A101, 0.75)"),
        RowDescriptor::label_formula("90th Percentile", "=PERCENTILE(RawData!A2:A101, 0.90)"),
        RowDescriptor::label_formula("Interquartile Range", "=B15-B13"),
    ]
}

/// Placed at row 24; the summary sheet looks up rows 26-29
fn regional_analysis() -> Vec<RowDescriptor> {
    let mut rows = vec![
        RowDescriptor::section("Regional Analysis", 4),
        RowDescriptor::header(["Region", "Count", "Average", "Total"]),
    ];
    rows.extend(REGIONS.iter().map(|region| {
        RowDescriptor::Data(vec![
            CellInput::text(*region),
            CellInput::formula(format!("=COUNTIF(RawData!B2:B101, \"{}\")", region)),
            CellInput::formula(format!(
                "=AVERAGEIF(RawData!B2:B101, \"{}\", RawData!A2:A101)",
                region
            )),
            CellInput::formula(format!(
                "=SUMIF(RawData!B2:B101, \"{}\", RawData!A2:A101)",
                region
            )),
        ])
    }));
    rows
}

fn summary() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Executive Summary", 2),
        RowDescriptor::label_formula("Total Sales", "=SUM(RawData!A2:A101)"),
        RowDescriptor::label_formula("Average Daily Sales", "=Analysis!B2"),
        RowDescriptor::label_formula(
            "Best Performing Region",
            "=INDEX(Analysis!A26:A29, MATCH(MAX(Analysis!D26:D29), Analysis!D26:D29, 0))",
        ),
        RowDescriptor::label_formula("Sales Above Target (%)", "=Analysis!B10/Analysis!B9*100"),
        RowDescriptor::Blank,
        RowDescriptor::section("Data Quality Report", 1),
        RowDescriptor::label_formula("Total Records", "=Analysis!B9"),
        RowDescriptor::label_formula(
            "Data Completeness (%)",
            "=COUNTA(RawData!A2:A101)/100*100",
        ),
        RowDescriptor::Blank,
        RowDescriptor::section("Statistical Tests", 1),
        RowDescriptor::label_formula(
            "Sample Size Adequate",
            "=IF(Analysis!B9>=Parameters!B6, \"Yes\", \"No\")",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsmith_core::CellValue;

    #[test]
    fn test_raw_data_rows() {
        let workbook = build().unwrap();
        let sheet = workbook.worksheet_by_name("RawData").unwrap();

        assert_eq!(sheet.used_range().unwrap().to_string(), "A1:E101");
        assert_eq!(sheet.get_value("A2").unwrap(), CellValue::Number(3419.0));
        assert_eq!(sheet.get_value("B2").unwrap(), CellValue::string("North"));
        assert_eq!(sheet.get_value("D101").unwrap(), CellValue::string("04/09/2024"));
        assert_eq!(sheet.get_value("E101").unwrap(), CellValue::string("C100"));
    }

    #[test]
    fn test_regional_block_position() {
        let workbook = build().unwrap();
        let sheet = workbook.worksheet_by_name("Analysis").unwrap();

        assert_eq!(sheet.get_value("A26").unwrap(), CellValue::string("North"));
        assert_eq!(sheet.get_value("A29").unwrap(), CellValue::string("West"));
        assert_eq!(
            sheet.get_value("D27").unwrap().formula_text(),
            Some("=SUMIF(RawData!B2:B101, \"South\", RawData!A2:A101)")
        );
        assert!(sheet.row_indices().all(|row| !(17..23).contains(&row)));
    }

    #[test]
    fn test_summary_sections_unmerged() {
        let workbook = build().unwrap();
        let sheet = workbook.worksheet_by_name("Summary").unwrap();

        assert_eq!(sheet.merged_regions().len(), 1);
        let section = sheet.cell_style("A7").unwrap().unwrap();
        assert_eq!(section.font.size, 12.0);
        assert_eq!(
            sheet.get_value("B12").unwrap().formula_text(),
            Some("=IF(Analysis!B9>=Parameters!B6, \"Yes\", \"No\")")
        );
    }
}
