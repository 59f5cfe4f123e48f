//! `financial-model.xlsx`: loan and investment analysis

use gridsmith_core::Workbook;

use super::{new_workbook, sheet_mut};
use crate::builder::populate;
use crate::data_row;
use crate::error::Result;
use crate::schema::{CellInput, RowDescriptor};
use crate::style::SheetStyle;

pub const SHEETS: [&str; 4] = [
    "LoanParameters",
    "CashFlows",
    "LoanCalculations",
    "InvestmentAnalysis",
];

/// Discount rates of the sensitivity table, with the text used in its formulas
const SENSITIVITY_RATES: [(f64, &str); 4] =
    [(0.05, "0.05"), (0.10, "0.10"), (0.15, "0.15"), (0.20, "0.20")];

pub fn build() -> Result<Workbook> {
    let mut workbook = new_workbook(&SHEETS)?;
    let style = SheetStyle::financial();

    populate(
        sheet_mut(&mut workbook, "LoanParameters")?,
        &loan_parameters(),
        1,
        &style.clone().with_labelled_rows(),
    )?;
    populate(sheet_mut(&mut workbook, "CashFlows")?, &cash_flows(), 1, &style)?;
    populate(
        sheet_mut(&mut workbook, "LoanCalculations")?,
        &loan_calculations(),
        1,
        &style,
    )?;

    let investment = sheet_mut(&mut workbook, "InvestmentAnalysis")?;
    populate(
        investment,
        &investment_growth(),
        1,
        &style.clone().with_labelled_rows(),
    )?;
    populate(investment, &sensitivity_analysis(), 13, &style)?;

    Ok(workbook)
}

fn loan_parameters() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Loan Parameters", 2),
        data_row!["Annual Interest Rate", 0.05, "5% annual rate"],
        data_row!["Loan Term (Years)", 30, "30-year mortgage"],
        data_row!["Loan Principal", 500000, "$500,000 loan"],
        RowDescriptor::Blank,
        RowDescriptor::section("Investment Parameters", 3),
        data_row!["Investment Annual Rate", 0.08, "8% annual return"],
        data_row!["Investment Period (Years)", 20, "20-year investment"],
        data_row!["Monthly Contribution", 1000, "$1,000/month"],
        data_row!["Initial Investment", 10000, "$10,000 initial"],
        RowDescriptor::Blank,
        RowDescriptor::section("NPV/IRR Parameters", 3),
        data_row!["Discount Rate", 0.10, "10% discount rate"],
        data_row!["Number of Periods", 10, "10 periods"],
        data_row!["Payment Amount", 5000, "$5,000 payment"],
        data_row!["Present Value", 40000, "$40,000 PV"],
        data_row!["Future Value", 0, "$0 FV"],
    ]
}

/// Period 0 is the investment; periods 1-10 grow by 5,000
fn cash_flows() -> Vec<RowDescriptor> {
    let mut rows = vec![
        RowDescriptor::header(["Period", "Cash Flow (NPV)", "Cash Flow (IRR)"]),
        data_row![0, 0, -100000],
    ];
    rows.extend((1..=10).map(|period: i32| {
        let flow = 15000 + 5000 * (period - 1);
        data_row![period, flow, flow]
    }));
    rows
}

fn loan_calculations() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Loan Analysis", 2),
        RowDescriptor::label_formula(
            "Monthly Payment",
            "=PMT(LoanParameters!B2/12, LoanParameters!B3*12, -LoanParameters!B4)",
        ),
        RowDescriptor::label_formula("Total Amount Paid", "=B2*LoanParameters!B3*12"),
        RowDescriptor::label_formula("Total Interest Paid", "=B3-LoanParameters!B4"),
        RowDescriptor::label_formula(
            "Effective Annual Rate",
            "=RATE(LoanParameters!B14, -LoanParameters!B15, LoanParameters!B16, -LoanParameters!B17)*12",
        ),
        RowDescriptor::Blank,
        RowDescriptor::section("Amortization Schedule", 4),
        RowDescriptor::header(["Month", "Principal", "Interest", "Balance"]),
        data_row![
            1,
            "=B2-C9",
            "=LoanParameters!B4*LoanParameters!B2/12",
            "=LoanParameters!B4-B9"
        ],
        data_row![2, "=B2-C10", "=D9*LoanParameters!B2/12", "=D9-B10"],
    ]
}

fn investment_growth() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Investment Growth", 2),
        RowDescriptor::label_formula(
            "Future Value (Lump Sum)",
            "=FV(LoanParameters!B7, LoanParameters!B8, 0, -LoanParameters!B10)",
        ),
        RowDescriptor::label_formula(
            "Future Value (With Contributions)",
            "=FV(LoanParameters!B7/12, LoanParameters!B8*12, -LoanParameters!B9, -LoanParameters!B10)",
        ),
        RowDescriptor::label_formula(
            "Present Value Needed",
            "=PV(LoanParameters!B7, LoanParameters!B8, 0, -1000000)",
        ),
        RowDescriptor::label_formula(
            "Monthly Contribution Needed",
            "=PMT(LoanParameters!B7/12, LoanParameters!B8*12, -LoanParameters!B10, 1000000)",
        ),
        RowDescriptor::Blank,
        data_row!["Project Analysis"],
        RowDescriptor::label_formula(
            "Net Present Value",
            "=NPV(LoanParameters!B13, CashFlows!B3:B12)",
        ),
        RowDescriptor::label_formula("Internal Rate of Return", "=IRR(CashFlows!C2:C12)"),
        RowDescriptor::label_formula("Profitability Index", "=1 + B8/ABS(CashFlows!C2)"),
    ]
}

/// Placed at row 13; the decision formulas point at rows 15-18
fn sensitivity_analysis() -> Vec<RowDescriptor> {
    let mut rows = vec![
        RowDescriptor::section("Sensitivity Analysis", 3),
        RowDescriptor::header(["Discount Rate", "NPV", "Decision"]),
    ];
    rows.extend(SENSITIVITY_RATES.iter().zip(15..).map(|(&(rate, text), row)| {
        RowDescriptor::Data(vec![
            CellInput::Number(rate),
            CellInput::formula(format!("=NPV({}, CashFlows!B3:B12)", text)),
            CellInput::formula(format!("=IF(B{}>0, \"Accept\", \"Reject\")", row)),
        ])
    }));
    rows
}
