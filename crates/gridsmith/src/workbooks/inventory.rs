//! `inventory-tracking.xlsx`: stock levels, reorder points and alerts

use gridsmith_core::Workbook;

use super::{new_workbook, sheet_mut};
use crate::builder::populate;
use crate::data_row;
use crate::error::Result;
use crate::sample::{
    sales_records, stock_transactions, PyRandom, StockTransaction, SAMPLE_SEED, TRACKED_SKUS,
};
use crate::schema::{CellInput, RowDescriptor};
use crate::style::SheetStyle;

pub const SHEETS: [&str; 6] = [
    "Products",
    "Transactions",
    "Settings",
    "CurrentInventory",
    "Alerts",
    "Reports",
];

/// Status values produced by the `CurrentInventory` status column
pub const STOCK_STATUSES: [&str; 3] = ["CRITICAL", "REORDER", "OK"];

pub fn build() -> Result<Workbook> {
    // Transactions continue the random stream after the sales rows
    let mut rng = PyRandom::new(SAMPLE_SEED);
    sales_records(&mut rng);
    let transactions = stock_transactions(&mut rng);

    let mut workbook = new_workbook(&SHEETS)?;
    let style = SheetStyle::inventory();

    populate(sheet_mut(&mut workbook, "Products")?, &products(), 1, &style)?;
    populate(
        sheet_mut(&mut workbook, "Transactions")?,
        &transaction_rows(&transactions),
        1,
        &style,
    )?;
    populate(
        sheet_mut(&mut workbook, "Settings")?,
        &settings(),
        1,
        &style.clone().with_labelled_rows(),
    )?;
    populate(
        sheet_mut(&mut workbook, "CurrentInventory")?,
        &current_inventory(),
        1,
        &style,
    )?;
    populate(sheet_mut(&mut workbook, "Alerts")?, &alerts(), 1, &style)?;
    populate(sheet_mut(&mut workbook, "Reports")?, &reports(), 1, &style)?;

    Ok(workbook)
}

fn products() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::header([
            "SKU",
            "Product Name",
            "Unit Cost",
            "Lead Time (days)",
            "Safety Stock",
            "Annual Demand",
            "Supplier",
            "Category",
        ]),
        data_row!["SKU001", "Widget Alpha", 25.50, 7, 50, 2400, "Supplier A", "Electronics"],
        data_row!["SKU002", "Widget Beta", 45.00, 14, 30, 1800, "Supplier B", "Electronics"],
        data_row!["SKU003", "Widget Gamma", 12.75, 3, 100, 5000, "Supplier A", "Accessories"],
        data_row!["SKU004", "Widget Delta", 89.99, 21, 20, 600, "Supplier C", "Premium"],
        data_row!["SKU005", "Widget Epsilon", 5.25, 5, 200, 10000, "Supplier B", "Consumables"],
        data_row!["SKU006", "Widget Zeta", 150.00, 30, 10, 200, "Supplier D", "Premium"],
        data_row!["SKU007", "Widget Eta", 35.00, 10, 40, 1500, "Supplier A", "Electronics"],
        data_row!["SKU008", "Widget Theta", 18.50, 7, 75, 3000, "Supplier C", "Accessories"],
        data_row!["SKU009", "Widget Iota", 62.00, 14, 25, 900, "Supplier B", "Electronics"],
        data_row!["SKU010", "Widget Kappa", 8.99, 3, 150, 7500, "Supplier A", "Consumables"],
    ]
}

fn transaction_rows(transactions: &[StockTransaction]) -> Vec<RowDescriptor> {
    let mut rows = vec![RowDescriptor::header([
        "Date",
        "Product SKU",
        "Transaction Type",
        "Quantity",
        "Unit Price",
        "Reference Number",
        "Notes",
    ])];
    rows.extend(transactions.iter().map(|t| {
        RowDescriptor::Data(vec![
            CellInput::text(t.date.as_str()),
            CellInput::text(t.sku),
            CellInput::text(t.kind.as_str()),
            CellInput::from(t.quantity),
            CellInput::Number(t.unit_price),
            CellInput::text(t.reference.as_str()),
            CellInput::text(t.notes),
        ])
    }));
    rows
}

fn settings() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Inventory Settings", 2),
        data_row!["Lead Time Multiplier", 1.5, "Safety factor for lead time"],
        data_row!["Ordering Cost per Order", 50, "Fixed cost per order"],
        data_row!["Holding Cost Rate (annual %)", 0.20, "20% annual holding cost"],
        data_row!["Service Level Target", 0.95, "95% service level"],
        data_row!["Review Period (days)", 7, "Weekly review"],
        data_row!["Min Order Quantity", 10, "Minimum order size"],
        data_row!["Max Order Quantity", 1000, "Maximum order size"],
        data_row!["Critical Stock Level (%)", 0.25, "25% of reorder point"],
        data_row!["Overstock Threshold (days)", 90, "90 days of supply"],
    ]
}

fn current_inventory() -> Vec<RowDescriptor> {
    let mut rows = vec![RowDescriptor::header([
        "SKU",
        "Current Stock",
        "Reorder Point",
        "Status",
        "Stock Value",
        "Days of Supply",
        "Turnover",
        "ABC Class",
        "Risk",
        "EOQ",
    ])];
    rows.extend(
        TRACKED_SKUS
            .iter()
            .zip(2..)
            .map(|(sku, row)| inventory_row(sku, row)),
    );
    rows
}

/// Formulas for one SKU on spreadsheet row `i`
fn inventory_row(sku: &str, i: u32) -> RowDescriptor {
    let outgoing = format!(
        "SUMIFS(Transactions!D:D, Transactions!B:B, A{i}, Transactions!C:C, \"OUT\")",
        i = i
    );
    let incoming = format!(
        "SUMIFS(Transactions!D:D, Transactions!B:B, A{i}, Transactions!C:C, \"IN\")",
        i = i
    );

    RowDescriptor::Data(vec![
        CellInput::text(sku),
        CellInput::formula(format!("={} - {}", incoming, outgoing)),
        CellInput::formula(format!(
            "=VLOOKUP(A{i}, Products!A:E, 4, FALSE) * Settings!B2 * (VLOOKUP(A{i}, Products!A:F, 6, FALSE)/365) + VLOOKUP(A{i}, Products!A:E, 5, FALSE)",
            i = i
        )),
        CellInput::formula(format!(
            "=IF(B{i}<=C{i}*Settings!B9, \"CRITICAL\", IF(B{i}<=C{i}, \"REORDER\", \"OK\"))",
            i = i
        )),
        CellInput::formula(format!(
            "=B{i} * VLOOKUP(A{i}, Products!A:C, 3, FALSE)",
            i = i
        )),
        CellInput::formula(format!(
            "=IF({out}/30>0, B{i}/({out}/30), 999)",
            out = outgoing,
            i = i
        )),
        CellInput::formula(format!(
            "=IF(B{i}>0, {out}/B{i}*365/30, 0)",
            out = outgoing,
            i = i
        )),
        CellInput::formula(format!(
            "=IF(E{i}/SUM(E:E)>0.7, \"A\", IF(E{i}/SUM(E:E)>0.2, \"B\", \"C\"))",
            i = i
        )),
        CellInput::formula(format!(
            "=IF(B{i}<C{i}*0.5, \"HIGH\", IF(B{i}<C{i}, \"MEDIUM\", \"LOW\"))",
            i = i
        )),
        CellInput::formula(format!(
            "=SQRT(2*VLOOKUP(A{i}, Products!A:F, 6, FALSE)*Settings!B3/(VLOOKUP(A{i}, Products!A:C, 3, FALSE)*Settings!B4))",
            i = i
        )),
    ])
}

/// First SKU whose status column equals `status`, blank when none
fn first_sku_with_status(status: &str) -> String {
    format!(
        "=IF(COUNTIF(CurrentInventory!D:D, \"{s}\")>0, INDEX(CurrentInventory!A:A, MATCH(\"{s}\", CurrentInventory!D:D, 0)), \"\")",
        s = status
    )
}

fn alerts() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::header([
            "Alert Type",
            "Product SKU",
            "Message",
            "Priority",
            "Action Required",
            "Date",
        ]),
        RowDescriptor::Data(vec![
            CellInput::text("Stock Level"),
            CellInput::formula(first_sku_with_status("CRITICAL")),
            CellInput::formula(
                "=IF(B2<>\"\", \"Critical stock level - immediate reorder required\", \"\")",
            ),
            CellInput::formula("=IF(B2<>\"\", \"HIGH\", \"\")"),
        ]),
        RowDescriptor::Data(vec![
            CellInput::text("Reorder Point"),
            CellInput::formula(first_sku_with_status("REORDER")),
            CellInput::formula("=IF(B3<>\"\", \"Stock at reorder point - place order\", \"\")"),
            CellInput::formula("=IF(B3<>\"\", \"MEDIUM\", \"\")"),
        ]),
        data_row!["Overstock"],
        data_row!["Slow Moving"],
    ]
}

fn reports() -> Vec<RowDescriptor> {
    vec![
        RowDescriptor::title("Inventory Dashboard", 2),
        RowDescriptor::label_formula("Total Inventory Value", "=SUM(CurrentInventory!E:E)"),
        RowDescriptor::label_formula("Number of SKUs", "=COUNTA(CurrentInventory!A:A)-1"),
        RowDescriptor::label_formula(
            "Items Below Reorder Point",
            "=COUNTIF(CurrentInventory!D:D, \"REORDER\") + COUNTIF(CurrentInventory!D:D, \"CRITICAL\")",
        ),
        RowDescriptor::label_formula("Items Out of Stock", "=COUNTIF(CurrentInventory!B:B, 0)"),
        RowDescriptor::label_formula(
            "Critical Stock Items",
            "=COUNTIF(CurrentInventory!D:D, \"CRITICAL\")",
        ),
        RowDescriptor::Blank,
        RowDescriptor::section("Performance Metrics", 1),
        RowDescriptor::label_formula("Average Turnover Rate", "=AVERAGE(CurrentInventory!G:G)"),
        RowDescriptor::label_formula("Fill Rate (%)", "=(1-B5/B3)*100"),
        RowDescriptor::label_formula(
            "Service Level (%)",
            "=COUNTIF(CurrentInventory!D:D, \"OK\")/B3*100",
        ),
    ]
}
