//! Property tests for the sheet builder

use gridsmith::prelude::*;
use proptest::prelude::*;

fn cell_input() -> impl Strategy<Value = CellInput> {
    prop_oneof![
        Just(CellInput::Empty),
        (-1.0e6f64..1.0e6).prop_map(CellInput::Number),
        "[A-Za-z ]{0,12}".prop_map(CellInput::Text),
        "[A-Z]{1,3}[1-9][0-9]{0,2}".prop_map(|r| CellInput::formula(format!("={}*2", r))),
    ]
}

fn descriptor() -> impl Strategy<Value = RowDescriptor> {
    prop_oneof![
        Just(RowDescriptor::Blank),
        "[A-Za-z]{1,12}".prop_map(|label| RowDescriptor::section(label, 1)),
        prop::collection::vec("[A-Za-z]{1,10}", 1..8).prop_map(RowDescriptor::Header),
        ("[A-Za-z]{1,12}", "[A-Z][1-9]").prop_map(|(label, cell)| {
            RowDescriptor::label_formula(label, CellInput::formula(format!("={}", cell)))
        }),
        prop::collection::vec(cell_input(), 0..6).prop_map(RowDescriptor::Data),
    ]
}

proptest! {
    /// N descriptors written from row R occupy rows R..R+N-1 and return R+N
    #[test]
    fn block_occupies_exactly_its_rows(
        rows in prop::collection::vec(descriptor(), 0..30),
        start in 1u32..500,
    ) {
        let mut sheet = Worksheet::new("Block");
        let next = populate(&mut sheet, &rows, start, &SheetStyle::analysis()).unwrap();

        prop_assert_eq!(next, start + rows.len() as u32);
        for row in sheet.row_indices() {
            prop_assert!(row + 1 >= start && row + 1 < next);
        }
    }

    /// Header rows write one filled, bold cell per label
    #[test]
    fn header_cells_styled(labels in prop::collection::vec("[A-Za-z]{1,10}", 1..12)) {
        let mut sheet = Worksheet::new("Headers");
        let style = SheetStyle::inventory();
        populate(&mut sheet, &[RowDescriptor::Header(labels.clone())], 1, &style).unwrap();

        prop_assert_eq!(sheet.iter_row(0).count(), labels.len());
        for (col, _) in labels.iter().enumerate() {
            let cell_style = sheet.cell_style_at(0, col as u16).unwrap();
            prop_assert!(cell_style.font.bold);
            prop_assert!(!cell_style.fill.is_none());
        }
    }

    /// Labelled formula rows always fill column 2
    #[test]
    fn label_rows_fill_value_column(label in "[A-Za-z]{1,12}", row in 1u32..200) {
        let mut sheet = Worksheet::new("Labels");
        let rows = [RowDescriptor::label_formula(label, "=SUM(RawData!A2:A101)")];
        populate(&mut sheet, &rows, row, &SheetStyle::financial()).unwrap();

        prop_assert!(!sheet.get_value_at(row - 1, 1).is_empty());
    }

    /// Section merges cover exactly the declared span
    #[test]
    fn section_merge_matches_span(span in 2u16..12, row in 1u32..100) {
        let mut sheet = Worksheet::new("Sections");
        let rows = [RowDescriptor::section("Sensitivity Analysis", span)];
        populate(&mut sheet, &rows, row, &SheetStyle::financial()).unwrap();

        let merged = sheet.merged_regions();
        prop_assert_eq!(merged.len(), 1);
        prop_assert_eq!(merged[0].col_count(), span);
        prop_assert_eq!(merged[0].start.row, row - 1);
    }
}
