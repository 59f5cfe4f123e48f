//! XLSX writer

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::XlsxStyleTable;
use gridsmith_core::{CellAddress, CellValue, Workbook, Worksheet};

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path, creating or truncating it
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        log::debug!("writing {}", path.display());
        let file = BufWriter::new(File::create(path)?);
        Self::write(workbook, file)
    }

    /// Write a workbook to any seekable writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "a workbook needs at least one worksheet".into(),
            ));
        }

        let mut zip = zip::ZipWriter::new(writer);
        let style_table = XlsxStyleTable::build(workbook);

        Self::write_part(&mut zip, "[Content_Types].xml", &content_types_xml(workbook))?;
        Self::write_part(&mut zip, "_rels/.rels", ROOT_RELS_XML)?;
        Self::write_part(&mut zip, "xl/workbook.xml", &workbook_xml(workbook))?;
        Self::write_part(
            &mut zip,
            "xl/_rels/workbook.xml.rels",
            &workbook_rels_xml(workbook),
        )?;
        Self::write_part(&mut zip, "xl/styles.xml", &style_table.to_styles_xml())?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let xml = worksheet_xml(sheet, i, &style_table);
            Self::write_part(&mut zip, &format!("xl/worksheets/sheet{}.xml", i + 1), &xml)?;
        }

        zip.finish()?.flush()?;
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        name: &str,
        content: &str,
    ) -> XlsxResult<()> {
        // Fixed timestamp keeps repeated runs byte-identical
        let options = SimpleFileOptions::default().last_modified_time(zip::DateTime::default());
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
        log::trace!("wrote part {} ({} bytes)", name, content.len());
        Ok(())
    }
}

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

fn content_types_xml(workbook: &Workbook) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    );

    for i in 0..workbook.sheet_count() {
        content.push_str(&format!(
            r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }

    content.push_str("\n</Types>");
    content
}

fn workbook_xml(workbook: &Workbook) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
    );

    for (i, sheet) in workbook.worksheets().enumerate() {
        content.push_str(&format!(
            r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(sheet.name()),
            i + 1,
            i + 1
        ));
    }

    content.push_str(
        r#"
    </sheets>
    <calcPr calcId="191029" fullCalcOnLoad="1"/>
</workbook>"#,
    );
    content
}

fn workbook_rels_xml(workbook: &Workbook) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );

    for i in 0..workbook.sheet_count() {
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }

    content.push_str(&format!(
        r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
        workbook.sheet_count() + 1
    ));
    content
}

fn worksheet_xml(sheet: &Worksheet, index: usize, style_table: &XlsxStyleTable) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    if let Some(range) = sheet.used_range() {
        content.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
    }

    write_cols(&mut content, sheet);

    content.push_str("\n    <sheetData>");
    for row in sheet.row_indices() {
        content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
        for (col, cell) in sheet.iter_row(row) {
            let cell_ref = CellAddress::new(row, col).to_a1_string();
            let xf_id = style_table.xf_id_for(index, cell.style_index);
            let style_attr = if xf_id != 0 {
                format!(" s=\"{}\"", xf_id)
            } else {
                String::new()
            };

            match &cell.value {
                CellValue::Number(n) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    cell_ref, style_attr, n
                )),
                CellValue::String(s) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                    cell_ref,
                    style_attr,
                    escape_xml(s)
                )),
                CellValue::Boolean(b) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                    cell_ref,
                    style_attr,
                    u8::from(*b)
                )),
                CellValue::Formula(text) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><f>{}</f></c>",
                    cell_ref,
                    style_attr,
                    escape_xml(text.strip_prefix('=').unwrap_or(text))
                )),
                // Style-only cell
                CellValue::Empty => {
                    content.push_str(&format!("\n            <c r=\"{}\"{}/>", cell_ref, style_attr))
                }
            }
        }
        content.push_str("\n        </row>");
    }
    content.push_str("\n    </sheetData>");

    let merged_regions = sheet.merged_regions();
    if !merged_regions.is_empty() {
        content.push_str(&format!(
            "\n    <mergeCells count=\"{}\">",
            merged_regions.len()
        ));
        for range in merged_regions {
            content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
        }
        content.push_str("\n    </mergeCells>");
    }

    content.push_str("\n</worksheet>");
    content
}

/// `<cols>` with adjacent columns of equal width collapsed into one span
fn write_cols(content: &mut String, sheet: &Worksheet) {
    let widths = sheet.custom_column_widths();
    if widths.is_empty() {
        return;
    }

    let mut spans: Vec<(u16, u16, f64)> = Vec::new();
    for (&col, &width) in widths {
        match spans.last_mut() {
            Some((_, max, w)) if *max + 1 == col && *w == width => *max = col,
            _ => spans.push((col, col, width)),
        }
    }

    content.push_str("\n    <cols>");
    for (min, max, width) in spans {
        content.push_str(&format!(
            "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
            min + 1,
            max + 1,
            width
        ));
    }
    content.push_str("\n    </cols>");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsmith_core::{CellRange, Style};
    use std::io::Cursor;

    fn sample_sheet() -> Workbook {
        let mut wb = Workbook::empty();
        let idx = wb.add_worksheet_with_name("Alerts").unwrap();
        let ws = wb.worksheet_mut(idx).unwrap();
        ws.set_cell_value("A1", "Alert Type").unwrap();
        ws.set_cell_style("A1", &Style::new().bold(true)).unwrap();
        ws.set_cell_formula("C2", "=IF(B2<>\"\", \"HIGH\", \"\")")
            .unwrap();
        ws.set_cell_value("D2", -100000).unwrap();
        ws.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
        for col in 0..3 {
            ws.set_column_width(col, 15.0).unwrap();
        }
        ws.set_column_width(5, 18.0).unwrap();
        wb
    }

    #[test]
    fn test_worksheet_xml_layout() {
        let wb = sample_sheet();
        let table = XlsxStyleTable::build(&wb);
        let xml = worksheet_xml(wb.worksheet(0).unwrap(), 0, &table);

        assert!(xml.contains(r#"<col min="1" max="3" width="15" customWidth="1"/>"#));
        assert!(xml.contains(r#"<col min="6" max="6" width="18" customWidth="1"/>"#));
        assert!(xml.contains(r#"<c r="A1" s="1" t="inlineStr"><is><t xml:space="preserve">Alert Type</t></is></c>"#));
        assert!(xml.contains(
            "<c r=\"C2\"><f>IF(B2&lt;&gt;&quot;&quot;, &quot;HIGH&quot;, &quot;&quot;)</f></c>"
        ));
        assert!(xml.contains(r#"<c r="D2"><v>-100000</v></c>"#));
        assert!(xml.contains(r#"<mergeCell ref="A1:B1"/>"#));

        // cols precede sheetData, mergeCells follow it
        let cols = xml.find("<cols>").unwrap();
        let data = xml.find("<sheetData>").unwrap();
        let merges = xml.find("<mergeCells").unwrap();
        assert!(cols < data && data < merges);
    }

    #[test]
    fn test_sheet_names_are_escaped() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("P&L").unwrap();
        assert!(workbook_xml(&wb).contains(r#"name="P&amp;L""#));
    }

    #[test]
    fn test_output_is_reproducible() {
        let wb = sample_sheet();

        let mut first = Cursor::new(Vec::new());
        XlsxWriter::write(&wb, &mut first).unwrap();
        let mut second = Cursor::new(Vec::new());
        XlsxWriter::write(&wb, &mut second).unwrap();

        assert!(!first.get_ref().is_empty());
        assert_eq!(first.into_inner(), second.into_inner());
    }

    #[test]
    fn test_empty_workbook_is_rejected() {
        let wb = Workbook::empty();
        let result = XlsxWriter::write(&wb, Cursor::new(Vec::new()));
        assert!(matches!(result, Err(XlsxError::InvalidFormat(_))));
    }
}
