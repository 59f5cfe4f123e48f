//! XLSX reader
//!
//! Loads what the writer produces (and what common spreadsheet applications
//! save): sheet order and names, cell values and formula text, cell styles,
//! merged regions and custom column widths. Cached formula results are
//! dropped; only the formula text is kept.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::read_styles_xml;
use gridsmith_core::style::Style;
use gridsmith_core::{CellAddress, CellRange, CellValue, Workbook, Worksheet};

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let cell_styles = match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file)?,
            Err(_) => vec![Style::default()],
        };
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();
        for (name, r_id) in &sheet_info {
            let path = sheet_paths
                .get(r_id)
                .ok_or_else(|| XlsxError::MissingPart(format!("relationship {}", r_id)))?;
            let index = workbook.add_worksheet_with_name(name)?;
            let worksheet = workbook
                .worksheet_mut(index)
                .ok_or_else(|| XlsxError::InvalidFormat(format!("sheet {} vanished", name)))?;
            Self::read_worksheet(&mut archive, path, worksheet, &shared_strings, &cell_styles)?;
            log::debug!("read sheet {} ({} cells)", name, worksheet.cell_count());
        }

        Ok(workbook)
    }

    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"si" => current.clear(),
                    b"t" => in_t = true,
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    b"si" => strings.push(std::mem::take(&mut current)),
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Text(e) if in_t => current.push_str(&e.unescape()?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Sheet names and relationship ids, in workbook order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);
        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) = (attr(&e, b"name"), attr(&e, b"r:id")) {
                        sheets.push((name, r_id));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Worksheet relationship id -> part path inside the archive
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);
        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                    let id = attr(&e, b"Id");
                    let target = attr(&e, b"Target");
                    let rel_type = attr(&e, b"Type").unwrap_or_default();
                    if let (Some(id), Some(target)) = (id, target) {
                        if rel_type.ends_with("/worksheet") {
                            // Targets are relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        cell_styles: &[Style],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();

        let mut cell: Option<PendingCell> = None;
        let mut text_target: Option<TextTarget> = None;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"c" => cell = Some(PendingCell::from_element(&e)),
                    b"v" if cell.is_some() => text_target = Some(TextTarget::Value),
                    b"f" if cell.is_some() => text_target = Some(TextTarget::Formula),
                    b"t" if cell.is_some() => text_target = Some(TextTarget::InlineText),
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            pending.apply(worksheet, shared_strings, cell_styles)?;
                        }
                    }
                    b"v" | b"f" | b"t" => text_target = None,
                    _ => {}
                },
                Event::Text(e) => {
                    if let (Some(target), Some(pending)) = (text_target, cell.as_mut()) {
                        let text = e.unescape()?;
                        match target {
                            TextTarget::Value => pending.value.push_str(&text),
                            TextTarget::Formula => {
                                pending.formula.get_or_insert_with(String::new).push_str(&text)
                            }
                            TextTarget::InlineText => {
                                pending.value.push_str(&text);
                                pending.cell_type = Some("inlineStr".into());
                            }
                        }
                    }
                }
                Event::Empty(e) => match e.name().as_ref() {
                    // Style-only cell
                    b"c" => PendingCell::from_element(&e).apply(
                        worksheet,
                        shared_strings,
                        cell_styles,
                    )?,
                    b"col" => Self::read_col(&e, worksheet)?,
                    b"mergeCell" => {
                        if let Some(reference) = attr(&e, b"ref") {
                            worksheet.merge_cells(&CellRange::parse(&reference)?)?;
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// `<col min max width customWidth>`; min/max are 1-based
    fn read_col(e: &BytesStart<'_>, worksheet: &mut Worksheet) -> XlsxResult<()> {
        let custom = attr(e, b"customWidth").map_or(false, |v| v == "1" || v == "true");
        let min = attr(e, b"min").and_then(|v| v.parse::<u16>().ok());
        let max = attr(e, b"max").and_then(|v| v.parse::<u16>().ok());
        let width = attr(e, b"width").and_then(|v| v.parse::<f64>().ok());

        if let (true, Some(min), Some(max), Some(width)) = (custom, min, max, width) {
            for col in min.max(1)..=max {
                worksheet.set_column_width(col - 1, width)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum TextTarget {
    Value,
    Formula,
    InlineText,
}

/// A `<c>` element collected until its end tag
#[derive(Debug, Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    style: Option<u32>,
    value: String,
    formula: Option<String>,
}

impl PendingCell {
    fn from_element(e: &BytesStart<'_>) -> Self {
        Self {
            reference: attr(e, b"r"),
            cell_type: attr(e, b"t"),
            style: attr(e, b"s").and_then(|v| v.parse().ok()),
            ..Self::default()
        }
    }

    fn apply(
        self,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        cell_styles: &[Style],
    ) -> XlsxResult<()> {
        let reference = self
            .reference
            .ok_or_else(|| XlsxError::Parse("cell without a reference".into()))?;
        let addr = CellAddress::parse(&reference)?;

        let value = if let Some(formula) = self.formula {
            CellValue::formula(formula)
        } else {
            match self.cell_type.as_deref() {
                _ if self.value.is_empty() && self.cell_type.as_deref() != Some("inlineStr") => {
                    CellValue::Empty
                }
                Some("s") => {
                    let idx: usize = self.value.parse().map_err(|_| {
                        XlsxError::Parse(format!("Invalid shared string index: {}", self.value))
                    })?;
                    let s = shared_strings.get(idx).ok_or_else(|| {
                        XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                    })?;
                    CellValue::String(s.clone())
                }
                Some("b") => CellValue::Boolean(self.value == "1" || self.value == "true"),
                Some("inlineStr") | Some("str") | Some("e") => CellValue::String(self.value),
                _ => self
                    .value
                    .parse::<f64>()
                    .map(CellValue::Number)
                    .unwrap_or(CellValue::String(self.value)),
            }
        };

        worksheet.set_cell_value_at(addr.row, addr.col, value)?;
        if let Some(style) = self.style.and_then(|s| cell_styles.get(s as usize)) {
            if !style.is_default() {
                worksheet.set_cell_style_at(addr.row, addr.col, style)?;
            }
        }
        Ok(())
    }
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
}
