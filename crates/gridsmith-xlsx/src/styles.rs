//! XLSX styles (styles.xml) read/write helpers

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XlsxResult;
use gridsmith_core::style::{Color, FillStyle, FontStyle, Style};
use gridsmith_core::Workbook;

// === Writing ===

/// Workbook-wide cell formats built from every sheet's style pool
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Deduplicated styles; the position is the cellXfs index
    styles: Vec<Style>,
    /// Per worksheet: local style index -> cellXfs index
    sheet_maps: Vec<HashMap<u32, u32>>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles = vec![Style::default()];
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();
        style_to_xf.insert(Style::default(), 0);

        let mut sheet_maps = Vec::with_capacity(workbook.sheet_count());

        for sheet in workbook.worksheets() {
            let mut map = HashMap::new();
            map.insert(0, 0);

            // Walk the pool rather than the cells so the xf order only
            // depends on the order styles were first applied.
            for (local_idx, style) in sheet.style_pool().iter().skip(1) {
                let xf_id = *style_to_xf.entry(style.clone()).or_insert_with(|| {
                    styles.push(style.clone());
                    (styles.len() - 1) as u32
                });
                map.insert(local_idx, xf_id);
            }

            sheet_maps.push(map);
        }

        Self { styles, sheet_maps }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.styles.len()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut fonts = vec![FontStyle::default()];
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        font_ids.insert(FontStyle::default(), 0);

        // The first two fills are reserved: none and gray125
        let mut fills: Vec<FillStyle> = Vec::new();
        let mut fill_ids: HashMap<FillStyle, u32> = HashMap::new();

        let resolved: Vec<ResolvedXfIds> = self
            .styles
            .iter()
            .map(|style| {
                let font_id = *font_ids.entry(style.font.clone()).or_insert_with(|| {
                    fonts.push(style.font.clone());
                    (fonts.len() - 1) as u32
                });
                let fill_id = match style.fill {
                    FillStyle::None => 0,
                    fill => *fill_ids.entry(fill).or_insert_with(|| {
                        fills.push(fill);
                        (fills.len() + 1) as u32
                    }),
                };
                ResolvedXfIds { font_id, fill_id }
            })
            .collect();

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len() + 2));
        xml.push_str("\n    <fill><patternFill patternType=\"none\"/></fill>");
        xml.push_str("\n    <fill><patternFill patternType=\"gray125\"/></fill>");
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(
            r#"
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for ids in &resolved {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(*ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

fn escape_xml_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} indexed=\"64\"/>"),
        other => format!("<{tag} rgb=\"{}\"/>", other.to_argb_hex()),
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml_attr(&font.name)));
    s.push_str("</font>");
    s
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
            write_color("fgColor", color)
        ),
    }
}

fn write_xf(ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.font_id != 0 {
        attrs.push_str(" applyFont=\"1\"");
    }
    if ids.fill_id != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    format!(
        "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"{}\" borderId=\"0\" xfId=\"0\"{}/>",
        ids.font_id, ids.fill_id, attrs
    )
}

// === Reading ===

/// Read the `cellXfs` of styles.xml as resolved styles, indexed by `s`
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<Style>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();

    let mut fonts: Vec<FontStyle> = Vec::new();
    let mut fills: Vec<FillStyle> = Vec::new();
    let mut cell_xfs: Vec<Style> = Vec::new();

    let mut current_font: Option<FontStyle> = None;
    let mut in_fill = false;
    let mut solid = false;
    let mut fill_color = Color::Auto;
    let mut in_cell_xfs = false;

    loop {
        let event = xml_reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"font" => {
                        // <font/> with no children is the application default
                        let font = FontStyle::default();
                        if is_empty {
                            fonts.push(font);
                        } else {
                            current_font = Some(font);
                        }
                    }
                    b"b" => {
                        if let Some(font) = current_font.as_mut() {
                            font.bold = attr(e, b"val").map_or(true, |v| v != "0" && v != "false");
                        }
                    }
                    b"sz" => {
                        if let (Some(font), Some(size)) = (
                            current_font.as_mut(),
                            attr(e, b"val").and_then(|v| v.parse::<f64>().ok()),
                        ) {
                            font.size = size;
                        }
                    }
                    b"name" => {
                        if let (Some(font), Some(name)) = (current_font.as_mut(), attr(e, b"val")) {
                            font.name = name;
                        }
                    }
                    b"color" => {
                        if let Some(font) = current_font.as_mut() {
                            font.color = parse_color(e);
                        }
                    }
                    b"fill" => {
                        in_fill = true;
                        solid = false;
                        fill_color = Color::Auto;
                    }
                    b"patternFill" if in_fill => {
                        solid = attr(e, b"patternType").as_deref() == Some("solid");
                    }
                    b"fgColor" if in_fill => {
                        fill_color = parse_color(e);
                    }
                    b"cellXfs" => {
                        in_cell_xfs = !is_empty;
                    }
                    b"xf" if in_cell_xfs => {
                        let font_id = attr(e, b"fontId").and_then(|v| v.parse::<usize>().ok());
                        let fill_id = attr(e, b"fillId").and_then(|v| v.parse::<usize>().ok());
                        cell_xfs.push(Style {
                            font: font_id
                                .and_then(|i| fonts.get(i).cloned())
                                .unwrap_or_default(),
                            fill: fill_id
                                .and_then(|i| fills.get(i).copied())
                                .unwrap_or_default(),
                        });
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"font" => {
                    if let Some(font) = current_font.take() {
                        fonts.push(font);
                    }
                }
                b"fill" => {
                    fills.push(if solid {
                        FillStyle::Solid { color: fill_color }
                    } else {
                        FillStyle::None
                    });
                    in_fill = false;
                }
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if cell_xfs.is_empty() {
        cell_xfs.push(Style::default());
    }
    Ok(cell_xfs)
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.to_string()))
}

fn parse_color(e: &BytesStart<'_>) -> Color {
    attr(e, b"rgb")
        .and_then(|hex| Color::from_hex(&hex))
        .map(|color| match color {
            // Opaque ARGB reads back as plain RGB
            Color::Argb { a: 0xFF, r, g, b } => Color::Rgb { r, g, b },
            other => other,
        })
        .unwrap_or(Color::Auto)
}
