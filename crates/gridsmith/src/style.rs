//! Named style roles for a sheet block

use gridsmith_core::{Color, FillStyle, FontStyle, Style};

/// Uniform width applied to the first `count` columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnWidths {
    pub count: u16,
    pub width: f64,
}

impl ColumnWidths {
    pub const fn new(count: u16, width: f64) -> Self {
        Self { count, width }
    }
}

/// Style roles used by [`populate`](crate::populate)
///
/// Header, section and label are distinct roles: the header carries a
/// solid fill, the section is a larger bold font without fill, and the
/// label is a bold body font. A `SheetStyle` is never mutated by the
/// builder; variations are new values derived with the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    pub title_font: FontStyle,
    pub header_font: FontStyle,
    pub header_fill: FillStyle,
    pub label_font: FontStyle,
    pub section_font: FontStyle,
    pub column_widths: Option<ColumnWidths>,
    /// Style a non-empty first cell of data rows with `label_font`
    pub label_data_rows: bool,
}

impl SheetStyle {
    /// Body text size
    pub const BODY_SIZE: f64 = 11.0;
    pub const SECTION_SIZE: f64 = 12.0;
    pub const TITLE_SIZE: f64 = 14.0;

    /// Roles shared by all generated workbooks; headers at `header_size`
    pub fn new(header_size: f64) -> Self {
        Self {
            title_font: FontStyle::bold_at(Self::TITLE_SIZE),
            header_font: FontStyle::bold_at(header_size),
            header_fill: FillStyle::solid(Color::LIGHT_GRAY),
            label_font: FontStyle::bold_at(Self::BODY_SIZE),
            section_font: FontStyle::bold_at(Self::SECTION_SIZE),
            column_widths: None,
            label_data_rows: false,
        }
    }

    /// Financial model: larger headers, columns A-D at 20
    pub fn financial() -> Self {
        Self::new(Self::SECTION_SIZE).with_column_widths(ColumnWidths::new(4, 20.0))
    }

    /// Data analysis: columns A-E at 18
    pub fn analysis() -> Self {
        Self::new(Self::BODY_SIZE).with_column_widths(ColumnWidths::new(5, 18.0))
    }

    /// Inventory tracking: columns A-J at 15
    pub fn inventory() -> Self {
        Self::new(Self::BODY_SIZE).with_column_widths(ColumnWidths::new(10, 15.0))
    }

    pub fn with_column_widths(mut self, widths: ColumnWidths) -> Self {
        self.column_widths = Some(widths);
        self
    }

    /// Same roles, with data-row labels styled (parameter tables)
    pub fn with_labelled_rows(mut self) -> Self {
        self.label_data_rows = true;
        self
    }

    pub fn title(&self) -> Style {
        Style::new().with_font(self.title_font.clone())
    }

    pub fn header(&self) -> Style {
        Style::new()
            .with_font(self.header_font.clone())
            .with_fill(self.header_fill)
    }

    pub fn section(&self) -> Style {
        Style::new().with_font(self.section_font.clone())
    }

    pub fn label(&self) -> Style {
        Style::new().with_font(self.label_font.clone())
    }
}
