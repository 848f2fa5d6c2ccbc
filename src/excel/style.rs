//! Deterministic cell styling
//!
//! A cell's style depends only on its row index, its column and the sheet
//! theme. Row 0 is the header; data rows alternate between the theme's
//! alternate-row color (odd rows) and white (even rows).

use crate::types::{ColorTheme, ColumnKind, ColumnSpec};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

pub const WHITE: u32 = 0xFFFFFF;
pub const HEADER_BORDER: u32 = 0x000000;
pub const DATA_BORDER: u32 = 0xD3D3D3;

/// Horizontal alignment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
}

/// Style annotation for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fill: u32,
    pub bold: bool,
    pub font_color: Option<u32>,
    pub border_color: u32,
    pub align: HAlign,
    pub wrap: bool,
}

impl CellStyle {
    /// Header cell: theme color, bold white text, centered
    pub fn header(theme: ColorTheme) -> Self {
        Self {
            fill: theme.colors().header,
            bold: true,
            font_color: Some(WHITE),
            border_color: HEADER_BORDER,
            align: HAlign::Center,
            wrap: false,
        }
    }

    /// Data cell at `row` (1-based, header excluded) in `column`
    pub fn data(theme: ColorTheme, row: u32, column: &ColumnSpec) -> Self {
        let fill = if row % 2 == 1 {
            theme.colors().alternate_row
        } else {
            WHITE
        };

        let (align, wrap) = match column.kind {
            ColumnKind::Completed => (HAlign::Center, false),
            _ => (HAlign::Left, true),
        };

        Self {
            fill,
            bold: column.kind == ColumnKind::Date,
            font_color: None,
            border_color: DATA_BORDER,
            align,
            wrap,
        }
    }

    /// Style for any cell of a sheet, header included
    pub fn for_cell(theme: ColorTheme, row: u32, column: &ColumnSpec) -> Self {
        if row == 0 {
            Self::header(theme)
        } else {
            Self::data(theme, row, column)
        }
    }

    /// Translate into an xlsx cell format
    pub fn to_format(&self) -> Format {
        let mut format = Format::new()
            .set_background_color(self.fill)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin)
            .set_border_color(self.border_color)
            .set_align(FormatAlign::VerticalCenter);

        format = match self.align {
            HAlign::Left => format.set_align(FormatAlign::Left),
            HAlign::Center => format.set_align(FormatAlign::Center),
        };

        if self.bold {
            format = format.set_bold();
        }
        if let Some(color) = self.font_color {
            format = format.set_font_color(Color::RGB(color));
        }
        if self.wrap {
            format = format.set_text_wrap();
        }
        format
    }
}
