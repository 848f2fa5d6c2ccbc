//! Excel exporter: checklist categories → styled workbook

use super::style::CellStyle;
use crate::download::Download;
use crate::error::{GuideError, GuideResult};
use crate::types::{
    Category, ChecklistItem, ColorTheme, ColumnKind, ColumnShape, CompletionState, Page,
    CHECKMARK,
};
use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use tracing::debug;

/// Longest sheet name Excel accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// One sheet, fully laid out and styled, ready to serialize
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub name: String,
    pub theme: ColorTheme,
    pub shape: ColumnShape,
    /// Row 0 is the header
    pub rows: Vec<Vec<String>>,
}

impl ExportSheet {
    pub fn column_widths(&self) -> Vec<f64> {
        self.shape.columns().iter().map(|c| c.width).collect()
    }

    pub fn style(&self, row: u32, col: u16) -> Option<CellStyle> {
        let column = self.shape.columns().get(col as usize)?;
        if row as usize >= self.rows.len() {
            return None;
        }
        Some(CellStyle::for_cell(self.theme, row, column))
    }
}

/// Ordered sheets of one workbook
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub filename: String,
    pub sheets: Vec<ExportSheet>,
}

impl ExportDocument {
    pub fn sheet(&self, name: &str) -> Option<&ExportSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Excel exporter for checklist pages
///
/// The exporter only borrows its inputs; every call builds a fresh document.
pub struct ExcelExporter<'a> {
    page: &'a Page,
    state: &'a CompletionState,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(page: &'a Page, state: &'a CompletionState) -> Self {
        Self { page, state }
    }

    /// Lay out every category as a sheet, in declared order
    pub fn build_document(&self) -> ExportDocument {
        let sheets = sheet_names(self.page)
            .into_iter()
            .zip(&self.page.categories)
            .map(|(name, category)| self.build_sheet(name, category))
            .collect();

        ExportDocument {
            filename: self.page.filename.clone(),
            sheets,
        }
    }

    fn build_sheet(&self, name: String, category: &Category) -> ExportSheet {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(category.items.len() + 1);
        rows.push(
            category
                .shape
                .header()
                .into_iter()
                .map(String::from)
                .collect(),
        );
        for item in &category.items {
            rows.push(self.build_row(category.shape, item));
        }

        debug!(
            sheet = %name,
            theme = category.theme.name(),
            rows = rows.len(),
            "built sheet"
        );

        ExportSheet {
            name,
            theme: category.theme,
            shape: category.shape,
            rows,
        }
    }

    fn build_row(&self, shape: ColumnShape, item: &ChecklistItem) -> Vec<String> {
        shape
            .columns()
            .iter()
            .map(|column| match column.kind {
                ColumnKind::Title => item.title.clone(),
                ColumnKind::Description => item.description.clone(),
                ColumnKind::Date => item.date.clone().unwrap_or_default(),
                ColumnKind::Completed => {
                    if self.state.is_completed(&item.id) {
                        CHECKMARK.to_string()
                    } else {
                        String::new()
                    }
                }
            })
            .collect()
    }

    /// Build and serialize the page into an in-memory workbook
    pub fn export(&self) -> GuideResult<Download> {
        let document = self.build_document();
        let bytes = Self::serialize(&document)?;
        Ok(Download::xlsx(document.filename, bytes))
    }

    /// Serialize a laid-out document to xlsx bytes
    pub fn serialize(document: &ExportDocument) -> GuideResult<Vec<u8>> {
        let mut workbook = Workbook::new();

        for sheet in &document.sheets {
            Self::write_sheet(&mut workbook, sheet)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| GuideError::Export(format!("Failed to serialize workbook: {}", e)))
    }

    fn write_sheet(workbook: &mut Workbook, sheet: &ExportSheet) -> GuideResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| sheet_error(&sheet.name, "set worksheet name", e))?;

        for (col, width) in sheet.column_widths().into_iter().enumerate() {
            worksheet
                .set_column_width(col as u16, width)
                .map_err(|e| sheet_error(&sheet.name, "set column width", e))?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_idx = row_idx as u32;
            for (col_idx, value) in row.iter().enumerate() {
                let col_idx = col_idx as u16;
                let format = sheet
                    .style(row_idx, col_idx)
                    .map(|style| style.to_format())
                    .ok_or_else(|| {
                        GuideError::Export(format!(
                            "Cell ({}, {}) is outside sheet '{}'",
                            row_idx, col_idx, sheet.name
                        ))
                    })?;
                worksheet
                    .write_string_with_format(row_idx, col_idx, value, &format)
                    .map_err(|e| sheet_error(&sheet.name, "write cell", e))?;
            }
        }

        Ok(())
    }
}

fn sheet_error(sheet: &str, action: &str, err: rust_xlsxwriter::XlsxError) -> GuideError {
    GuideError::Export(format!("Failed to {} on sheet '{}': {}", action, sheet, err))
}

/// Make a category name acceptable as an Excel sheet name
///
/// Forbidden characters become `-`, surrounding apostrophes and whitespace are
/// trimmed and the result is cut to 31 characters. An empty result falls back
/// to `Sheet{n}` using the 1-based position.
pub fn sanitize_sheet_name(name: &str, index: usize) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) || c.is_control() {
                '-'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim().trim_matches('\'').trim();
    let truncated: String = trimmed.chars().take(MAX_SHEET_NAME_LEN).collect();
    let truncated = truncated.trim_end().trim_end_matches('\'').to_string();

    if truncated.is_empty() {
        format!("Sheet{}", index + 1)
    } else {
        truncated
    }
}

/// Sheet name of every category of `page`, in order, as written to the workbook
pub fn sheet_names(page: &Page) -> Vec<String> {
    let mut used = HashSet::new();
    page.categories
        .iter()
        .enumerate()
        .map(|(idx, category)| unique_sheet_name(&category.name, idx, &mut used))
        .collect()
}

/// Sanitize and de-duplicate (case-insensitively) against names already used
fn unique_sheet_name(name: &str, index: usize, used: &mut HashSet<String>) -> String {
    let base = sanitize_sheet_name(name, index);
    let mut candidate = base.clone();
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({})", n);
        let room = MAX_SHEET_NAME_LEN - suffix.chars().count();
        let stem: String = base.chars().take(room).collect();
        candidate = format!("{}{}", stem.trim_end(), suffix);
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}
