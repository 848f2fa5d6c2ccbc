//! Excel importer: exported checklist workbook → completion flags

use super::exporter::sheet_names;
use crate::error::{GuideError, GuideResult};
use crate::types::{Category, ColumnShape, CompletionState, Page, CHECKMARK};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads completion flags back out of a checklist workbook
///
/// Sheets are matched to the page's categories by the names the exporter gives
/// them, rows to items by title (by position when titles repeat). Anything that
/// does not match is skipped.
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn import(&self, page: &Page) -> GuideResult<CompletionState> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            GuideError::Import(format!(
                "Failed to open Excel file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let names = sheet_names(page);
        let mut state = CompletionState::new();
        let mut matched_sheets = 0;

        for sheet_name in workbook.sheet_names().to_vec() {
            let Some(category) = find_category(page, &names, &sheet_name) else {
                warn!(sheet = %sheet_name, "no matching category, skipping sheet");
                continue;
            };
            if category.shape.completed_column().is_none() {
                debug!(sheet = %sheet_name, "category has no completion column");
                continue;
            }

            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                GuideError::Import(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            read_sheet(&sheet_name, &range, category, &mut state)?;
            matched_sheets += 1;
        }

        if matched_sheets == 0 {
            return Err(GuideError::Import(format!(
                "No checklist sheets of page '{}' found in '{}'",
                page.slug,
                self.path.display()
            )));
        }

        Ok(state)
    }
}

/// `names` holds the exported sheet name of each category, in page order
fn find_category<'p>(
    page: &'p Page,
    names: &[String],
    sheet_name: &str,
) -> Option<&'p Category> {
    names
        .iter()
        .position(|name| name.eq_ignore_ascii_case(sheet_name))
        .and_then(|idx| page.categories.get(idx))
}

fn cell_text(range: &Range<Data>, row: usize, col: usize) -> String {
    match range.get((row, col)) {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Apply one sheet's "Completed" column to `state`
fn read_sheet(
    sheet_name: &str,
    range: &Range<Data>,
    category: &Category,
    state: &mut CompletionState,
) -> GuideResult<()> {
    let expected = ColumnShape::Checklist.header();
    let (height, width) = range.get_size();
    let header: Vec<String> = (0..width).map(|col| cell_text(range, 0, col)).collect();
    if header != expected {
        return Err(GuideError::Import(format!(
            "Sheet '{}' header is {:?}, expected {:?}",
            sheet_name, header, expected
        )));
    }

    let flag_col = ColumnShape::Checklist.completed_column().unwrap_or(1);
    let mut claimed = vec![false; category.items.len()];
    for row in 1..height {
        let title = cell_text(range, row, 0);
        let Some(idx) = match_item(category, &claimed, row - 1, &title) else {
            warn!(sheet = %sheet_name, row, title = %title, "unknown task, skipping row");
            continue;
        };
        claimed[idx] = true;
        let completed = cell_text(range, row, flag_col) == CHECKMARK;
        state.set(&category.items[idx].id, completed);
    }
    Ok(())
}

/// Index of the item a row belongs to
///
/// The item exported at the row's position wins; otherwise the first unclaimed
/// item with that title. Each item is claimed at most once.
fn match_item(
    category: &Category,
    claimed: &[bool],
    position: usize,
    title: &str,
) -> Option<usize> {
    let free = |idx: usize| !claimed[idx] && category.items[idx].title == title;
    if position < category.items.len() && free(position) {
        return Some(position);
    }
    (0..category.items.len()).find(|&idx| free(idx))
}
