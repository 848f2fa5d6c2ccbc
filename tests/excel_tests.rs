//! Excel export tests
//!
//! Workbooks are read back with calamine to check content; styling is checked
//! on the laid-out document, which is what the serializer writes.

use aiact_guide::content::{compliance_checklist, implementation_guide};
use aiact_guide::download::DirectorySink;
use aiact_guide::error::GuideError;
use aiact_guide::excel::{style::WHITE, ExcelExporter, ExcelImporter, ExportDocument};
use aiact_guide::types::{
    Category, ChecklistItem, ColorTheme, ColumnShape, CompletionState, Page, CHECKMARK,
};
use calamine::{open_workbook, Data, Reader, Xlsx};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

fn read_rows(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => s.clone(),
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names().to_vec()
}

fn export_to(dir: &Path, page: &Page, state: &CompletionState) -> std::path::PathBuf {
    let download = ExcelExporter::new(page, state).export().unwrap();
    DirectorySink::new(dir).overwrite(true).save(download).unwrap()
}

fn layout(page: &Page, state: &CompletionState) -> ExportDocument {
    ExcelExporter::new(page, state).build_document()
}

// ═══════════════════════════════════════════════════════════════════════════
// ROW COUNT AND SHAPE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_sheet_has_items_plus_header() {
    let state = CompletionState::new();
    for page in [compliance_checklist(), implementation_guide()] {
        let document = layout(&page, &state);
        assert_eq!(document.sheets.len(), page.categories.len());
        for (sheet, category) in document.sheets.iter().zip(&page.categories) {
            assert_eq!(sheet.rows.len(), category.items.len() + 1);
            for row in &sheet.rows {
                assert_eq!(row.len(), category.shape.arity());
            }
        }
    }
}

#[test]
fn test_preparation_scenario_in_file() {
    let dir = TempDir::new().unwrap();
    let path = export_to(dir.path(), &compliance_checklist(), &CompletionState::new());

    let rows = read_rows(&path, "Preparation");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0], vec!["Task", "Completed", "Description"]);
    for row in &rows[1..] {
        assert_eq!(row[1], "");
    }
    assert_eq!(rows[1][0], "Identify AI systems in your organization");
}

#[test]
fn test_sheet_order_in_file() {
    let dir = TempDir::new().unwrap();
    let path = export_to(dir.path(), &implementation_guide(), &CompletionState::new());
    assert_eq!(
        sheet_names(&path),
        vec![
            "High-Risk AI",
            "Limited-Risk AI",
            "Minimal-Risk AI",
            "Implementation Timeline"
        ]
    );
}

#[test]
fn test_guide_column_layouts() {
    let dir = TempDir::new().unwrap();
    let path = export_to(dir.path(), &implementation_guide(), &CompletionState::new());

    let steps = read_rows(&path, "Limited-Risk AI");
    assert_eq!(steps[0], vec!["Step", "Description"]);
    assert_eq!(steps.len(), 6);

    let timeline = read_rows(&path, "Implementation Timeline");
    assert_eq!(timeline[0], vec!["Date", "Milestone", "Description"]);
    assert_eq!(timeline[1][0], "May 2024");
    assert_eq!(timeline[1][1], "Entry into Force");
}

#[test]
fn test_empty_category_exports_header_only_sheet() {
    let page = Page {
        slug: "empty".to_string(),
        title: "Empty".to_string(),
        filename: "Empty.xlsx".to_string(),
        categories: vec![
            Category::new("Nothing Yet", ColorTheme::Amber, ColumnShape::Checklist),
            Category::new("Something", ColorTheme::Green, ColumnShape::Checklist)
                .with_items(vec![ChecklistItem::new("s-1", "One", "First")]),
        ],
    };
    let dir = TempDir::new().unwrap();
    let path = export_to(dir.path(), &page, &CompletionState::new());

    assert_eq!(
        read_rows(&path, "Nothing Yet"),
        vec![vec!["Task", "Completed", "Description"]]
    );
    assert_eq!(read_rows(&path, "Something").len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// STYLING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_row_fill_alternates_per_theme() {
    let state = CompletionState::new();
    let page = compliance_checklist();
    let document = layout(&page, &state);

    for sheet in &document.sheets {
        let colors = sheet.theme.colors();
        for row in 0..sheet.rows.len() as u32 {
            for col in 0..sheet.shape.arity() as u16 {
                let style = sheet.style(row, col).unwrap();
                let expected = match row {
                    0 => colors.header,
                    r if r % 2 == 1 => colors.alternate_row,
                    _ => WHITE,
                };
                assert_eq!(style.fill, expected, "{} ({}, {})", sheet.name, row, col);
            }
        }
    }
}

#[test]
fn test_category_themes_applied() {
    let document = layout(&compliance_checklist(), &CompletionState::new());
    let themes: Vec<ColorTheme> = document.sheets.iter().map(|s| s.theme).collect();
    assert_eq!(
        themes,
        vec![
            ColorTheme::Blue,
            ColorTheme::Amber,
            ColorTheme::Green,
            ColorTheme::Purple
        ]
    );
}

#[test]
fn test_column_widths() {
    let state = CompletionState::new();
    let checklist = layout(&compliance_checklist(), &state);
    assert_eq!(checklist.sheets[0].column_widths(), vec![40.0, 15.0, 60.0]);

    let guide = layout(&implementation_guide(), &state);
    assert_eq!(guide.sheets[0].column_widths(), vec![35.0, 65.0]);
    assert_eq!(guide.sheets[3].column_widths(), vec![15.0, 30.0, 55.0]);
}

#[test]
fn test_unknown_theme_matches_default_styling() {
    let yaml_theme: ColorTheme = serde_yaml::from_str("turquoise").unwrap();
    let make = |theme| Page {
        slug: "p".to_string(),
        title: "P".to_string(),
        filename: "p.xlsx".to_string(),
        categories: vec![Category::new("Tasks", theme, ColumnShape::Checklist)
            .with_items(vec![
                ChecklistItem::new("a", "A", "a"),
                ChecklistItem::new("b", "B", "b"),
            ])],
    };
    let state = CompletionState::new();
    assert_eq!(
        layout(&make(yaml_theme), &state),
        layout(&make(ColorTheme::default()), &state)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// COMPLETION FLAGS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_toggle_changes_only_that_row() {
    let page = compliance_checklist();
    let before_state = CompletionState::new();
    let mut after_state = before_state.clone();
    after_state.toggle("prep-1");

    let before = layout(&page, &before_state);
    let after = layout(&page, &after_state);

    for (b, a) in before.sheets.iter().zip(&after.sheets) {
        for (row_idx, (rb, ra)) in b.rows.iter().zip(&a.rows).enumerate() {
            if b.name == "Preparation" && row_idx == 1 {
                assert_eq!(rb[1], "");
                assert_eq!(ra[1], CHECKMARK);
                assert_eq!(rb[0], ra[0]);
                assert_eq!(rb[2], ra[2]);
            } else {
                assert_eq!(rb, ra);
            }
        }
    }
}

#[test]
fn test_checkmark_in_file() {
    let mut state = CompletionState::new();
    state.toggle("prep-1");
    let dir = TempDir::new().unwrap();
    let path = export_to(dir.path(), &compliance_checklist(), &state);

    let rows = read_rows(&path, "Preparation");
    assert_eq!(rows[1][1], CHECKMARK);
    assert!(rows[2..].iter().all(|r| r[1].is_empty()));
}

#[test]
fn test_export_does_not_mutate_state() {
    let mut state = CompletionState::new();
    state.set("impl-3", true);
    let snapshot = state.clone();
    let page = compliance_checklist();
    ExcelExporter::new(&page, &state).export().unwrap();
    assert_eq!(state, snapshot);
}

// ═══════════════════════════════════════════════════════════════════════════
// REPEATED EXPORTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_repeated_exports_are_equivalent() {
    let page = compliance_checklist();
    let mut state = CompletionState::new();
    state.set("assess-2", true);

    let first = layout(&page, &state);
    let second = layout(&page, &state);
    assert_eq!(first, second);

    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let a = export_to(dir_a.path(), &page, &state);
    let b = export_to(dir_b.path(), &page, &state);
    for name in sheet_names(&a) {
        assert_eq!(read_rows(&a, &name), read_rows(&b, &name));
    }
}

#[test]
fn test_no_state_leaks_between_exports() {
    let page = compliance_checklist();
    let mut checked = CompletionState::new();
    checked.set("monitor-1", true);

    let _ = layout(&page, &checked);
    let clean = layout(&page, &CompletionState::new());
    assert!(clean
        .sheets
        .iter()
        .flat_map(|s| s.rows.iter().skip(1))
        .all(|row| row[1].is_empty()));
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_round_trip() {
    let page = compliance_checklist();
    let mut state = CompletionState::new();
    for id in ["prep-3", "assess-1", "impl-7", "monitor-4"] {
        state.set(id, true);
    }
    let dir = TempDir::new().unwrap();
    let path = export_to(dir.path(), &page, &state);

    let imported = ExcelImporter::new(&path).import(&page).unwrap();
    let ids: Vec<&str> = imported.completed_ids().collect();
    assert_eq!(ids, vec!["assess-1", "impl-7", "monitor-4", "prep-3"]);
}

#[test]
fn test_import_guide_workbook_has_no_checklist_sheets() {
    let dir = TempDir::new().unwrap();
    let guide = implementation_guide();
    let path = export_to(dir.path(), &guide, &CompletionState::new());

    // Guide sheets carry no completion column, so nothing can be imported
    assert!(ExcelImporter::new(&path).import(&guide).is_err());
    assert!(ExcelImporter::new(&path)
        .import(&compliance_checklist())
        .is_err());
}

#[test]
fn test_import_round_trip_with_duplicate_category_names() {
    let page = Page {
        slug: "dup".to_string(),
        title: "Duplicates".to_string(),
        filename: "Duplicates.xlsx".to_string(),
        categories: vec![
            Category::new("Tasks", ColorTheme::Blue, ColumnShape::Checklist)
                .with_items(vec![ChecklistItem::new("a-1", "Draft policy", "")]),
            Category::new("Tasks", ColorTheme::Green, ColumnShape::Checklist)
                .with_items(vec![ChecklistItem::new("b-1", "Review policy", "")]),
        ],
    };
    let state: CompletionState = ["a-1", "b-1"].into_iter().collect();
    let dir = TempDir::new().unwrap();
    let path = export_to(dir.path(), &page, &state);
    assert_eq!(sheet_names(&path), vec!["Tasks", "Tasks (2)"]);

    let imported = ExcelImporter::new(&path).import(&page).unwrap();
    assert_eq!(imported, state);
}

// ═══════════════════════════════════════════════════════════════════════════
// SERIALIZATION FAILURE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_oversized_cell_is_export_error() {
    let page = Page {
        slug: "big".to_string(),
        title: "Big".to_string(),
        filename: "Big.xlsx".to_string(),
        categories: vec![Category::new("Big", ColorTheme::Amber, ColumnShape::Checklist)
            .with_items(vec![ChecklistItem::new(
                "big-1",
                "Huge",
                &"x".repeat(40_000),
            )])],
    };

    let result = ExcelExporter::new(&page, &CompletionState::new()).export();
    match result {
        Err(GuideError::Export(msg)) => assert!(msg.contains("32,767"), "{}", msg),
        Err(other) => panic!("expected export error, got {}", other),
        Ok(download) => panic!("exported {} despite oversized cell", download.filename),
    }
}
