use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};

use crate::error::{GuideError, GuideResult};

/// Glyph written into the "Completed" column for finished tasks
pub const CHECKMARK: &str = "✓";

//==============================================================================
// Color Themes
//==============================================================================

/// Sheet color theme
///
/// The set is closed: any name that is not recognised resolves to
/// [`ColorTheme::Blue`], so a lookup can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorTheme {
    #[default]
    Blue,
    Amber,
    Green,
    Purple,
}

/// Header and alternate-row colors for one theme (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub header: u32,
    pub alternate_row: u32,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 4] = [
        ColorTheme::Blue,
        ColorTheme::Amber,
        ColorTheme::Green,
        ColorTheme::Purple,
    ];

    /// Resolve a theme by name, falling back to the default theme
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "blue" => ColorTheme::Blue,
            "amber" => ColorTheme::Amber,
            "green" => ColorTheme::Green,
            "purple" => ColorTheme::Purple,
            _ => ColorTheme::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorTheme::Blue => "blue",
            ColorTheme::Amber => "amber",
            ColorTheme::Green => "green",
            ColorTheme::Purple => "purple",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            ColorTheme::Blue => ThemeColors {
                header: 0x4472C4,
                alternate_row: 0xD9E1F2,
            },
            ColorTheme::Amber => ThemeColors {
                header: 0xED7D31,
                alternate_row: 0xFBE5D6,
            },
            ColorTheme::Green => ThemeColors {
                header: 0x70AD47,
                alternate_row: 0xE2EFDA,
            },
            ColorTheme::Purple => ThemeColors {
                header: 0x7030A0,
                alternate_row: 0xE4D7F0,
            },
        }
    }
}

impl Serialize for ColorTheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ColorTheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ColorTheme::from_name(&name))
    }
}

//==============================================================================
// Column Shapes
//==============================================================================

/// What a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Title,
    Completed,
    Description,
    Date,
}

/// Column layout used for one category's sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnShape {
    /// Task | Completed | Description
    #[default]
    Checklist,
    /// Step | Description
    Steps,
    /// Date | Milestone | Description
    Timeline,
}

/// A single column: header label, content and width in characters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub kind: ColumnKind,
    pub width: f64,
}

const CHECKLIST_COLUMNS: [ColumnSpec; 3] = [
    ColumnSpec {
        label: "Task",
        kind: ColumnKind::Title,
        width: 40.0,
    },
    ColumnSpec {
        label: "Completed",
        kind: ColumnKind::Completed,
        width: 15.0,
    },
    ColumnSpec {
        label: "Description",
        kind: ColumnKind::Description,
        width: 60.0,
    },
];

const STEP_COLUMNS: [ColumnSpec; 2] = [
    ColumnSpec {
        label: "Step",
        kind: ColumnKind::Title,
        width: 35.0,
    },
    ColumnSpec {
        label: "Description",
        kind: ColumnKind::Description,
        width: 65.0,
    },
];

const TIMELINE_COLUMNS: [ColumnSpec; 3] = [
    ColumnSpec {
        label: "Date",
        kind: ColumnKind::Date,
        width: 15.0,
    },
    ColumnSpec {
        label: "Milestone",
        kind: ColumnKind::Title,
        width: 30.0,
    },
    ColumnSpec {
        label: "Description",
        kind: ColumnKind::Description,
        width: 55.0,
    },
];

impl ColumnShape {
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            ColumnShape::Checklist => &CHECKLIST_COLUMNS,
            ColumnShape::Steps => &STEP_COLUMNS,
            ColumnShape::Timeline => &TIMELINE_COLUMNS,
        }
    }

    pub fn header(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.label).collect()
    }

    pub fn arity(&self) -> usize {
        self.columns().len()
    }

    /// Index of the "Completed" column, if the shape tracks completion
    pub fn completed_column(&self) -> Option<usize> {
        self.columns()
            .iter()
            .position(|c| c.kind == ColumnKind::Completed)
    }
}

//==============================================================================
// Checklist Content
//==============================================================================

/// One checklist task, guide step or timeline milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Only used by timeline categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ChecklistItem {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            date: None,
        }
    }

    pub fn milestone(id: &str, date: &str, title: &str, description: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            ..Self::new(id, title, description)
        }
    }
}

/// A named, ordered group of items exported as one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub theme: ColorTheme,
    #[serde(default)]
    pub shape: ColumnShape,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Category {
    pub fn new(name: &str, theme: ColorTheme, shape: ColumnShape) -> Self {
        Self {
            name: name.to_string(),
            theme,
            shape,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<ChecklistItem>) -> Self {
        self.items = items;
        self
    }
}

/// A set of categories exported together into one workbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    pub title: String,
    pub filename: String,
    pub categories: Vec<Category>,
}

impl Page {
    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|item| item.id == id)
    }

    /// Category holding the item with this id
    pub fn category_of(&self, id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.items.iter().any(|item| item.id == id))
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Check ids are unique and timeline items carry a date
    pub fn validate(&self) -> GuideResult<()> {
        if self.categories.is_empty() {
            return Err(GuideError::Validation(format!(
                "Page '{}' has no categories",
                self.slug
            )));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            for item in &category.items {
                if !seen.insert(item.id.as_str()) {
                    return Err(GuideError::Validation(format!(
                        "Duplicate item id '{}' on page '{}'",
                        item.id, self.slug
                    )));
                }
                if category.shape == ColumnShape::Timeline && item.date.is_none() {
                    return Err(GuideError::Validation(format!(
                        "Timeline item '{}' in '{}' has no date",
                        item.id, category.name
                    )));
                }
            }
        }
        Ok(())
    }
}

//==============================================================================
// Completion State
//==============================================================================

/// Per-item completion flags
///
/// An id that has never been set reads as not completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionState {
    flags: BTreeMap<String, bool>,
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: &str, completed: bool) {
        self.flags.insert(id.to_string(), completed);
    }

    /// Flip one flag, returning the new value
    pub fn toggle(&mut self, id: &str) -> bool {
        let flag = self.flags.entry(id.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, done)| **done)
            .map(|(id, _)| id.as_str())
    }

    pub fn completed_count(&self) -> usize {
        self.completed_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CompletionState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(|id| (id.into(), true)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup_known_names() {
        assert_eq!(ColorTheme::from_name("amber"), ColorTheme::Amber);
        assert_eq!(ColorTheme::from_name("Green"), ColorTheme::Green);
        assert_eq!(ColorTheme::from_name(" purple "), ColorTheme::Purple);
    }

    #[test]
    fn test_theme_unknown_name_falls_back_to_blue() {
        assert_eq!(ColorTheme::from_name("teal"), ColorTheme::Blue);
        assert_eq!(ColorTheme::from_name(""), ColorTheme::Blue);
        assert_eq!(
            ColorTheme::from_name("teal").colors(),
            ColorTheme::default().colors()
        );
    }

    #[test]
    fn test_theme_names_round_trip() {
        for theme in ColorTheme::ALL {
            assert_eq!(ColorTheme::from_name(theme.name()), theme);
        }
    }

    #[test]
    fn test_theme_colors() {
        let colors = ColorTheme::Amber.colors();
        assert_eq!(colors.header, 0xED7D31);
        assert_eq!(colors.alternate_row, 0xFBE5D6);
    }

    #[test]
    fn test_theme_deserialize_unknown() {
        let theme: ColorTheme = serde_yaml::from_str("magenta").unwrap();
        assert_eq!(theme, ColorTheme::Blue);
    }

    #[test]
    fn test_shape_headers() {
        assert_eq!(
            ColumnShape::Checklist.header(),
            vec!["Task", "Completed", "Description"]
        );
        assert_eq!(ColumnShape::Steps.header(), vec!["Step", "Description"]);
        assert_eq!(
            ColumnShape::Timeline.header(),
            vec!["Date", "Milestone", "Description"]
        );
    }

    #[test]
    fn test_shape_completed_column() {
        assert_eq!(ColumnShape::Checklist.completed_column(), Some(1));
        assert_eq!(ColumnShape::Steps.completed_column(), None);
        assert_eq!(ColumnShape::Timeline.completed_column(), None);
    }

    #[test]
    fn test_completion_absent_is_false() {
        let state = CompletionState::new();
        assert!(!state.is_completed("prep-1"));
    }

    #[test]
    fn test_completion_toggle() {
        let mut state = CompletionState::new();
        assert!(state.toggle("prep-1"));
        assert!(state.is_completed("prep-1"));
        assert!(!state.toggle("prep-1"));
        assert!(!state.is_completed("prep-1"));
        assert_eq!(state.completed_count(), 0);
    }

    #[test]
    fn test_completion_from_iter() {
        let state: CompletionState = ["a", "b"].into_iter().collect();
        assert_eq!(state.completed_ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_page_validate_duplicate_ids() {
        let page = Page {
            slug: "dup".to_string(),
            title: "Dup".to_string(),
            filename: "dup.xlsx".to_string(),
            categories: vec![
                Category::new("A", ColorTheme::Blue, ColumnShape::Checklist)
                    .with_items(vec![ChecklistItem::new("x", "X", "")]),
                Category::new("B", ColorTheme::Green, ColumnShape::Checklist)
                    .with_items(vec![ChecklistItem::new("x", "Y", "")]),
            ],
        };
        assert!(matches!(page.validate(), Err(GuideError::Validation(_))));
    }

    #[test]
    fn test_page_validate_timeline_requires_date() {
        let page = Page {
            slug: "t".to_string(),
            title: "T".to_string(),
            filename: "t.xlsx".to_string(),
            categories: vec![Category::new("T", ColorTheme::Purple, ColumnShape::Timeline)
                .with_items(vec![ChecklistItem::new("t-1", "Start", "")])],
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn test_page_category_of() {
        let page = Page {
            slug: "two".to_string(),
            title: "Two".to_string(),
            filename: "two.xlsx".to_string(),
            categories: vec![
                Category::new("A", ColorTheme::Blue, ColumnShape::Checklist)
                    .with_items(vec![ChecklistItem::new("a-1", "X", "")]),
                Category::new("B", ColorTheme::Green, ColumnShape::Steps)
                    .with_items(vec![ChecklistItem::new("b-1", "Y", "")]),
            ],
        };
        assert_eq!(page.category_of("b-1").unwrap().name, "B");
        assert!(page.category_of("c-1").is_none());
    }
}
