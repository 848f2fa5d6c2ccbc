use crate::error::{GuideError, GuideResult};
use crate::types::{CompletionState, Page};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level layout of a page definition file
#[derive(Debug, Deserialize)]
struct PagesFile {
    pages: Vec<Page>,
}

/// Parse custom page definitions from a YAML file
///
/// ```yaml
/// pages:
///   - slug: vendor
///     title: Vendor Review
///     filename: Vendor_Review.xlsx
///     categories:
///       - name: Intake
///         theme: green
///         shape: checklist
///         items:
///           - id: intake-1
///             title: Collect contracts
///             description: Gather all active vendor contracts
/// ```
pub fn parse_pages(path: &Path) -> GuideResult<Vec<Page>> {
    let content = fs::read_to_string(path)?;
    parse_pages_str(&content)
}

pub fn parse_pages_str(content: &str) -> GuideResult<Vec<Page>> {
    let file: PagesFile = serde_yaml::from_str(content)?;
    for page in &file.pages {
        page.validate()?;
    }
    Ok(file.pages)
}

/// Load completion flags; a missing file is an empty state
pub fn load_state(path: &Path) -> GuideResult<CompletionState> {
    if !path.exists() {
        return Ok(CompletionState::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(CompletionState::new());
    }
    serde_yaml::from_str(&content).map_err(|e| {
        GuideError::Validation(format!(
            "Invalid state file '{}': {}",
            path.display(),
            e
        ))
    })
}
