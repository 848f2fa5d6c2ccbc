use crate::error::GuideResult;
use crate::types::CompletionState;
use std::fs;
use std::path::Path;

/// Write completion flags back to a YAML state file
pub fn save_state(path: &Path, state: &CompletionState) -> GuideResult<()> {
    let content = serde_yaml::to_string(state)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
