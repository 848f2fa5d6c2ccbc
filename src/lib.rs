//! AI Act Guide - compliance checklist with styled Excel export
//!
//! This library holds the content of the EU AI Act compliance checklist and
//! implementation guide, and turns a page plus the user's completion flags
//! into a multi-sheet .xlsx workbook.
//!
//! # Features
//!
//! - One sheet per category, in declared order
//! - Per-category color themes with alternating row fills
//! - Checklist, step and timeline column layouts
//! - Atomic delivery of the finished workbook
//! - Read-back of completion flags from an exported workbook
//!
//! # Example
//!
//! ```no_run
//! use aiact_guide::content::compliance_checklist;
//! use aiact_guide::download::DirectorySink;
//! use aiact_guide::excel::ExcelExporter;
//! use aiact_guide::types::CompletionState;
//!
//! let page = compliance_checklist();
//! let mut state = CompletionState::new();
//! state.toggle("prep-1");
//!
//! let download = ExcelExporter::new(&page, &state).export()?;
//! let path = DirectorySink::new("exports").save(download)?;
//! println!("Saved {}", path.display());
//! # Ok::<(), aiact_guide::error::GuideError>(())
//! ```

pub mod cli;
pub mod content;
pub mod download;
pub mod error;
pub mod excel;
pub mod parser;
pub mod preferences;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{GuideError, GuideResult};
pub use types::{Category, ChecklistItem, ColorTheme, ColumnShape, CompletionState, Page};
