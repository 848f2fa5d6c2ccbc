//! Excel export and read-back
//!
//! - Export: page categories + completion flags → styled .xlsx workbook
//! - Import: exported checklist .xlsx → completion flags

mod exporter;
mod importer;
pub mod style;

pub use exporter::{
    sanitize_sheet_name, sheet_names, ExcelExporter, ExportDocument, ExportSheet,
    MAX_SHEET_NAME_LEN,
};
pub use importer::ExcelImporter;
pub use style::{CellStyle, HAlign};
