//! CLI command handlers

pub mod commands;

pub use commands::{
    export, import, list_pages, notices, show, toggle, ExportOptions, NoticeAction,
};
