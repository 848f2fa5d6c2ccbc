use crate::content::Catalog;
use crate::download::{DirectorySink, DownloadSink, WriterSink};
use crate::error::{GuideError, GuideResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::parser;
use crate::preferences::{JsonFilePreferenceStore, NoticeState};
use crate::types::{ColumnShape, CompletionState, Page};
use crate::writer;
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for the export command
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub state: Option<PathBuf>,
    pub check: Vec<String>,
    pub pages: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub stdout: bool,
    pub force: bool,
}

/// What to do with the notice flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    Status,
    AcceptCookies,
    DeclineCookies,
    DismissHistory,
}

/// Built-in pages plus any pages from a definition file
pub fn load_catalog(pages: Option<&Path>) -> GuideResult<Catalog> {
    let mut catalog = Catalog::builtin();
    if let Some(path) = pages {
        let custom = parser::parse_pages(path)?;
        debug!(path = %path.display(), pages = custom.len(), "loaded custom pages");
        catalog.extend(custom)?;
    }
    Ok(catalog)
}

/// The id must name an item whose sheet has a "Completed" column
fn ensure_item(page: &Page, id: &str) -> GuideResult<()> {
    let Some(category) = page.category_of(id) else {
        return Err(GuideError::UnknownItem {
            page: page.slug.clone(),
            item: id.to_string(),
        });
    };
    if category.shape.completed_column().is_none() {
        return Err(GuideError::Validation(format!(
            "Item '{}' in '{}' cannot be checked: {} sheets have no Completed column",
            id,
            category.name,
            category.shape.header().join(" | ")
        )));
    }
    Ok(())
}

/// Completion flags from the state file with `--check` ids toggled on top
fn resolve_state(
    page: &Page,
    state: Option<&Path>,
    check: &[String],
) -> GuideResult<CompletionState> {
    let mut completion = match state {
        Some(path) => parser::load_state(path)?,
        None => CompletionState::new(),
    };
    for id in check {
        ensure_item(page, id)?;
        completion.toggle(id);
    }
    Ok(completion)
}

/// Execute the export command
pub fn export(page: String, options: ExportOptions) -> GuideResult<()> {
    let catalog = load_catalog(options.pages.as_deref())?;
    let page = catalog.get(&page)?;
    let completion = resolve_state(page, options.state.as_deref(), &options.check)?;

    let download = ExcelExporter::new(page, &completion).export()?;

    if options.stdout {
        let mut sink = WriterSink::new(io::stdout().lock());
        let delivered = sink.deliver(download)?;
        eprintln!("{} {}", "✅ Exported".bold().green(), delivered);
        return Ok(());
    }

    println!("{}", format!("📥 {} - Excel Export", page.title).bold().green());
    println!(
        "   Sheets:    {}",
        page.categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "   Completed: {}/{}\n",
        page.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .filter(|item| completion.is_completed(&item.id))
            .count(),
        page.item_count()
    );

    let path = DirectorySink::new(&options.out_dir)
        .overwrite(options.force)
        .save(download)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", path.display());
    Ok(())
}

/// Execute the import command
pub fn import(
    input: PathBuf,
    page: String,
    state: PathBuf,
    pages: Option<PathBuf>,
) -> GuideResult<()> {
    println!("{}", "📤 Excel Import".bold().green());
    println!("   Input: {}", input.display());
    println!("   State: {}\n", state.display());

    let catalog = load_catalog(pages.as_deref())?;
    let page = catalog.get(&page)?;
    let completion = ExcelImporter::new(&input).import(page)?;
    writer::save_state(&state, &completion)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!(
        "   {} of {} tasks marked completed\n",
        completion.completed_count(),
        page.item_count()
    );
    Ok(())
}

/// Execute the toggle command
pub fn toggle(
    page: String,
    ids: Vec<String>,
    state: PathBuf,
    pages: Option<PathBuf>,
) -> GuideResult<()> {
    let catalog = load_catalog(pages.as_deref())?;
    let page = catalog.get(&page)?;

    // Validate every id before touching the file
    for id in &ids {
        ensure_item(page, id)?;
    }

    let mut completion = parser::load_state(&state)?;
    for id in &ids {
        let done = completion.toggle(id);
        let title = page.item(id).map(|i| i.title.as_str()).unwrap_or(id.as_str());
        if done {
            println!("   {} {}", "[x]".green().bold(), title);
        } else {
            println!("   {} {}", "[ ]".dimmed(), title);
        }
    }
    writer::save_state(&state, &completion)?;
    Ok(())
}

fn checkbox(done: bool) -> String {
    if done {
        "[x]".green().bold().to_string()
    } else {
        "[ ]".dimmed().to_string()
    }
}

/// Execute the show command - print a page with its completion marks
pub fn show(page: String, state: Option<PathBuf>, pages: Option<PathBuf>) -> GuideResult<()> {
    let catalog = load_catalog(pages.as_deref())?;
    let page = catalog.get(&page)?;
    let completion = resolve_state(page, state.as_deref(), &[])?;

    println!("{}\n", page.title.bold());
    for category in &page.categories {
        println!("{}", category.name.bright_blue().bold());
        for item in &category.items {
            match category.shape {
                ColumnShape::Checklist => println!(
                    "  {} {} {}",
                    checkbox(completion.is_completed(&item.id)),
                    item.title,
                    format!("({})", item.id).dimmed()
                ),
                ColumnShape::Steps => println!("  • {}", item.title),
                ColumnShape::Timeline => println!(
                    "  {} {}",
                    item.date.as_deref().unwrap_or("").bold(),
                    item.title
                ),
            }
            println!("      {}", item.description.dimmed());
        }
        println!();
    }
    Ok(())
}

/// Execute the pages command - list available pages
pub fn list_pages(pages: Option<PathBuf>) -> GuideResult<()> {
    let catalog = load_catalog(pages.as_deref())?;
    println!("{}", "📚 Available pages".bold().green());
    for page in catalog.pages() {
        println!(
            "   {}  {} ({} sheets, {} items) → {}",
            page.slug.bright_blue().bold(),
            page.title,
            page.categories.len(),
            page.item_count(),
            page.filename.dimmed()
        );
    }
    Ok(())
}

/// Execute the notices command
pub fn notices(action: NoticeAction, prefs: PathBuf) -> GuideResult<()> {
    let mut store = JsonFilePreferenceStore::new(&prefs);
    let mut state = NoticeState::load(&store)?;

    match action {
        NoticeAction::Status => {}
        NoticeAction::AcceptCookies => state.record_cookie_consent(&mut store, true)?,
        NoticeAction::DeclineCookies => state.record_cookie_consent(&mut store, false)?,
        NoticeAction::DismissHistory => state.dismiss_history_popup(&mut store)?,
    }

    let consent = match state.cookie_consent {
        Some(c) => c.as_str().green().to_string(),
        None => "pending".yellow().to_string(),
    };
    let history = if state.history_popup_seen {
        "dismissed".green().to_string()
    } else {
        "pending".yellow().to_string()
    };
    println!("   Cookie consent: {}", consent);
    println!("   History popup:  {}", history);
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
