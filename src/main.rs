use aiact_guide::cli::{self, ExportOptions, NoticeAction};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aiact")]
#[command(about = "EU AI Act compliance checklist and implementation guide.")]
#[command(long_about = "AI Act Guide - track EU AI Act compliance and export it to Excel

COMMANDS:
  export   - Download a page as a styled Excel workbook
  import   - Read completion marks back from an exported checklist
  toggle   - Check or uncheck checklist items
  show     - Print a page with its completion marks
  pages    - List available pages
  notices  - Cookie-consent and history-popup flags

EXAMPLES:
  aiact export checklist --check prep-1 --check prep-2
  aiact toggle checklist assess-3 --state progress.yaml
  aiact export checklist --state progress.yaml --out-dir reports
  aiact export guide --stdout > guide.xlsx")]
#[command(version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Export a page to an Excel .xlsx workbook.

Each category becomes a worksheet, in page order. Header rows use the
category's theme color; data rows alternate between a light theme tint and
white. Checked tasks show a ✓ in the Completed column.

PAGES:
  checklist  → EU_AI_Act_Compliance_Checklist.xlsx (Task | Completed | Description)
  guide      → EU_AI_Act_Implementation_Guide.xlsx (Step | Description, Date | Milestone | Description)

The state file is only read, never modified. --check toggles an item for this
export only.")]
    /// Export a page to Excel .xlsx
    Export {
        /// Page slug (checklist, guide, or one from --pages)
        page: String,

        /// YAML file of completion flags (id: true)
        #[arg(short, long, env = "AIACT_STATE")]
        state: Option<PathBuf>,

        /// Toggle an item before exporting (repeatable)
        #[arg(short, long)]
        check: Vec<String>,

        /// Extra page definitions (YAML)
        #[arg(long, env = "AIACT_PAGES")]
        pages: Option<PathBuf>,

        /// Directory the workbook is saved into
        #[arg(short, long, default_value = ".", env = "AIACT_OUT_DIR")]
        out_dir: PathBuf,

        /// Write the workbook to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Import completion marks from an exported checklist workbook
    Import {
        /// Path to Excel file (.xlsx)
        input: PathBuf,

        /// Page the workbook was exported from
        #[arg(short, long, default_value = "checklist")]
        page: String,

        /// YAML state file to write
        #[arg(short, long, env = "AIACT_STATE")]
        state: PathBuf,

        /// Extra page definitions (YAML)
        #[arg(long, env = "AIACT_PAGES")]
        pages: Option<PathBuf>,
    },

    /// Toggle checklist items in a state file
    Toggle {
        /// Page slug
        page: String,

        /// Item ids to toggle
        #[arg(required = true)]
        ids: Vec<String>,

        /// YAML state file (created if missing)
        #[arg(short, long, env = "AIACT_STATE")]
        state: PathBuf,

        /// Extra page definitions (YAML)
        #[arg(long, env = "AIACT_PAGES")]
        pages: Option<PathBuf>,
    },

    /// Print a page with completion marks
    Show {
        /// Page slug
        page: String,

        /// YAML file of completion flags
        #[arg(short, long, env = "AIACT_STATE")]
        state: Option<PathBuf>,

        /// Extra page definitions (YAML)
        #[arg(long, env = "AIACT_PAGES")]
        pages: Option<PathBuf>,
    },

    /// List available pages
    Pages {
        /// Extra page definitions (YAML)
        #[arg(long, env = "AIACT_PAGES")]
        pages: Option<PathBuf>,
    },

    /// Show or record notice dismissals
    Notices {
        #[arg(value_enum, default_value = "status")]
        action: NoticeArg,

        /// Preference file (JSON)
        #[arg(long, default_value = ".aiact-notices.json", env = "AIACT_PREFS")]
        prefs: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NoticeArg {
    Status,
    AcceptCookies,
    DeclineCookies,
    DismissHistory,
}

impl From<NoticeArg> for NoticeAction {
    fn from(arg: NoticeArg) -> Self {
        match arg {
            NoticeArg::Status => NoticeAction::Status,
            NoticeArg::AcceptCookies => NoticeAction::AcceptCookies,
            NoticeArg::DeclineCookies => NoticeAction::DeclineCookies,
            NoticeArg::DismissHistory => NoticeAction::DismissHistory,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "aiact_guide=debug" } else { "aiact_guide=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export {
            page,
            state,
            check,
            pages,
            out_dir,
            stdout,
            force,
        } => {
            let options = ExportOptions {
                state,
                check,
                pages,
                out_dir,
                stdout,
                force,
            };
            cli::export(page.clone(), options)
                .with_context(|| format!("Export of page '{}' failed", page))
        }

        Commands::Import {
            input,
            page,
            state,
            pages,
        } => cli::import(input.clone(), page, state, pages)
            .with_context(|| format!("Import of '{}' failed", input.display())),

        Commands::Toggle {
            page,
            ids,
            state,
            pages,
        } => cli::toggle(page, ids, state, pages).context("Toggle failed"),

        Commands::Show { page, state, pages } => {
            cli::show(page, state, pages).context("Show failed")
        }

        Commands::Pages { pages } => cli::list_pages(pages).context("Listing pages failed"),

        Commands::Notices { action, prefs } => {
            cli::notices(action.into(), prefs).context("Updating notices failed")
        }
    }
}
