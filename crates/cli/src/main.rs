//! Syllabus CLI — the main entry point.
//!
//! Commands:
//! - `onboard`   — Initialize config & data directory
//! - `status`    — Show configuration and workspace summary
//! - `doctor`    — Diagnose setup problems
//! - `whoami`    — Show the local profile
//! - `notebook`  — Create, list, show and delete notebooks
//! - `docs`      — Add and remove notebook materials
//! - `chat`      — Grounded chat, single-message or interactive
//! - `tool`      — Run a study tool over a notebook

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use syllabus_agent::StudyTool;
use syllabus_core::notebook::Subject;

mod commands;

#[derive(Parser)]
#[command(
    name = "syllabus",
    about = "Syllabus — study assistant grounded in your own course materials",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and data directory
    Onboard,

    /// Show configuration and workspace summary
    Status,

    /// Diagnose setup problems
    Doctor,

    /// Show the signed-in local profile
    Whoami,

    /// Manage notebooks
    Notebook {
        #[command(subcommand)]
        action: NotebookAction,
    },

    /// Manage notebook materials
    Docs {
        #[command(subcommand)]
        action: DocsAction,
    },

    /// Chat with your materials
    Chat {
        /// Notebook id (or unique prefix)
        #[arg(short, long)]
        notebook: String,

        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Run a study tool: summary, simple, notes or viva
    Tool {
        kind: StudyTool,

        /// Notebook id (or unique prefix)
        #[arg(short, long)]
        notebook: String,
    },
}

#[derive(Subcommand)]
enum NotebookAction {
    /// Create a notebook and select it
    Create {
        /// DBMS, "Operating Systems", "Computer Networks", AI or Other
        #[arg(short, long)]
        subject: Subject,

        title: String,
    },

    /// List notebooks
    List,

    /// Show a notebook and its materials
    Show { id: String },

    /// Delete a notebook
    Delete {
        id: String,

        /// Skip the confirmation notice and delete
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
enum DocsAction {
    /// Ingest text files (txt, md) into a notebook
    Add {
        #[arg(short, long)]
        notebook: String,

        files: Vec<PathBuf>,

        /// Add pasted text as a material
        #[arg(long, value_name = "TEXT")]
        paste: Option<String>,

        /// Name for pasted text
        #[arg(long, default_value = "Pasted text")]
        name: String,
    },

    /// Remove one material from a notebook
    Remove {
        #[arg(short, long)]
        notebook: String,

        /// Material id (or unique prefix)
        document: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Whoami => commands::whoami::run().await?,
        Commands::Notebook { action } => match action {
            NotebookAction::Create { subject, title } => commands::notebook::create(subject, &title).await?,
            NotebookAction::List => commands::notebook::list().await?,
            NotebookAction::Show { id } => commands::notebook::show(&id).await?,
            NotebookAction::Delete { id, confirm } => commands::notebook::delete(&id, confirm).await?,
        },
        Commands::Docs { action } => match action {
            DocsAction::Add {
                notebook,
                files,
                paste,
                name,
            } => commands::docs::add(&notebook, &files, paste, &name).await?,
            DocsAction::Remove { notebook, document } => commands::docs::remove(&notebook, &document).await?,
        },
        Commands::Chat { notebook, message } => commands::chat::run(&notebook, message).await?,
        Commands::Tool { kind, notebook } => commands::tool::run(kind, &notebook).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tool_kind_and_rejects_unknown() {
        let cli = Cli::try_parse_from(["syllabus", "tool", "viva", "--notebook", "abc"]).unwrap();
        assert!(matches!(cli.command, Commands::Tool { kind: StudyTool::Viva, .. }));
        assert!(Cli::try_parse_from(["syllabus", "tool", "quiz", "--notebook", "abc"]).is_err());
    }

    #[test]
    fn parses_subject_aliases() {
        let cli = Cli::try_parse_from(["syllabus", "notebook", "create", "-s", "os", "Paging"]).unwrap();
        match cli.command {
            Commands::Notebook {
                action: NotebookAction::Create { subject, title },
            } => {
                assert_eq!(subject, Subject::OperatingSystems);
                assert_eq!(title, "Paging");
            }
            _ => panic!("expected notebook create"),
        }
    }

    #[test]
    fn delete_requires_explicit_confirm() {
        let cli = Cli::try_parse_from(["syllabus", "notebook", "delete", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Notebook {
                action: NotebookAction::Delete { confirm: false, .. }
            }
        ));
    }
}
