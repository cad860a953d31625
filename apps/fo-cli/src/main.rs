//! # fo-cli
//!
//! Command-line interface for Film Ops project preparation.
//!
//! - `fo project create/list/status/advance/delete` — manage project records
//! - `fo checklist show/toggle/reset` — work the preparation checklist

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fo_prep::PrepConfig;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FO_GIT_HASH"),
    " ",
    env!("FO_BUILD_DATE"),
    ")"
);

/// Film Ops CLI — track project preparation.
#[derive(Parser)]
#[command(name = "fo", version = VERSION, about)]
struct Cli {
    /// Dashboard root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects.
    Project {
        #[command(subcommand)]
        command: commands::project::ProjectCommands,
    },
    /// Work a project's preparation checklist.
    Checklist {
        #[command(subcommand)]
        command: commands::checklist::ChecklistCommands,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fo_prep=info".parse()?)
                .add_directive("fo_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = PrepConfig::for_project(&project_root);
    tracing::debug!("dashboard root: {}", project_root.display());
    let settings = config.load_settings()?;

    match &cli.command {
        Commands::Project { command } => commands::project::execute(command, &config, &settings),
        Commands::Checklist { command } => {
            commands::checklist::execute(command, &config, &settings)
        }
    }
}
