mod analyze;
mod chart;
mod output;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use sentiscope_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::output::OutputArgs;

#[derive(Debug, Parser)]
#[command(name = "sentiscope")]
#[command(about = "Sentence- and document-level sentiment scoring")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score typed text, one document per line (reads stdin when TEXT is omitted)
    Text { text: Option<String> },
    /// Score a .txt file (one document per line) or a .csv file
    File {
        path: PathBuf,

        /// CSV column holding document ids
        #[arg(long)]
        id_column: Option<String>,

        /// CSV column holding document text
        #[arg(long)]
        text_column: Option<String>,
    },
    /// Show the first rows of a file and, for CSV, its columns
    Preview {
        path: PathBuf,

        /// Number of rows or lines to show
        #[arg(long)]
        rows: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = sentiscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");
    run(cli, &config)
}

fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Text { text }) => {
            let analyzer = analyze::build_analyzer(config)?;
            analyze::run_text(&analyzer, text, &cli.output, config)
        }
        Some(Commands::File {
            path,
            id_column,
            text_column,
        }) => {
            let analyzer = analyze::build_analyzer(config)?;
            let selection = analyze::column_selection(id_column, text_column);
            analyze::run_file(&analyzer, &path, selection.as_ref(), &cli.output, config)
        }
        Some(Commands::Preview { path, rows }) => {
            analyze::run_preview(&path, rows.unwrap_or(config.preview_rows))
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
