use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use pokedex::app::run_chart_window;
use pokedex::data::store::{CsvStore, DEFAULT_STORE_PATH};
use pokedex::shell::Shell;
use pokedex::state::AppState;
use pokedex::ui::launcher::ProcessChartRenderer;
use pokedex::ui::plot::StatChart;

/// Search, compare and chart Pokémon.
#[derive(Debug, Parser)]
#[command(name = "pokedex", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Pokédex source (.json or .csv). A file dialog opens when omitted.
    file: Option<PathBuf>,

    /// Companion CSV store edited by the add and remove menu entries.
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    csv: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one Pokémon's stats as a bar chart.
    Chart {
        /// Chart title, usually the english name.
        #[arg(long)]
        title: String,

        /// HP, Attack, Defense, Sp. Attack, Sp. Defense and Speed, comma separated.
        #[arg(long, value_delimiter = ',')]
        values: Vec<u32>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Chart { title, values }) => {
            let values: [u32; 6] = values
                .try_into()
                .map_err(|v: Vec<u32>| anyhow!("expected 6 stat values, got {}", v.len()))?;
            run_chart_window(StatChart::from_values(&title, values))
                .map_err(|e| anyhow!("chart window failed: {e}"))
        }
        None => {
            let source = match cli.file {
                Some(path) => path,
                None => pick_source_file().context("no Pokédex file selected")?,
            };
            let mut state = AppState::open(&source, CsvStore::new(cli.csv))?;

            let stdin = std::io::stdin();
            let mut shell = Shell::new(
                stdin.lock(),
                std::io::stdout(),
                rand::rng(),
                ProcessChartRenderer::current_exe()?,
            );
            shell.run(&mut state)
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_source_file() -> Option<PathBuf> {
    let file = rfd::FileDialog::new()
        .set_title("Open Pokédex")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();
    if let Some(path) = &file {
        log::info!("Selected {}", path.display());
    }
    file
}
