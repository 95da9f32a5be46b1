use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pokedex::data::index::{PokedexIndex, SortKey};
use pokedex::data::store::{CsvStore, DEFAULT_STORE_PATH};

/// Write the companion CSV store from a Pokédex source.
#[derive(Debug, Parser)]
#[command(name = "export_csv", version)]
struct Args {
    /// Source to read (.json or .csv).
    input: PathBuf,

    /// CSV file to (over)write.
    #[arg(default_value = DEFAULT_STORE_PATH)]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut index = PokedexIndex::load(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    // Id order keeps the store's last row at the highest id.
    index.sort_by(SortKey::Id);

    let count = CsvStore::new(&args.output)
        .write_all(index.records())
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Wrote {count} Pokémon to {}", args.output.display());
    Ok(())
}
