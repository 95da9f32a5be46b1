use std::path::Path;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::PokemonRecord;
use super::store::CsvRow;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every record from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "id": 1, "name": {...}, "type": [...], "base": {...} }, ...]`
/// * `.csv`  – the companion store layout (`name/english`, `type/0`, `base/HP`, ...)
pub fn load_file(path: &Path) -> Result<Vec<PokemonRecord>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_json(&text)
        }
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// [
///   {
///     "id": 1,
///     "name": { "english": "Bulbasaur", "japanese": "フシギダネ", ... },
///     "type": ["Grass", "Poison"],
///     "base": { "HP": 45, "Attack": 49, "Defense": 49,
///               "Sp. Attack": 65, "Sp. Defense": 65, "Speed": 45 }
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<Vec<PokemonRecord>, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let record = PokemonRecord::deserialize(row).map_err(|e| LoadError::Malformed {
                index,
                reason: e.to_string(),
            })?;
            record
                .validate()
                .map_err(|reason| LoadError::Malformed { index, reason })?;
            Ok(record)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the flattened column names written by
/// [`CsvStore`](super::store::CsvStore). Empty optional cells are `None`.
fn load_csv(path: &Path) -> Result<Vec<PokemonRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(csv::Reader::from_reader(file))
}

pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<PokemonRecord>, LoadError> {
    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| LoadError::Malformed {
            index,
            reason: e.to_string(),
        })?;
        let record = row
            .into_record()
            .map_err(|reason| LoadError::Malformed { index, reason })?;
        records.push(record);
    }
    Ok(records)
}
