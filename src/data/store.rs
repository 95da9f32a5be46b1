use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::model::{same_name, Names, PokemonRecord, PokemonType, Stats};

/// Default location of the companion store.
pub const DEFAULT_STORE_PATH: &str = "pokedex.csv";

// ---------------------------------------------------------------------------
// CsvRow – flattened record layout of the companion store
// ---------------------------------------------------------------------------

/// One row of the companion CSV, with the flattened `name/english`,
/// `type/0`, `base/HP`, ... headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    pub id: u32,
    #[serde(rename = "name/english")]
    pub english: String,
    #[serde(rename = "name/japanese")]
    pub japanese: Option<String>,
    #[serde(rename = "name/chinese")]
    pub chinese: Option<String>,
    #[serde(rename = "name/french")]
    pub french: Option<String>,
    #[serde(rename = "type/0")]
    pub type0: String,
    #[serde(rename = "type/1")]
    pub type1: Option<String>,
    #[serde(rename = "base/HP")]
    pub hp: u32,
    #[serde(rename = "base/Attack")]
    pub attack: u32,
    #[serde(rename = "base/Defense")]
    pub defense: u32,
    #[serde(rename = "base/Sp. Attack")]
    pub sp_attack: u32,
    #[serde(rename = "base/Sp. Defense")]
    pub sp_defense: u32,
    #[serde(rename = "base/Speed")]
    pub speed: u32,
}

impl CsvRow {
    pub fn from_record(record: &PokemonRecord) -> Self {
        let mut types = record.types.iter().map(|t| t.as_str().to_string());
        CsvRow {
            id: record.id,
            english: record.names.english.clone(),
            japanese: record.names.japanese.clone(),
            chinese: record.names.chinese.clone(),
            french: record.names.french.clone(),
            type0: types.next().unwrap_or_default(),
            type1: types.next(),
            hp: record.stats.hp,
            attack: record.stats.attack,
            defense: record.stats.defense,
            sp_attack: record.stats.sp_attack,
            sp_defense: record.stats.sp_defense,
            speed: record.stats.speed,
        }
    }

    /// Convert back into a record, rejecting unknown type tags.
    pub fn into_record(self) -> Result<PokemonRecord, String> {
        let mut types = vec![parse_type(&self.type0)?];
        if let Some(second) = self.type1.as_deref().filter(|t| !t.trim().is_empty()) {
            types.push(parse_type(second)?);
        }
        let record = PokemonRecord {
            id: self.id,
            names: Names {
                english: self.english,
                japanese: non_empty(self.japanese),
                chinese: non_empty(self.chinese),
                french: non_empty(self.french),
            },
            types,
            stats: Stats {
                hp: self.hp,
                attack: self.attack,
                defense: self.defense,
                sp_attack: self.sp_attack,
                sp_defense: self.sp_defense,
                speed: self.speed,
            },
        };
        record.validate()?;
        Ok(record)
    }
}

fn parse_type(tag: &str) -> Result<PokemonType, String> {
    PokemonType::parse(tag).ok_or_else(|| format!("unknown type {tag:?}"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// NewPokemon – user-supplied entry awaiting an id
// ---------------------------------------------------------------------------

/// A Pokémon typed in by the user; the store assigns its id on append.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPokemon {
    pub names: Names,
    pub types: Vec<PokemonType>,
    pub stats: Stats,
}

impl NewPokemon {
    /// Parse `english,japanese,chinese,french,type0,type1,hp,attack,defense,sp_attack,sp_defense,speed`.
    ///
    /// A leading empty id column (13 fields) is accepted and ignored. The
    /// other-language names and the second type may be left empty.
    pub fn parse_fields(line: &str) -> Result<Self, StoreError> {
        let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() == 13 {
            fields.remove(0);
        }
        if fields.len() != 12 {
            return Err(StoreError::InvalidEntry(format!(
                "expected 12 comma-separated fields, got {}",
                fields.len()
            )));
        }

        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let english = fields[0];
        if english.is_empty() {
            return Err(StoreError::InvalidEntry("english name is required".to_string()));
        }

        let mut types = Vec::with_capacity(2);
        for tag in fields[4..6].iter().filter(|t| !t.is_empty()) {
            let t = PokemonType::parse(tag)
                .ok_or_else(|| StoreError::InvalidEntry(format!("unknown type {tag:?}")))?;
            types.push(t);
        }
        if types.is_empty() {
            return Err(StoreError::InvalidEntry("at least one type is required".to_string()));
        }

        let mut values = [0u32; 6];
        for (slot, raw) in values.iter_mut().zip(&fields[6..]) {
            *slot = raw
                .parse()
                .map_err(|_| StoreError::InvalidEntry(format!("stat {raw:?} is not a non-negative integer")))?;
        }
        let [hp, attack, defense, sp_attack, sp_defense, speed] = values;

        Ok(NewPokemon {
            names: Names {
                english: english.to_string(),
                japanese: optional(fields[1]),
                chinese: optional(fields[2]),
                french: optional(fields[3]),
            },
            types,
            stats: Stats {
                hp,
                attack,
                defense,
                sp_attack,
                sp_defense,
                speed,
            },
        })
    }

    pub fn with_id(self, id: u32) -> PokemonRecord {
        PokemonRecord {
            id,
            names: self.names,
            types: self.types,
            stats: self.stats,
        }
    }
}

// ---------------------------------------------------------------------------
// CsvStore – the companion file
// ---------------------------------------------------------------------------

/// Appends and removes rows of the companion CSV. The in-memory index is not
/// touched; callers reload it when they want the edit reflected.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `pokemon`, returning the id it was given.
    ///
    /// The id is the last row's id plus one (not the maximum id), or 1 when
    /// the store is missing or holds no rows. Nothing is written when that id
    /// is already taken by an earlier row.
    pub fn append(&self, pokemon: NewPokemon) -> Result<u32, StoreError> {
        let ids = self.ids()?;
        let id = match ids.last {
            Some(last) => last + 1,
            None => 1,
        };
        if ids.taken.contains(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        let record = pokemon.with_id(id);

        let is_new = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        if !is_new && !ends_with_newline(&mut file).map_err(|source| self.io_error(source))? {
            file.write_all(b"\n").map_err(|source| self.io_error(source))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new || file_is_empty(&file))
            .from_writer(file);
        writer.serialize(CsvRow::from_record(&record))?;
        writer.flush().map_err(|source| self.io_error(source))?;

        log::info!(
            "Appended {} with id {id} to {}",
            record.names.english,
            self.path.display()
        );
        Ok(id)
    }

    /// Rewrite the store without the rows named `english` (case-insensitive).
    /// Returns how many rows were dropped.
    pub fn remove(&self, english: &str) -> Result<usize, StoreError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        let name_col = headers
            .iter()
            .position(|h| h == "name/english")
            .ok_or_else(|| StoreError::InvalidEntry("store has no name/english column".to_string()))?;

        let mut kept = Vec::new();
        let mut removed = 0;
        for row in reader.records() {
            let row = row?;
            if row
                .get(name_col)
                .is_some_and(|n| same_name(n, english))
            {
                removed += 1;
            } else {
                kept.push(row);
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(&headers)?;
        for row in &kept {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|source| self.io_error(source))?;

        log::info!(
            "Removed {removed} row(s) named {english:?} from {}",
            self.path.display()
        );
        Ok(removed)
    }

    /// Replace the store with `records`, header included.
    pub fn write_all<'a>(
        &self,
        records: impl IntoIterator<Item = &'a PokemonRecord>,
    ) -> Result<usize, StoreError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        let mut count = 0;
        for record in records {
            writer.serialize(CsvRow::from_record(record))?;
            count += 1;
        }
        writer.flush().map_err(|source| self.io_error(source))?;
        Ok(count)
    }

    /// Id column of every data row. Only the last row's id must parse.
    fn ids(&self) -> Result<StoreIds, StoreError> {
        let mut ids = StoreIds::default();
        if !self.path.exists() {
            return Ok(ids);
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut last_raw = None;
        for row in reader.records() {
            let row = row?;
            let raw = row.get(0).unwrap_or("").trim().to_string();
            if let Ok(id) = raw.parse() {
                ids.taken.insert(id);
            }
            last_raw = Some(raw);
        }
        if let Some(raw) = last_raw {
            let last = raw.parse().map_err(|_| StoreError::BadLastId(raw.clone()))?;
            ids.last = Some(last);
        }
        Ok(ids)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[derive(Debug, Default)]
struct StoreIds {
    last: Option<u32>,
    taken: HashSet<u32>,
}

fn file_is_empty(file: &File) -> bool {
    file.metadata().map(|m| m.len() == 0).unwrap_or(true)
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
