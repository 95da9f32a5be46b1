use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::QueryError;

// ---------------------------------------------------------------------------
// PokemonType – the fixed elemental vocabulary
// ---------------------------------------------------------------------------

/// One of the 18 elemental types.
///
/// Variants are declared in alphabetical order so the derived `Ord` matches
/// lexicographic ordering of the tags. Tags deserialize through
/// [`PokemonType::parse`], so `"grass"` and `"Grass"` are the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum PokemonType {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

impl PokemonType {
    /// The canonical type list, independent of any loaded data.
    pub const ALL: [PokemonType; 18] = [
        PokemonType::Bug,
        PokemonType::Dark,
        PokemonType::Dragon,
        PokemonType::Electric,
        PokemonType::Fairy,
        PokemonType::Fighting,
        PokemonType::Fire,
        PokemonType::Flying,
        PokemonType::Ghost,
        PokemonType::Grass,
        PokemonType::Ground,
        PokemonType::Ice,
        PokemonType::Normal,
        PokemonType::Poison,
        PokemonType::Psychic,
        PokemonType::Rock,
        PokemonType::Steel,
        PokemonType::Water,
    ];

    /// Tag as written in the source files.
    pub fn as_str(self) -> &'static str {
        match self {
            PokemonType::Bug => "Bug",
            PokemonType::Dark => "Dark",
            PokemonType::Dragon => "Dragon",
            PokemonType::Electric => "Electric",
            PokemonType::Fairy => "Fairy",
            PokemonType::Fighting => "Fighting",
            PokemonType::Fire => "Fire",
            PokemonType::Flying => "Flying",
            PokemonType::Ghost => "Ghost",
            PokemonType::Grass => "Grass",
            PokemonType::Ground => "Ground",
            PokemonType::Ice => "Ice",
            PokemonType::Normal => "Normal",
            PokemonType::Poison => "Poison",
            PokemonType::Psychic => "Psychic",
            PokemonType::Rock => "Rock",
            PokemonType::Steel => "Steel",
            PokemonType::Water => "Water",
        }
    }

    /// Case-insensitive lookup of a type tag.
    pub fn parse(tag: &str) -> Option<PokemonType> {
        let tag = tag.trim();
        PokemonType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
    }
}

impl TryFrom<String> for PokemonType {
    type Error = String;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        PokemonType::parse(&tag).ok_or_else(|| format!("unknown type {tag:?}"))
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stat – explicit stat key with an exhaustive accessor
// ---------------------------------------------------------------------------

/// One of the six base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

impl Stat {
    /// Fixed stat order used by comparisons and charts.
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpAttack,
        Stat::SpDefense,
        Stat::Speed,
    ];

    /// Short snake-case key, e.g. `sp_attack`.
    pub fn key(self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::SpAttack => "sp_attack",
            Stat::SpDefense => "sp_defense",
            Stat::Speed => "speed",
        }
    }

    /// Label as used by the `base` object of the source files.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpAttack => "Sp. Attack",
            Stat::SpDefense => "Sp. Defense",
            Stat::Speed => "Speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Stat {
    type Err = QueryError;

    /// Accepts `hp`, `Sp. Attack`, `sp_attack`, `special-attack`, ... in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "hp" => Ok(Stat::Hp),
            "attack" => Ok(Stat::Attack),
            "defense" => Ok(Stat::Defense),
            "spattack" | "specialattack" => Ok(Stat::SpAttack),
            "spdefense" | "specialdefense" => Ok(Stat::SpDefense),
            "speed" => Ok(Stat::Speed),
            _ => Err(QueryError::InvalidStat(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Stats / Names – fixed-shape record parts
// ---------------------------------------------------------------------------

/// The six base stats, laid out like the `base` object of the JSON source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "HP")]
    pub hp: u32,
    #[serde(rename = "Attack")]
    pub attack: u32,
    #[serde(rename = "Defense")]
    pub defense: u32,
    #[serde(rename = "Sp. Attack")]
    pub sp_attack: u32,
    #[serde(rename = "Sp. Defense")]
    pub sp_defense: u32,
    #[serde(rename = "Speed")]
    pub speed: u32,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpAttack => self.sp_attack,
            Stat::SpDefense => self.sp_defense,
            Stat::Speed => self.speed,
        }
    }

    /// Values in [`Stat::ALL`] order.
    pub fn values(&self) -> [u32; 6] {
        Stat::ALL.map(|stat| self.get(stat))
    }
}

/// Display names, one field per supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Names {
    pub english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,
}

impl Names {
    /// Names with only the mandatory english entry.
    pub fn english(name: impl Into<String>) -> Self {
        Names {
            english: name.into(),
            japanese: None,
            chinese: None,
            french: None,
        }
    }
}

/// Name equality used by every lookup: surrounding whitespace is ignored and
/// case is folded with Unicode lowercase.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// PokemonRecord – one entry of the Pokédex
// ---------------------------------------------------------------------------

/// A single Pokémon, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    #[serde(rename = "name")]
    pub names: Names,
    /// One or two types; the first is the primary type.
    #[serde(rename = "type")]
    pub types: Vec<PokemonType>,
    #[serde(rename = "base")]
    pub stats: Stats,
}

impl PokemonRecord {
    pub fn english_name(&self) -> &str {
        &self.names.english
    }

    pub fn primary_type(&self) -> Option<PokemonType> {
        self.types.first().copied()
    }

    pub fn has_type(&self, t: PokemonType) -> bool {
        self.types.contains(&t)
    }

    pub fn stat(&self, stat: Stat) -> u32 {
        self.stats.get(stat)
    }

    /// Types joined as `Grass, Poison`.
    pub fn type_list(&self) -> String {
        self.types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check the per-record invariants; the reason is reported on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.id == 0 {
            return Err("id must be positive".to_string());
        }
        if self.names.english.trim().is_empty() {
            return Err("english name is empty".to_string());
        }
        match self.types.len() {
            1 | 2 => Ok(()),
            n => Err(format!("expected 1 or 2 types, found {n}")),
        }
    }
}
