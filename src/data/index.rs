use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use super::compare::{compare, ComparisonReport};
use super::error::{LoadError, QueryError};
use super::filter::{filtered_indices, StatRange};
use super::loader::load_file;
use super::model::{same_name, Names, PokemonRecord, PokemonType, Stat};

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// How a type search reduces its matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSelection {
    /// Every match in collection order.
    All,
    /// Up to `n` distinct matches chosen uniformly at random.
    RandomSample(usize),
    /// The `n` matches with the highest attack.
    TopByAttack(usize),
}

/// How a stat range search picks its single result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatSelection {
    /// Highest value of the searched stat; first in collection order on ties.
    Highest,
    /// Any match, uniformly.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Key for [`PokedexIndex::sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    PrimaryType,
    Stat(Stat),
}

impl SortKey {
    /// Identity keys sort ascending, stats strongest first.
    pub fn direction(self) -> SortDirection {
        match self {
            SortKey::Id | SortKey::Name | SortKey::PrimaryType => SortDirection::Ascending,
            SortKey::Stat(_) => SortDirection::Descending,
        }
    }

    fn compare(self, a: &PokemonRecord, b: &PokemonRecord) -> Ordering {
        let ascending = match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.names.english.cmp(&b.names.english),
            SortKey::PrimaryType => a.primary_type().cmp(&b.primary_type()),
            SortKey::Stat(stat) => a.stat(stat).cmp(&b.stat(stat)),
        };
        match self.direction() {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" | "english" => Ok(SortKey::Name),
            "type" | "primary-type" | "primary_type" => Ok(SortKey::PrimaryType),
            _ => s
                .parse::<Stat>()
                .map(SortKey::Stat)
                .map_err(|_| QueryError::InvalidSortKey(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PokedexIndex – the loaded collection and its queries
// ---------------------------------------------------------------------------

/// In-memory Pokédex. Records never change after load; only their order does,
/// through [`PokedexIndex::sort_by`], which needs exclusive access.
#[derive(Debug, Clone, Default)]
pub struct PokedexIndex {
    records: Vec<PokemonRecord>,
}

impl PokedexIndex {
    /// Load a `.json` or `.csv` source.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let index = PokedexIndex::from_records(load_file(path)?)?;
        log::info!("Loaded {} Pokémon from {}", index.len(), path.display());
        Ok(index)
    }

    /// Build from already parsed records, enforcing unique ids.
    pub fn from_records(records: Vec<PokemonRecord>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| LoadError::Malformed { index, reason })?;
            if !seen.insert(record.id) {
                return Err(LoadError::DuplicateId(record.id));
            }
        }
        Ok(PokedexIndex { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in their current order.
    pub fn records(&self) -> &[PokemonRecord] {
        &self.records
    }

    /// Case-insensitive exact match on the english name; first in order wins.
    pub fn find_by_name(&self, name: &str) -> Option<&PokemonRecord> {
        self.records
            .iter()
            .find(|r| same_name(&r.names.english, name))
    }

    /// Records having `type_tag`, and `second` as well when given.
    ///
    /// Unknown tags match nothing. Random sampling shuffles the full match set
    /// before truncating.
    pub fn find_by_type<R: Rng + ?Sized>(
        &self,
        type_tag: &str,
        second: Option<&str>,
        selection: TypeSelection,
        rng: &mut R,
    ) -> Vec<&PokemonRecord> {
        let Some(first) = PokemonType::parse(type_tag) else {
            log::debug!("Unknown type {type_tag:?}");
            return Vec::new();
        };
        let second = match second.map(str::trim).filter(|s| !s.is_empty()) {
            Some(tag) => match PokemonType::parse(tag) {
                Some(t) => Some(t),
                None => {
                    log::debug!("Unknown type {tag:?}");
                    return Vec::new();
                }
            },
            None => None,
        };

        let mut matches: Vec<&PokemonRecord> = self
            .records
            .iter()
            .filter(|r| r.has_type(first) && second.map_or(true, |t| r.has_type(t)))
            .collect();
        log::debug!(
            "{} Pokémon match type {first}{}",
            matches.len(),
            second.map(|t| format!("/{t}")).unwrap_or_default()
        );

        match selection {
            TypeSelection::All => {}
            TypeSelection::RandomSample(limit) => {
                matches.shuffle(rng);
                matches.truncate(limit);
            }
            TypeSelection::TopByAttack(limit) => {
                matches.sort_by(|a, b| b.stats.attack.cmp(&a.stats.attack));
                matches.truncate(limit);
            }
        }
        matches
    }

    /// Every record whose `stat_name` lies in `[min, max]`, in order.
    pub fn filter_by_stat_range(
        &self,
        stat_name: &str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Result<Vec<&PokemonRecord>, QueryError> {
        let stat: Stat = stat_name.parse()?;
        Ok(self.filter(&StatRange::new(stat, min, max)))
    }

    pub fn filter(&self, range: &StatRange) -> Vec<&PokemonRecord> {
        filtered_indices(&self.records, range)
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    /// One record from the `[min, max]` matches, or `None` when nothing matches.
    pub fn search_by_stat_range<R: Rng + ?Sized>(
        &self,
        stat_name: &str,
        min: i64,
        max: i64,
        selection: StatSelection,
        rng: &mut R,
    ) -> Result<Option<&PokemonRecord>, QueryError> {
        let stat: Stat = stat_name.parse()?;
        let matches = self.filter(&StatRange::new(stat, Some(min), Some(max)));
        if matches.is_empty() {
            return Ok(None);
        }

        let picked = match selection {
            StatSelection::Highest => matches
                .into_iter()
                .reduce(|best, r| if r.stat(stat) > best.stat(stat) { r } else { best }),
            StatSelection::Random => {
                let i = rng.random_range(0..matches.len());
                Some(matches[i])
            }
        };
        Ok(picked)
    }

    /// Reorder the collection in place. Stable.
    pub fn sort_by(&mut self, key: SortKey) {
        self.records.sort_by(|a, b| key.compare(a, b));
    }

    /// Ordered view of the collection, leaving it untouched.
    pub fn sorted_by(&self, key: SortKey) -> Vec<&PokemonRecord> {
        let mut view: Vec<&PokemonRecord> = self.records.iter().collect();
        view.sort_by(|a, b| key.compare(a, b));
        view
    }

    /// Compare two records by english name. `None` if either is missing.
    pub fn compare_by_name(&self, first: &str, second: &str) -> Option<ComparisonReport> {
        Some(compare(self.find_by_name(first)?, self.find_by_name(second)?))
    }

    /// Distinct types present in the data, sorted.
    pub fn observed_types(&self) -> Vec<PokemonType> {
        self.records
            .iter()
            .flat_map(|r| r.types.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The fixed 18-type vocabulary.
    pub fn canonical_types() -> &'static [PokemonType] {
        &PokemonType::ALL
    }

    pub fn localized_names(&self, english: &str) -> Option<&Names> {
        self.find_by_name(english).map(|r| &r.names)
    }
}
