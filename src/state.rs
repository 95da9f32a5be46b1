use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::index::PokedexIndex;
use crate::data::store::{CsvStore, NewPokemon};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What a CSV edit did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The index was rebuilt from the edited store.
    Reloaded,
    /// The index comes from another source and still shows the old data.
    Diverged,
}

/// The session state, independent of the shell that drives it.
pub struct AppState {
    /// Loaded Pokédex.
    pub index: PokedexIndex,

    /// File the index was loaded from.
    pub source: PathBuf,

    /// Companion CSV edited by add/remove.
    pub store: CsvStore,
}

impl AppState {
    /// Load `source` and attach the companion store.
    pub fn open(source: &Path, store: CsvStore) -> Result<Self> {
        let index = PokedexIndex::load(source)
            .with_context(|| format!("loading Pokédex from {}", source.display()))?;
        Ok(Self {
            index,
            source: source.to_path_buf(),
            store,
        })
    }

    /// Rebuild the index from its source, replacing the current one only on success.
    pub fn reload(&mut self) -> Result<()> {
        let index = PokedexIndex::load(&self.source)
            .with_context(|| format!("reloading {}", self.source.display()))?;
        self.index = index;
        Ok(())
    }

    /// Whether the session reads the same file the store edits.
    pub fn reads_from_store(&self) -> bool {
        match (self.source.canonicalize(), self.store.path().canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.source == self.store.path(),
        }
    }

    /// Append to the companion store; returns the assigned id.
    pub fn add_pokemon(&mut self, pokemon: NewPokemon) -> Result<(u32, EditOutcome)> {
        let id = self
            .store
            .append(pokemon)
            .with_context(|| format!("appending to {}", self.store.path().display()))?;
        Ok((id, self.after_edit()?))
    }

    /// Remove rows by english name; returns the number removed.
    pub fn remove_pokemon(&mut self, english: &str) -> Result<(usize, EditOutcome)> {
        let removed = self
            .store
            .remove(english)
            .with_context(|| format!("removing {english:?} from {}", self.store.path().display()))?;
        Ok((removed, self.after_edit()?))
    }

    fn after_edit(&mut self) -> Result<EditOutcome> {
        if self.reads_from_store() {
            self.reload()?;
            Ok(EditOutcome::Reloaded)
        } else {
            log::warn!(
                "{} was edited but the session reads {}; in-memory data is unchanged",
                self.store.path().display(),
                self.source.display()
            );
            Ok(EditOutcome::Diverged)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::StoreError;

    const JSON: &str = r#"[{"id": 1, "name": {"english": "Bulbasaur"}, "type": ["Grass", "Poison"],
        "base": {"HP": 45, "Attack": 49, "Defense": 49, "Sp. Attack": 65, "Sp. Defense": 65, "Speed": 45}}]"#;

    fn entry(name: &str) -> NewPokemon {
        NewPokemon::parse_fields(&format!("{name},,,,Fire,,39,52,43,60,50,65")).unwrap()
    }

    #[test]
    fn csv_session_reloads_after_edit() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("pokedex.csv");
        let store = CsvStore::new(&csv_path);
        store.append(entry("Charmander")).unwrap();

        let mut state = AppState::open(&csv_path, store).unwrap();
        assert_eq!(state.index.len(), 1);

        let (id, outcome) = state.add_pokemon(entry("Charmeleon")).unwrap();
        assert_eq!((id, outcome), (2, EditOutcome::Reloaded));
        assert!(state.index.find_by_name("charmeleon").is_some());

        let (removed, outcome) = state.remove_pokemon("Charmander").unwrap();
        assert_eq!((removed, outcome), (1, EditOutcome::Reloaded));
        assert_eq!(state.index.len(), 1);
    }

    #[test]
    fn json_session_diverges_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("pokedex.json");
        std::fs::write(&json_path, JSON).unwrap();

        let mut state =
            AppState::open(&json_path, CsvStore::new(dir.path().join("pokedex.csv"))).unwrap();
        let (id, outcome) = state.add_pokemon(entry("Charmander")).unwrap();
        assert_eq!((id, outcome), (1, EditOutcome::Diverged));
        assert_eq!(state.index.len(), 1);
        assert!(state.index.find_by_name("Charmander").is_none());
    }

    #[test]
    fn colliding_append_leaves_store_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("pokedex.csv");
        let store = CsvStore::new(&csv_path);
        store.write_all(&[entry("Charizard").with_id(5), entry("Charmeleon").with_id(4)]).unwrap();

        let mut state = AppState::open(&csv_path, store).unwrap();
        let err = state.add_pokemon(entry("Charmander")).unwrap_err();
        assert_matches!(err.downcast_ref::<StoreError>(), Some(StoreError::DuplicateId(5)));
        assert_eq!(state.index.len(), 2);

        let reopened = PokedexIndex::load(&csv_path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert!(reopened.find_by_name("Charmander").is_none());
    }

    #[test]
    fn failed_reload_keeps_previous_index() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("pokedex.json");
        std::fs::write(&json_path, JSON).unwrap();
        let mut state =
            AppState::open(&json_path, CsvStore::new(dir.path().join("pokedex.csv"))).unwrap();

        std::fs::write(&json_path, "{not json").unwrap();
        assert_matches!(state.reload(), Err(_));
        assert_eq!(state.index.len(), 1);
    }
}
