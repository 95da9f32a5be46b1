// Shared fixtures for integration tests
#![allow(dead_code)]

use std::path::PathBuf;

use pokedex::data::{Names, PokedexIndex, PokemonRecord, PokemonType, Stats};

/// Path of the bundled sample Pokédex.
pub fn sample_json() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/pokedex.json")
}

/// Record with the given hp; the other stats are fixed.
pub fn record(id: u32, name: &str, types: &[PokemonType], hp: u32) -> PokemonRecord {
    PokemonRecord {
        id,
        names: Names::english(name),
        types: types.to_vec(),
        stats: Stats {
            hp,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed: 50,
        },
    }
}

/// Bulbasaur (grass/poison, 45 hp), Charmander (fire, 39), Squirtle (water, 44).
pub fn starters() -> PokedexIndex {
    use PokemonType::*;
    PokedexIndex::from_records(vec![
        record(1, "Bulbasaur", &[Grass, Poison], 45),
        record(4, "Charmander", &[Fire], 39),
        record(7, "Squirtle", &[Water], 44),
    ])
    .expect("starter fixture is valid")
}

pub fn names(records: &[&PokemonRecord]) -> Vec<String> {
    records.iter().map(|r| r.names.english.clone()).collect()
}
