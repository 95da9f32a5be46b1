//! End-to-end behaviour of the query index over fixtures and the bundled
//! sample data.

mod common;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{names, sample_json, starters};
use pokedex::data::compare::{compare, Winner};
use pokedex::data::index::{PokedexIndex, SortKey, StatSelection, TypeSelection};
use pokedex::data::store::CsvStore;
use pokedex::data::{QueryError, Stat};

#[test]
fn starter_scenario() {
    let mut index = starters();
    let mut rng = StdRng::seed_from_u64(11);

    let grass = index.find_by_type("grass", None, TypeSelection::All, &mut rng);
    assert_eq!(names(&grass), vec!["Bulbasaur"]);

    let hp = index.filter_by_stat_range("hp", Some(40), Some(45)).unwrap();
    assert_eq!(names(&hp), vec!["Bulbasaur", "Squirtle"]);

    index.sort_by(SortKey::Stat(Stat::Hp));
    let order: Vec<(&str, u32)> = index
        .records()
        .iter()
        .map(|r| (r.english_name(), r.stats.hp))
        .collect();
    assert_eq!(order, vec![("Bulbasaur", 45), ("Squirtle", 44), ("Charmander", 39)]);
}

#[test]
fn misspelled_stat_does_not_disturb_the_index() {
    let index = starters();
    let before = index.records().to_vec();
    assert_eq!(
        index.filter_by_stat_range("atack", Some(1), Some(2)),
        Err(QueryError::InvalidStat("atack".to_string()))
    );
    assert_eq!(index.records(), before.as_slice());
}

#[test]
fn sample_data_loads_with_all_fields() {
    let index = PokedexIndex::load(&sample_json()).unwrap();
    assert_eq!(index.len(), 10);

    let charizard = index.find_by_name("CHARIZARD").unwrap();
    assert_eq!(charizard.id, 6);
    assert_eq!(charizard.type_list(), "Fire, Flying");
    assert_eq!(charizard.stats.values(), [78, 84, 78, 109, 85, 100]);
    assert_eq!(charizard.names.french.as_deref(), Some("Dracaufeu"));

    assert_eq!(
        index.localized_names("pikachu").and_then(|n| n.japanese.clone()),
        Some("ピカチュウ".to_string())
    );
}

#[test]
fn sample_queries() {
    let index = PokedexIndex::load(&sample_json()).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let top = index.find_by_type("water", None, TypeSelection::TopByAttack(2), &mut rng);
    assert_eq!(names(&top), vec!["Blastoise", "Wartortle"]);

    let fire_flying = index.find_by_type("Fire", Some("Flying"), TypeSelection::All, &mut rng);
    assert_eq!(names(&fire_flying), vec!["Charizard"]);

    let fastest = index
        .search_by_stat_range("speed", 0, 255, StatSelection::Highest, &mut rng)
        .unwrap();
    assert_eq!(fastest.map(|r| r.english_name()), Some("Charizard"));

    let sample = index.find_by_type("Grass", None, TypeSelection::RandomSample(2), &mut rng);
    assert_eq!(sample.len(), 2);
    assert!(sample[0].id != sample[1].id);
}

#[test]
fn compare_known_stats() {
    let index = starters();
    let a = index.find_by_name("Bulbasaur").unwrap();
    let mut b = index.find_by_name("Squirtle").unwrap().clone();
    b.stats.hp = 60;

    let report = compare(a, &b);
    let hp = report.get(Stat::Hp).unwrap();
    assert_eq!((hp.winner, hp.first, hp.second), (Winner::Second, 45, 60));
    let attack = report.get(Stat::Attack).unwrap();
    assert_eq!((attack.winner, attack.first), (Winner::Tie, 50));
}

#[test]
fn csv_export_loads_back_identically() {
    let from_json = PokedexIndex::load(&sample_json()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("pokedex.csv");
    let written = CsvStore::new(&csv_path).write_all(from_json.records()).unwrap();
    assert_eq!(written, from_json.len());

    let from_csv = PokedexIndex::load(&csv_path).unwrap();
    assert_eq!(from_csv.records(), from_json.records());
}

#[test]
fn empty_collection_answers_not_found() {
    let index = PokedexIndex::from_records(Vec::new()).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(index.find_by_name("Bulbasaur").is_none());
    assert!(index.find_by_type("Grass", None, TypeSelection::All, &mut rng).is_empty());
    assert_eq!(
        index.search_by_stat_range("hp", 0, 100, StatSelection::Random, &mut rng),
        Ok(None)
    );
    assert!(index.observed_types().is_empty());
}
