use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;

use crate::data::index::{PokedexIndex, SortKey, StatSelection, TypeSelection};
use crate::data::model::{PokemonRecord, Stat};
use crate::data::store::NewPokemon;
use crate::state::{AppState, EditOutcome};
use crate::ui::launcher::ChartRenderer;
use crate::ui::plot::StatChart;

const MENU: &str = "
Search for a Pokemon by:
  1. Name
  2. Type
  3. Stats
  4. Compare two Pokemon
  5. Visualize Pokemon attributes
  6. Add Pokemon to the CSV store
  7. Remove Pokemon from the CSV store
  8. Pokemon name in other languages
  9. List types
 10. Sort and list
  0. Exit";

/// Whether the menu loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

// ---------------------------------------------------------------------------
// Shell – numbered menu over any reader/writer pair
// ---------------------------------------------------------------------------

/// Interactive text menu. Input, output, randomness and chart display are all
/// supplied by the caller.
pub struct Shell<R, W, G, C> {
    input: R,
    output: W,
    rng: G,
    charts: C,
}

impl<R, W, G, C> Shell<R, W, G, C>
where
    R: BufRead,
    W: Write,
    G: Rng,
    C: ChartRenderer,
{
    pub fn new(input: R, output: W, rng: G, charts: C) -> Self {
        Self {
            input,
            output,
            rng,
            charts,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self, state: &mut AppState) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.ask("Enter the number of your selection: ")? else {
                break;
            };
            let flow = match choice.to_ascii_lowercase().as_str() {
                "0" | "exit" | "quit" => Flow::Exit,
                "1" => self.search_name(&state.index)?,
                "2" => self.search_type(&state.index)?,
                "3" => self.search_stats(&state.index)?,
                "4" => self.compare(&state.index)?,
                "5" => self.visualize(&state.index)?,
                "6" => self.add(state)?,
                "7" => self.remove(state)?,
                "8" => self.localized_names(&state.index)?,
                "9" => self.list_types(&state.index)?,
                "10" => self.sort(&mut state.index)?,
                other => {
                    writeln!(self.output, "Unknown selection {other:?}.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    // -- prompts --

    /// Print `message` and read one trimmed line; `None` at end of input.
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: impl Display) -> Result<Flow> {
        writeln!(self.output, "{err}")?;
        Ok(Flow::Continue)
    }

    // -- menu entries --

    fn search_name(&mut self, index: &PokedexIndex) -> Result<Flow> {
        let Some(name) = self.ask("Enter a name: ")? else {
            return Ok(Flow::Exit);
        };
        match index.find_by_name(&name) {
            Some(record) => self.print_full(record)?,
            None => writeln!(self.output, "Pokemon not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn search_type(&mut self, index: &PokedexIndex) -> Result<Flow> {
        let Some(first) = self.ask("Enter a type: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(second) = self.ask("Enter a second type (blank for none): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(mode) = self.ask("Show all, random or top (by attack)? [random]: ")? else {
            return Ok(Flow::Exit);
        };

        let selection = match mode.to_ascii_lowercase().as_str() {
            "all" => TypeSelection::All,
            "" | "random" | "top" => {
                let Some(raw) = self.ask("Enter the maximum number of Pokemon to return: ")? else {
                    return Ok(Flow::Exit);
                };
                let Ok(limit) = raw.parse::<usize>() else {
                    return self.report(format!("{raw:?} is not a whole number."));
                };
                if mode.eq_ignore_ascii_case("top") {
                    TypeSelection::TopByAttack(limit)
                } else {
                    TypeSelection::RandomSample(limit)
                }
            }
            other => return self.report(format!("Unknown mode {other:?}.")),
        };

        let second = (!second.is_empty()).then_some(second.as_str());
        let matches = index.find_by_type(&first, second, selection, &mut self.rng);
        if matches.is_empty() {
            writeln!(self.output, "No Pokemon found.")?;
        }
        for record in matches {
            self.print_short(record)?;
        }
        Ok(Flow::Continue)
    }

    fn search_stats(&mut self, index: &PokedexIndex) -> Result<Flow> {
        let Some(stat) = self.ask(
            "Enter a stat name (HP, Attack, Defense, Sp. Attack, Sp. Defense, Speed): ",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let Some(mode) = self.ask("Pick the highest, a random one, or list all? [highest]: ")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(min) = self.ask("Enter a minimum value: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(max) = self.ask("Enter a maximum value: ")? else {
            return Ok(Flow::Exit);
        };
        let (min, max) = match (parse_bound(&min), parse_bound(&max)) {
            (Ok(min), Ok(max)) => (min, max),
            (Err(raw), _) | (_, Err(raw)) => {
                return self.report(format!("{raw:?} is not a whole number."));
            }
        };

        let selection = match mode.to_ascii_lowercase().as_str() {
            "all" => {
                match index.filter_by_stat_range(&stat, min, max) {
                    Ok(matches) if matches.is_empty() => writeln!(self.output, "No Pokemon found.")?,
                    Ok(matches) => {
                        for record in matches {
                            self.print_short(record)?;
                        }
                    }
                    Err(e) => writeln!(self.output, "{e}")?,
                }
                return Ok(Flow::Continue);
            }
            "" | "highest" => StatSelection::Highest,
            "random" => StatSelection::Random,
            other => return self.report(format!("Unknown mode {other:?}.")),
        };

        let (Some(min), Some(max)) = (min, max) else {
            return self.report("Both a minimum and a maximum are required.");
        };
        match index.search_by_stat_range(&stat, min, max, selection, &mut self.rng) {
            Ok(Some(record)) => self.print_full(record)?,
            Ok(None) => writeln!(self.output, "No Pokemon found.")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(Flow::Continue)
    }

    fn compare(&mut self, index: &PokedexIndex) -> Result<Flow> {
        let Some(first) = self.ask("Enter name of first Pokemon: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(a) = index.find_by_name(&first) else {
            return self.report("Pokemon not found.");
        };
        let Some(second) = self.ask("Enter name of second Pokemon: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(b) = index.find_by_name(&second) else {
            return self.report("Pokemon not found.");
        };
        write!(self.output, "{}", crate::data::compare::compare(a, b))?;
        Ok(Flow::Continue)
    }

    fn visualize(&mut self, index: &PokedexIndex) -> Result<Flow> {
        let Some(name) = self.ask("Enter name of Pokemon to visualize: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(record) = index.find_by_name(&name) else {
            return self.report("Pokemon not found.");
        };
        if let Err(e) = self.charts.render(&StatChart::for_record(record)) {
            log::error!("Chart failed: {e:#}");
            return self.report(format!("Could not show the chart: {e:#}"));
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, state: &mut AppState) -> Result<Flow> {
        let Some(line) = self.ask(
            "Enter Pokemon attributes separated by commas (name/english, japanese, chinese, french, \
             type/0, type/1, HP, Attack, Defense, Sp. Attack, Sp. Defense, Speed): ",
        )?
        else {
            return Ok(Flow::Exit);
        };
        let pokemon = match NewPokemon::parse_fields(&line) {
            Ok(p) => p,
            Err(e) => return self.report(e),
        };
        let name = pokemon.names.english.clone();
        match state.add_pokemon(pokemon) {
            Ok((id, outcome)) => {
                writeln!(self.output, "Added {name} with id {id} to {}.", state.store.path().display())?;
                self.note_outcome(outcome)?;
            }
            Err(e) => writeln!(self.output, "{e:#}")?,
        }
        Ok(Flow::Continue)
    }

    fn remove(&mut self, state: &mut AppState) -> Result<Flow> {
        let Some(name) = self.ask("Enter Pokemon name for deletion: ")? else {
            return Ok(Flow::Exit);
        };
        if state.index.find_by_name(&name).is_none() {
            return self.report("Pokemon not found.");
        }
        match state.remove_pokemon(&name) {
            Ok((0, _)) => writeln!(
                self.output,
                "{name} is not in {}.",
                state.store.path().display()
            )?,
            Ok((removed, outcome)) => {
                writeln!(self.output, "Removed {removed} row(s) named {name}.")?;
                self.note_outcome(outcome)?;
            }
            Err(e) => writeln!(self.output, "{e:#}")?,
        }
        Ok(Flow::Continue)
    }

    fn note_outcome(&mut self, outcome: EditOutcome) -> Result<()> {
        if outcome == EditOutcome::Diverged {
            writeln!(
                self.output,
                "The loaded Pokédex is unchanged; open the CSV store to see the edit."
            )?;
        }
        Ok(())
    }

    fn localized_names(&mut self, index: &PokedexIndex) -> Result<Flow> {
        let Some(name) = self.ask("Enter a Pokemon name in English: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(names) = index.localized_names(&name) else {
            return self.report(format!("{name} not found in the data."));
        };
        let show = |n: &Option<String>| n.clone().unwrap_or_else(|| "-".to_string());
        writeln!(self.output, "Japanese: {}", show(&names.japanese))?;
        writeln!(self.output, "Chinese: {}", show(&names.chinese))?;
        writeln!(self.output, "French: {}", show(&names.french))?;
        Ok(Flow::Continue)
    }

    fn list_types(&mut self, index: &PokedexIndex) -> Result<Flow> {
        let join = |types: &[crate::data::model::PokemonType]| {
            types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
        };
        writeln!(self.output, "Types in this Pokédex: {}", join(&index.observed_types()))?;
        writeln!(self.output, "All types: {}", join(PokedexIndex::canonical_types()))?;
        Ok(Flow::Continue)
    }

    fn sort(&mut self, index: &mut PokedexIndex) -> Result<Flow> {
        let Some(raw) = self.ask("Sort by (id, name, type, or a stat name): ")? else {
            return Ok(Flow::Exit);
        };
        let key: SortKey = match raw.parse() {
            Ok(key) => key,
            Err(e) => return self.report(e),
        };
        index.sort_by(key);
        for record in index.records() {
            match key {
                SortKey::Stat(stat) => writeln!(
                    self.output,
                    "{:>4}  {:<12} {}: {}",
                    record.id,
                    record.english_name(),
                    stat.label(),
                    record.stat(stat)
                )?,
                _ => writeln!(
                    self.output,
                    "{:>4}  {:<12} {}",
                    record.id,
                    record.english_name(),
                    record.type_list()
                )?,
            }
        }
        Ok(Flow::Continue)
    }

    // -- record printing --

    fn print_short(&mut self, record: &PokemonRecord) -> Result<()> {
        writeln!(self.output, "ID: {}", record.id)?;
        writeln!(self.output, "Name: {}", record.english_name())?;
        writeln!(self.output, "Type: {}", record.type_list())?;
        Ok(())
    }

    fn print_full(&mut self, record: &PokemonRecord) -> Result<()> {
        self.print_short(record)?;
        for stat in Stat::ALL {
            let label = match stat {
                Stat::SpAttack => "Special Attack",
                Stat::SpDefense => "Special Defense",
                other => other.label(),
            };
            writeln!(self.output, "{label}: {}", record.stat(stat))?;
        }
        Ok(())
    }
}

/// Blank means unbounded; anything else must be an integer.
fn parse_bound(raw: &str) -> std::result::Result<Option<i64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::store::CsvStore;

    const JSON: &str = r#"[
        {"id": 1, "name": {"english": "Bulbasaur", "japanese": "フシギダネ", "french": "Bulbizarre"},
         "type": ["Grass", "Poison"],
         "base": {"HP": 45, "Attack": 49, "Defense": 49, "Sp. Attack": 65, "Sp. Defense": 65, "Speed": 45}},
        {"id": 4, "name": {"english": "Charmander"}, "type": ["Fire"],
         "base": {"HP": 39, "Attack": 52, "Defense": 43, "Sp. Attack": 60, "Sp. Defense": 50, "Speed": 65}},
        {"id": 7, "name": {"english": "Squirtle"}, "type": ["Water"],
         "base": {"HP": 44, "Attack": 48, "Defense": 65, "Sp. Attack": 50, "Sp. Defense": 64, "Speed": 43}}
    ]"#;

    #[derive(Default)]
    struct RecordingCharts {
        shown: Vec<StatChart>,
    }

    impl ChartRenderer for RecordingCharts {
        fn render(&mut self, chart: &StatChart) -> Result<()> {
            self.shown.push(chart.clone());
            Ok(())
        }
    }

    struct Session {
        _dir: tempfile::TempDir,
        state: AppState,
    }

    fn session() -> Session {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("pokedex.json");
        std::fs::write(&json_path, JSON).unwrap();
        let state = AppState::open(&json_path, CsvStore::new(dir.path().join("pokedex.csv"))).unwrap();
        Session { _dir: dir, state }
    }

    fn run(state: &mut AppState, input: &str) -> (String, RecordingCharts) {
        let mut shell = Shell::new(
            Cursor::new(input.to_string()),
            Vec::new(),
            StdRng::seed_from_u64(5),
            RecordingCharts::default(),
        );
        shell.run(state).unwrap();
        let Shell { output, charts, .. } = shell;
        (String::from_utf8(output).unwrap(), charts)
    }

    #[test]
    fn name_lookup_prints_all_stats() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "1\nbulbasaur\n0\n");
        assert!(out.contains("ID: 1\nName: Bulbasaur\nType: Grass, Poison\nHP: 45\nAttack: 49"));
        assert!(out.contains("Special Attack: 65"));
    }

    #[test]
    fn missing_name_is_reported() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "1\nPikachu\n0\n");
        assert!(out.contains("Pokemon not found."));
    }

    #[test]
    fn invalid_stat_keeps_the_loop_running() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "3\natack\nhighest\n0\n100\n1\nsquirtle\n0\n");
        assert!(out.contains("unrecognized stat name \"atack\""));
        assert!(out.contains("Name: Squirtle"));
    }

    #[test]
    fn stat_search_lists_or_picks() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "3\nhp\nall\n40\n45\n0\n");
        let names: Vec<&str> = out.lines().filter(|l| l.starts_with("Name: ")).collect();
        assert_eq!(names, vec!["Name: Bulbasaur", "Name: Squirtle"]);

        let (out, _) = run(&mut s.state, "3\nspeed\n\n200\n255\n0\n");
        assert!(out.contains("No Pokemon found."));
    }

    #[test]
    fn type_search_with_two_types() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "2\ngrass\npoison\nall\n0\n");
        assert!(out.contains("Name: Bulbasaur"));
        assert!(!out.contains("Name: Charmander"));
    }

    #[test]
    fn compare_prints_report() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "4\nBulbasaur\nSquirtle\n0\n");
        assert!(out.contains("Bulbasaur has higher hp: 45 vs 44"));
        assert!(out.contains("Squirtle has higher defense: 65 vs 49"));
    }

    #[test]
    fn visualize_hands_chart_to_renderer() {
        let mut s = session();
        let (_, charts) = run(&mut s.state, "5\ncharmander\n0\n");
        assert_eq!(charts.shown.len(), 1);
        assert_eq!(charts.shown[0].title, "Charmander");
        assert_eq!(charts.shown[0].values(), vec![39, 52, 43, 60, 50, 65]);
    }

    #[test]
    fn localized_names_show_missing_as_dash() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "8\nBulbasaur\n8\nMew\n0\n");
        assert!(out.contains("Japanese: フシギダネ\nChinese: -\nFrench: Bulbizarre"));
        assert!(out.contains("Mew not found in the data."));
    }

    #[test]
    fn sort_by_stat_lists_strongest_first() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "10\nhp\n0\n");
        let order: Vec<u32> = s.state.index.records().iter().map(|r| r.id).collect();
        assert_eq!(order, vec![1, 7, 4]);
        assert!(out.contains("HP: 45"));
    }

    #[test]
    fn add_then_remove_edits_the_store() {
        let mut s = session();
        let (out, _) = run(
            &mut s.state,
            "6\nBulbasaur,,,,Grass,Poison,45,49,49,65,65,45\n7\nBulbasaur\n0\n",
        );
        assert!(out.contains("Added Bulbasaur with id 1"));
        assert!(out.contains("The loaded Pokédex is unchanged"));
        assert!(out.contains("Removed 1 row(s) named Bulbasaur."));
    }

    #[test]
    fn list_types_shows_observed_and_canonical() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "9\n0\n");
        assert!(out.contains("Types in this Pokédex: Fire, Grass, Poison, Water"));
        assert!(out.contains("All types: Bug, Dark, Dragon"));
    }

    #[test]
    fn end_of_input_exits() {
        let mut s = session();
        let (out, _) = run(&mut s.state, "1\n");
        assert!(out.ends_with("Enter a name: "));
    }
}
