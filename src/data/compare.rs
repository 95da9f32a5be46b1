use std::cmp::Ordering;
use std::fmt;

use super::model::{PokemonRecord, Stat};

/// Which side of a comparison holds the higher value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    First,
    Second,
    Tie,
}

/// One stat of a comparison, carrying both values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatComparison {
    pub stat: Stat,
    pub first: u32,
    pub second: u32,
    pub winner: Winner,
}

/// Stat-by-stat comparison of two records, in [`Stat::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub first_name: String,
    pub second_name: String,
    pub stats: Vec<StatComparison>,
}

impl ComparisonReport {
    pub fn get(&self, stat: Stat) -> Option<&StatComparison> {
        self.stats.iter().find(|c| c.stat == stat)
    }
}

/// Compare `a` and `b` on all six stats.
pub fn compare(a: &PokemonRecord, b: &PokemonRecord) -> ComparisonReport {
    let stats = Stat::ALL
        .iter()
        .map(|&stat| {
            let (first, second) = (a.stat(stat), b.stat(stat));
            let winner = match first.cmp(&second) {
                Ordering::Greater => Winner::First,
                Ordering::Less => Winner::Second,
                Ordering::Equal => Winner::Tie,
            };
            StatComparison {
                stat,
                first,
                second,
                winner,
            }
        })
        .collect();

    ComparisonReport {
        first_name: a.names.english.clone(),
        second_name: b.names.english.clone(),
        stats,
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comparing {} and {}...", self.first_name, self.second_name)?;
        for c in &self.stats {
            match c.winner {
                Winner::First => writeln!(
                    f,
                    "{} has higher {}: {} vs {}",
                    self.first_name, c.stat, c.first, c.second
                )?,
                Winner::Second => writeln!(
                    f,
                    "{} has higher {}: {} vs {}",
                    self.second_name, c.stat, c.second, c.first
                )?,
                Winner::Tie => writeln!(
                    f,
                    "{} and {} have the same {}: {}",
                    self.first_name, self.second_name, c.stat, c.first
                )?,
            }
        }
        Ok(())
    }
}
