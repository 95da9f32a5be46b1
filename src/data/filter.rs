use super::model::{PokemonRecord, Stat};

// ---------------------------------------------------------------------------
// StatRange – inclusive bounds on one stat
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` on a single stat. A missing bound is unbounded on
/// that side. Bounds are signed so that negative or inverted ranges are
/// representable; they simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRange {
    pub stat: Stat,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl StatRange {
    pub fn new(stat: Stat, min: Option<i64>, max: Option<i64>) -> Self {
        StatRange { stat, min, max }
    }

    pub fn contains(&self, record: &PokemonRecord) -> bool {
        let value = i64::from(record.stat(self.stat));
        self.min.map_or(true, |min| min <= value) && self.max.map_or(true, |max| value <= max)
    }
}

/// Return indices of records that pass the range, in collection order.
pub fn filtered_indices(records: &[PokemonRecord], range: &StatRange) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| range.contains(record))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{Names, PokemonType, Stats};

    fn with_speed(id: u32, speed: u32) -> PokemonRecord {
        PokemonRecord {
            id,
            names: Names::english(format!("Mon{id}")),
            types: vec![PokemonType::Normal],
            stats: Stats {
                hp: 50,
                attack: 50,
                defense: 50,
                sp_attack: 50,
                sp_defense: 50,
                speed,
            },
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let records: Vec<_> = [10, 20, 30, 40].iter().zip(1..).map(|(&s, id)| with_speed(id, s)).collect();
        let range = StatRange::new(Stat::Speed, Some(20), Some(30));
        assert_eq!(filtered_indices(&records, &range), vec![1, 2]);
    }

    #[test]
    fn open_bounds() {
        let records: Vec<_> = [10, 20, 30].iter().zip(1..).map(|(&s, id)| with_speed(id, s)).collect();
        assert_eq!(
            filtered_indices(&records, &StatRange::new(Stat::Speed, Some(20), None)),
            vec![1, 2]
        );
        assert_eq!(
            filtered_indices(&records, &StatRange::new(Stat::Speed, None, Some(10))),
            vec![0]
        );
        assert_eq!(filtered_indices(&records, &StatRange::new(Stat::Speed, None, None)), vec![0, 1, 2]);
    }

    #[test]
    fn inverted_and_negative_ranges_match_nothing() {
        let records = vec![with_speed(1, 0), with_speed(2, 50)];
        assert!(filtered_indices(&records, &StatRange::new(Stat::Speed, Some(60), Some(10))).is_empty());
        assert!(filtered_indices(&records, &StatRange::new(Stat::Speed, Some(-10), Some(-1))).is_empty());
    }
}
