//! Seasonal-food lookup data.
//!
//! The year is divided into 24 half-month "seasons" (season 1 is early
//! January, season 24 late December). Each food lists, per state, the
//! inclusive season spans in which it is harvested; spans may wrap the
//! year end (e.g. 23..=4).
//!
//! The table ships embedded in the binary and is parsed once at startup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of half-month seasons in a year.
pub const SEASONS_PER_YEAR: u8 = 24;

/// A food item as served by the API and templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Food {
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// One row of the embedded table: a food plus its per-state harvest spans.
#[derive(Debug, Deserialize)]
struct FoodRecord {
    name: String,
    slug: String,
    #[serde(default)]
    description: String,
    /// state code → inclusive (start, end) season spans.
    availability: HashMap<String, Vec<(u8, u8)>>,
}

impl FoodRecord {
    fn food(&self) -> Food {
        Food {
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
        }
    }
}

/// Lookup index over the embedded seasonal table.
pub struct SeasonalIndex {
    records: Vec<FoodRecord>,
}

pub fn is_valid_season(season: u8) -> bool {
    (1..=SEASONS_PER_YEAR).contains(&season)
}

/// The season after `season`, wrapping 24 back to 1.
pub fn next_season(season: u8) -> u8 {
    if season >= SEASONS_PER_YEAR {
        1
    } else {
        season + 1
    }
}

fn span_contains(span: (u8, u8), season: u8) -> bool {
    let (start, end) = span;
    if start <= end {
        (start..=end).contains(&season)
    } else {
        // wraps the year end
        season >= start || season <= end
    }
}

impl SeasonalIndex {
    /// Parse the table embedded in the binary.
    pub fn from_embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(include_str!("../../data/foods.json"))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<FoodRecord> = serde_json::from_str(raw)?;
        Ok(Self { records })
    }

    /// Every food in the table, sorted by name.
    pub fn foods(&self) -> Vec<Food> {
        let mut foods: Vec<Food> = self.records.iter().map(FoodRecord::food).collect();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        foods
    }

    /// Foods harvested in `season` in at least one state.
    pub fn by_season(&self, season: u8) -> Vec<Food> {
        self.collect(|record| {
            record
                .availability
                .values()
                .flatten()
                .any(|span| span_contains(*span, season))
        })
    }

    /// Foods harvested at any time of year in `state`.
    pub fn by_state(&self, state: &str) -> Vec<Food> {
        let state = state.to_uppercase();
        self.collect(|record| record.availability.contains_key(&state))
    }

    /// Foods harvested in `state` during `season`.
    pub fn by_state_and_season(&self, state: &str, season: u8) -> Vec<Food> {
        let state = state.to_uppercase();
        self.collect(|record| {
            record
                .availability
                .get(&state)
                .is_some_and(|spans| spans.iter().any(|span| span_contains(*span, season)))
        })
    }

    /// Every state code appearing in the table, sorted.
    pub fn valid_states(&self) -> Vec<String> {
        let mut states: Vec<String> = self
            .records
            .iter()
            .flat_map(|record| record.availability.keys().cloned())
            .collect();
        states.sort();
        states.dedup();
        states
    }

    pub fn is_valid_state(&self, state: &str) -> bool {
        let state = state.to_uppercase();
        self.records
            .iter()
            .any(|record| record.availability.contains_key(&state))
    }

    fn collect(&self, matches: impl Fn(&FoodRecord) -> bool) -> Vec<Food> {
        let mut foods: Vec<Food> = self
            .records
            .iter()
            .filter(|record| matches(record))
            .map(FoodRecord::food)
            .collect();
        foods.sort_by(|a, b| a.name.cmp(&b.name));
        foods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SeasonalIndex {
        SeasonalIndex::from_json(
            r#"[
                {
                    "name": "Strawberries",
                    "slug": "strawberries",
                    "availability": { "CA": [[7, 14]], "NY": [[11, 14]] }
                },
                {
                    "name": "Kale",
                    "slug": "kale",
                    "availability": { "CA": [[1, 8], [19, 24]], "VT": [[11, 20]] }
                },
                {
                    "name": "Citrus",
                    "slug": "citrus",
                    "availability": { "CA": [[23, 4]] }
                }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn embedded_table_parses() {
        let index = SeasonalIndex::from_embedded().unwrap();
        assert!(!index.foods().is_empty());
        assert!(!index.valid_states().is_empty());
    }

    #[test]
    fn by_state_and_season_respects_spans() {
        let index = index();
        let foods = index.by_state_and_season("CA", 7);
        let slugs: Vec<&str> = foods.iter().map(|f| f.slug.as_str()).collect();
        assert_eq!(slugs, vec!["kale", "strawberries"]);
    }

    #[test]
    fn state_lookup_is_case_insensitive() {
        let index = index();
        assert_eq!(index.by_state("vt").len(), 1);
        assert!(index.is_valid_state("ca"));
        assert!(!index.is_valid_state("ZZ"));
    }

    #[test]
    fn wrapping_span_covers_year_end() {
        let index = index();
        assert!(index
            .by_state_and_season("CA", 24)
            .iter()
            .any(|f| f.slug == "citrus"));
        assert!(index
            .by_state_and_season("CA", 2)
            .iter()
            .any(|f| f.slug == "citrus"));
        assert!(!index
            .by_state_and_season("CA", 10)
            .iter()
            .any(|f| f.slug == "citrus"));
    }

    #[test]
    fn season_arithmetic_wraps() {
        assert_eq!(next_season(1), 2);
        assert_eq!(next_season(24), 1);
        assert!(is_valid_season(1));
        assert!(is_valid_season(24));
        assert!(!is_valid_season(0));
        assert!(!is_valid_season(25));
    }

    #[test]
    fn valid_states_are_sorted_and_unique() {
        assert_eq!(index().valid_states(), vec!["CA", "NY", "VT"]);
    }
}
