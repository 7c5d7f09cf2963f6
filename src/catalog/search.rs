//! Fuzzy recipe search.
//!
//! Each record is compared against the query field by field (`name`, every
//! ingredient on its own, `instructions`). A field's distance is the
//! smallest number of single-character edits that turns the query into
//! *some substring* of the field, divided by the query length. This makes
//! partial words and substrings free and charges one unit per typo, so
//! `"nasi gorng"` sits at `0.1` from `"Nasi Goreng"`.

use crate::catalog::recipe::Recipe;
use crate::config::SearchConfig;
use serde::Serialize;
use tracing::debug;

/// Accept matches whose distance ratio is at most this value.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Lower-case and trim a raw user query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Field of a recipe that produced the best match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "field", content = "position", rename_all = "lowercase")]
pub enum MatchedField {
    Name,
    Ingredient(usize),
    Instructions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Index of the record in the searched slice
    pub index: usize,
    /// 0.0 = identical, 1.0 = unrelated
    pub distance: f64,
    /// `None` when no query was applied
    pub field: Option<MatchedField>,
}

#[derive(Debug, Clone)]
pub struct FuzzySearch {
    threshold: f64,
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FuzzySearch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score and order `records` against `query`.
    ///
    /// An empty query returns every record in dataset order with no scoring.
    pub fn rank(&self, query: &str, records: &[Recipe]) -> Vec<Match> {
        let query = normalize_query(query);
        if query.is_empty() {
            return (0..records.len())
                .map(|index| Match {
                    index,
                    distance: 0.0,
                    field: None,
                })
                .collect();
        }

        let pattern: Vec<char> = query.chars().collect();
        let mut matches: Vec<Match> = records
            .iter()
            .enumerate()
            .filter_map(|(index, recipe)| {
                let (distance, field) = best_field(&pattern, recipe)?;
                (distance <= self.threshold).then_some(Match {
                    index,
                    distance,
                    field: Some(field),
                })
            })
            .collect();

        // sort_by is stable: equal distances keep dataset order
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        debug!(
            "Search '{}' matched {} of {} recipes",
            query,
            matches.len(),
            records.len()
        );

        matches
    }

    /// Records matching `query`, best match first.
    pub fn search<'a>(&self, query: &str, records: &'a [Recipe]) -> Vec<&'a Recipe> {
        self.rank(query, records)
            .into_iter()
            .map(|m| &records[m.index])
            .collect()
    }
}

fn best_field(pattern: &[char], recipe: &Recipe) -> Option<(f64, MatchedField)> {
    let mut best: Option<(f64, MatchedField)> = None;
    let mut consider = |text: &str, field: MatchedField| {
        let distance = distance_ratio(pattern, text);
        if best.map_or(true, |(current, _)| distance < current) {
            best = Some((distance, field));
        }
    };

    consider(&recipe.name, MatchedField::Name);
    for (position, ingredient) in recipe.ingredient_list().iter().enumerate() {
        consider(ingredient, MatchedField::Ingredient(position));
    }
    if let Some(instructions) = &recipe.instructions {
        consider(instructions, MatchedField::Instructions);
    }

    best
}

/// Normalized approximate-substring edit distance in `[0.0, 1.0]`.
fn distance_ratio(pattern: &[char], text: &str) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let edits = substring_edit_distance(pattern, &text);
    (edits as f64 / pattern.len() as f64).min(1.0)
}

/// Minimum edits turning `pattern` into any substring of `text`.
///
/// Dynamic programming over text columns with a free starting position:
/// `column[i]` is the cost of matching `pattern[..i]` against a substring
/// ending at the current text character.
fn substring_edit_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut column: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &tc in text {
        let mut diagonal = column[0];
        column[0] = 0;
        for i in 1..=m {
            let previous = column[i];
            let substitution = diagonal + usize::from(pattern[i - 1] != tc);
            column[i] = substitution.min(previous + 1).min(column[i - 1] + 1);
            diagonal = previous;
        }
        best = best.min(column[m]);
        if best == 0 {
            break;
        }
    }

    best
}
