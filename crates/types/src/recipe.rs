use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Recipe difficulty levels as labeled by upstream sources.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A recipe record as persisted in the corpus document.
///
/// `quality_score` and `popularity_score` are derived values: they are always
/// recomputable from the other fields plus externally supplied signals and are
/// never hand-edited. The canonical name key used for deduplication is a
/// transient value and is deliberately not a field here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Stable provenance-namespaced identifier, e.g. `themealdb_52772`.
    /// Unique across the corpus.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw ingredient lines as imported, quantities and qualifiers included.
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Minutes; 0 means unknown.
    #[serde(default)]
    pub prep_time: u32,
    /// Minutes; 0 means unknown.
    #[serde(default)]
    pub cook_time: u32,
    /// Minutes; 0 means unknown.
    #[serde(default)]
    pub total_time: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Opaque image reference (URL); never fetched by this system.
    #[serde(default)]
    pub image: Option<String>,
    /// Provenance label, e.g. `TheMealDB` or `Curated (hand-checked)`.
    #[serde(default)]
    pub source: String,
    /// Derived completeness metric, 0-100.
    #[serde(default)]
    pub quality_score: u8,
    /// Derived demand metric, 0-100, one decimal.
    #[serde(default)]
    pub popularity_score: f64,
    /// Previous popularity score, retained for before/after comparison.
    #[serde(default)]
    pub popularity_score_old: f64,
    #[serde(default)]
    pub popularity_last_updated: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Timing is known when an explicit total exists or it can be derived
    /// from prep + cook.
    pub fn has_timing(&self) -> bool {
        self.total_time > 0 || (self.prep_time > 0 && self.cook_time > 0)
    }

    /// Total minutes, deriving from prep + cook when no explicit total is set.
    pub fn effective_total_time(&self) -> u32 {
        if self.total_time > 0 {
            self.total_time
        } else {
            self.prep_time + self.cook_time
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_optional_document_loads_with_defaults() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": "curated_042", "name": "Faina"}"#).unwrap();
        assert_eq!(recipe.id, "curated_042");
        assert_eq!(recipe.name, "Faina");
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.image, None);
        assert_eq!(recipe.popularity_last_updated, None);
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
        let parsed: Difficulty = serde_json::from_str(r#""hard""#).unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn test_effective_total_time_derives_from_prep_and_cook() {
        let recipe = Recipe {
            prep_time: 10,
            cook_time: 25,
            ..Recipe::default()
        };
        assert!(recipe.has_timing());
        assert_eq!(recipe.effective_total_time(), 35);
    }

    #[test]
    fn test_timing_unknown_when_only_prep_is_set() {
        let recipe = Recipe {
            prep_time: 10,
            ..Recipe::default()
        };
        assert!(!recipe.has_timing());
    }
}
