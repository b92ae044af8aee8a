//! Duplicate resolution over a corpus snapshot.
//!
//! Repeated imports from heterogeneous sources leave near-duplicates like
//! "Perfect Scrambled Eggs" vs "Classic Scrambled Eggs" in the corpus.
//! [`resolve`] groups records by canonical name key and keeps the best
//! member of each group, judged by source priority plus completeness
//! bonuses. The input is never mutated; the output carries an audit log of
//! every merge. Re-running the resolver on its own output is a no-op.

use std::collections::HashMap;

use myfridge_types::Recipe;
use serde::{Deserialize, Serialize};

use crate::normalize::{NameKey, StopWords, canonical_key};

/// Provenance -> priority table used to break duplicate ties. Higher wins;
/// unknown provenance scores 0. Swappable configuration data, values chosen
/// by hand upstream.
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct SourcePriorities(pub HashMap<String, i32>);

impl Default for SourcePriorities {
    fn default() -> Self {
        Self(HashMap::from([
            ("TheMealDB".to_string(), 100),
            ("Recipe Puppy".to_string(), 80),
            ("Curated".to_string(), 60),
            ("MyFridge".to_string(), 40),
        ]))
    }
}

impl SourcePriorities {
    /// Priority for a source label. A trailing parenthetical qualifier in
    /// the label, e.g. `"Curated (hand-checked)"`, is ignored.
    pub fn priority(&self, source: &str) -> i32 {
        let base = source.split('(').next().unwrap_or("").trim();
        self.0.get(base).copied().unwrap_or(0)
    }
}

/// Audit record for one merged group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MergeGroup {
    pub group_key: String,
    pub survivor_id: String,
    pub removed_ids: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    pub original: usize,
    pub kept: usize,
    pub removed: usize,
}

/// Result of a resolution pass: the deduplicated corpus (original order
/// preserved) plus the merge audit log.
#[derive(Clone, Debug, Default)]
pub struct DedupOutcome {
    pub recipes: Vec<Recipe>,
    pub audit: Vec<MergeGroup>,
    pub stats: DedupStats,
}

/// Score used to pick the surviving member of a duplicate group:
/// source priority plus capped completeness bonuses.
pub fn resolution_score(recipe: &Recipe, priorities: &SourcePriorities) -> i32 {
    let mut score = priorities.priority(&recipe.source);
    if recipe.image.as_deref().is_some_and(|url| !url.is_empty()) {
        score += 20;
    }
    score += recipe.ingredients.len().min(20) as i32;
    score += recipe.instructions.len().min(15) as i32;
    if !recipe.description.is_empty() {
        score += 10;
    }
    score += recipe.tags.len().min(10) as i32;
    score
}

/// Deduplicate a corpus snapshot.
///
/// Records whose canonical key is unmergeable (too short after stop-word
/// stripping) are passed through untouched; they never group with anything,
/// including each other. Within a group the max-scoring member survives and
/// ties go to the first-seen record, so the pass is stable and idempotent.
pub fn resolve(
    corpus: &[Recipe],
    stop_words: &StopWords,
    priorities: &SourcePriorities,
) -> DedupOutcome {
    // Winning (corpus index, score) per mergeable key.
    let mut winners: HashMap<String, (usize, i32)> = HashMap::new();
    let mut group_members: HashMap<String, Vec<usize>> = HashMap::new();
    let mut survivor_flags = vec![true; corpus.len()];

    for (index, recipe) in corpus.iter().enumerate() {
        let NameKey::Mergeable(key) = canonical_key(&recipe.name, stop_words) else {
            continue;
        };
        let score = resolution_score(recipe, priorities);
        group_members.entry(key.clone()).or_default().push(index);
        match winners.get_mut(&key) {
            None => {
                winners.insert(key, (index, score));
            }
            // Strict comparison keeps the first-seen member on ties.
            Some(entry) if score > entry.1 => {
                survivor_flags[entry.0] = false;
                *entry = (index, score);
            }
            Some(_) => {
                survivor_flags[index] = false;
            }
        }
    }

    let recipes: Vec<Recipe> = corpus
        .iter()
        .enumerate()
        .filter(|(index, _)| survivor_flags[*index])
        .map(|(_, recipe)| recipe.clone())
        .collect();

    let mut audit: Vec<MergeGroup> = group_members
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, members)| {
            let survivor = winners[&key].0;
            MergeGroup {
                group_key: key,
                survivor_id: corpus[survivor].id.clone(),
                removed_ids: members
                    .into_iter()
                    .filter(|index| *index != survivor)
                    .map(|index| corpus[index].id.clone())
                    .collect(),
            }
        })
        .collect();
    // HashMap iteration order is arbitrary; report groups deterministically.
    audit.sort_by(|a, b| a.group_key.cmp(&b.group_key));

    let stats = DedupStats {
        original: corpus.len(),
        kept: recipes.len(),
        removed: corpus.len() - recipes.len(),
    };

    for group in &audit {
        tracing::debug!(
            key = %group.group_key,
            survivor = %group.survivor_id,
            removed = group.removed_ids.len(),
            "merged duplicate group"
        );
    }

    DedupOutcome {
        recipes,
        audit,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, name: &str, source: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            source: source.to_string(),
            ..Recipe::default()
        }
    }

    #[test]
    fn test_source_priority_ignores_parenthetical() {
        let priorities = SourcePriorities::default();
        assert_eq!(priorities.priority("TheMealDB"), 100);
        assert_eq!(priorities.priority("Curated (hand-checked)"), 60);
        assert_eq!(priorities.priority("Unknown Blog"), 0);
    }

    #[test]
    fn test_distinct_names_all_survive() {
        let corpus = vec![
            recipe("a_1", "Chicken Soup", "Curated"),
            recipe("b_2", "Beef Stew", "Curated"),
        ];
        let outcome = resolve(&corpus, &StopWords::default(), &SourcePriorities::default());
        assert_eq!(outcome.recipes.len(), 2);
        assert!(outcome.audit.is_empty());
        assert_eq!(outcome.stats.removed, 0);
    }

    #[test]
    fn test_first_seen_wins_exact_ties() {
        let corpus = vec![
            recipe("a_1", "Chicken Soup", "Curated"),
            recipe("b_2", "The Chicken Soup", "Curated"),
        ];
        let outcome = resolve(&corpus, &StopWords::default(), &SourcePriorities::default());
        assert_eq!(outcome.recipes.len(), 1);
        assert_eq!(outcome.recipes[0].id, "a_1");
        assert_eq!(outcome.audit[0].removed_ids, vec!["b_2".to_string()]);
    }

    #[test]
    fn test_unmergeable_names_never_group() {
        // "It" strips to a key below the length floor; two such records must
        // both survive even though they normalize identically.
        let corpus = vec![
            recipe("a_1", "It", "Curated"),
            recipe("b_2", "It", "TheMealDB"),
        ];
        let outcome = resolve(&corpus, &StopWords::default(), &SourcePriorities::default());
        assert_eq!(outcome.recipes.len(), 2);
        assert!(outcome.audit.is_empty());
    }

    #[test]
    fn test_survivors_keep_corpus_order() {
        let corpus = vec![
            recipe("a_1", "Zucchini Bread", "Curated"),
            recipe("b_2", "Apple Pie", "Curated"),
            recipe("c_3", "Easy Zucchini Bread", "TheMealDB"),
        ];
        let outcome = resolve(&corpus, &StopWords::default(), &SourcePriorities::default());
        let ids: Vec<&str> = outcome.recipes.iter().map(|r| r.id.as_str()).collect();
        // c_3 wins its group but survivors stay in original corpus order.
        assert_eq!(ids, vec!["b_2", "c_3"]);
    }
}
