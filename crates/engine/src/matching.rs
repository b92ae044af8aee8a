//! Match & rank engine: rank corpus recipes against a free-text ingredient
//! query, plus the filter-based corpus search.
//!
//! Matching is substring containment over normalized ingredient text, which
//! is deliberately loose: "egg" matches "eggs" but also "eggplant". That
//! inherited looseness is a known trade-off, kept pending a product
//! decision rather than silently tightened here.

use myfridge_types::{Difficulty, Recipe};

use crate::normalize::{is_usable_ingredient, normalize_ingredient};

/// One ranked match: the recipe plus how much of the query it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeMatch {
    pub recipe: Recipe,
    /// Distinct query ingredients found in the recipe's ingredient text.
    pub match_count: usize,
    /// `match_count / max(1, raw query length)`.
    pub match_ratio: f64,
}

/// Rank `corpus` against a query ingredient list.
///
/// Both sides are normalized; unusably short query terms are dropped and
/// duplicate terms collapsed before counting, but the ratio denominator is
/// the raw query length as given. Recipes matching nothing are excluded.
/// Order is `match_count` descending, stable over corpus order; `limit`
/// caps the result. Empty query or corpus yields an empty result, not an
/// error.
pub fn match_recipes(
    query_ingredients: &[String],
    corpus: &[Recipe],
    limit: Option<usize>,
) -> Vec<RecipeMatch> {
    let mut terms: Vec<String> = query_ingredients
        .iter()
        .map(|raw| normalize_ingredient(raw))
        .filter(|term| is_usable_ingredient(term))
        .collect();
    terms.sort();
    terms.dedup();

    if terms.is_empty() || corpus.is_empty() {
        return Vec::new();
    }
    let query_len = query_ingredients.len().max(1);

    let mut matches: Vec<RecipeMatch> = corpus
        .iter()
        .filter_map(|recipe| {
            let haystack = recipe
                .ingredients
                .iter()
                .map(|raw| normalize_ingredient(raw))
                .filter(|normalized| is_usable_ingredient(normalized))
                .collect::<Vec<_>>()
                .join(" ");

            let match_count = terms
                .iter()
                .filter(|term| haystack.contains(term.as_str()))
                .count();
            if match_count == 0 {
                return None;
            }
            Some(RecipeMatch {
                recipe: recipe.clone(),
                match_count,
                match_ratio: match_count as f64 / query_len as f64,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    if let Some(limit) = limit {
        matches.truncate(limit);
    }
    matches
}

/// Optional filters for corpus search.
#[derive(Clone, Debug, Default)]
pub struct SearchFilters {
    /// Substring over name, description and raw ingredient lines.
    pub query: Option<String>,
    /// Keep recipes carrying at least one of these tags.
    pub tags: Vec<String>,
    /// Maximum effective total time in minutes.
    pub max_time: Option<u32>,
    pub cuisine: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// Filter a corpus snapshot. All filters are conjunctive; an empty filter
/// set returns the full corpus.
pub fn search_recipes(corpus: &[Recipe], filters: &SearchFilters) -> Vec<Recipe> {
    corpus
        .iter()
        .filter(|recipe| {
            if let Some(query) = &filters.query {
                let needle = query.to_lowercase();
                let hit = recipe.name.to_lowercase().contains(&needle)
                    || recipe.description.to_lowercase().contains(&needle)
                    || recipe
                        .ingredients
                        .iter()
                        .any(|line| line.to_lowercase().contains(&needle));
                if !hit {
                    return false;
                }
            }
            if !filters.tags.is_empty()
                && !filters.tags.iter().any(|tag| recipe.tags.contains(tag))
            {
                return false;
            }
            if let Some(max_time) = filters.max_time {
                if recipe.effective_total_time() > max_time {
                    return false;
                }
            }
            if let Some(cuisine) = &filters.cuisine {
                if !recipe.cuisine.eq_ignore_ascii_case(cuisine) {
                    return false;
                }
            }
            if let Some(difficulty) = filters.difficulty {
                if recipe.difficulty != difficulty {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ..Recipe::default()
        }
    }

    #[test]
    fn test_empty_query_and_empty_corpus_yield_empty() {
        let corpus = vec![recipe("a_1", "Omelette", &["4 eggs"])];
        assert!(match_recipes(&[], &corpus, None).is_empty());
        assert!(match_recipes(&["chicken".to_string()], &[], None).is_empty());
    }

    #[test]
    fn test_full_coverage_ranks_above_partial() {
        let corpus = vec![
            recipe("a_1", "Omelette", &["4 eggs", "1 cup milk", "salt"]),
            recipe("b_2", "Pancakes", &["4 eggs", "2 cups flour"]),
        ];
        let query = vec!["egg".to_string(), "milk".to_string()];
        let matches = match_recipes(&query, &corpus, None);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].recipe.id, "a_1");
        assert_eq!(matches[0].match_count, 2);
        assert_eq!(matches[0].match_ratio, 1.0);
        assert_eq!(matches[1].recipe.id, "b_2");
        assert_eq!(matches[1].match_count, 1);
        assert_eq!(matches[1].match_ratio, 0.5);
    }

    #[test]
    fn test_zero_match_recipes_excluded_and_limit_applied() {
        let corpus = vec![
            recipe("a_1", "Omelette", &["4 eggs"]),
            recipe("b_2", "Salad", &["lettuce", "tomato"]),
            recipe("c_3", "Custard", &["6 eggs", "sugar"]),
        ];
        let query = vec!["egg".to_string()];

        let all = match_recipes(&query, &corpus, None);
        assert_eq!(all.len(), 2);

        let capped = match_recipes(&query, &corpus, Some(1));
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].recipe.id, "a_1");
    }

    #[test]
    fn test_duplicate_and_unusable_query_terms_collapse() {
        let corpus = vec![recipe("a_1", "Omelette", &["4 eggs", "salt"])];
        let query = vec![
            "Egg".to_string(),
            "2 egg".to_string(),
            "1 l".to_string(), // normalizes below the usable length
        ];
        let matches = match_recipes(&query, &corpus, None);
        // Duplicates collapse for counting, but the ratio is over the raw
        // query length, so repeating a term never inflates it.
        assert_eq!(matches[0].match_count, 1);
        assert_eq!(matches[0].match_ratio, 1.0 / 3.0);
    }

    #[test]
    fn test_repeated_term_does_not_inflate_ratio() {
        let corpus = vec![recipe("a_1", "Omelette", &["4 eggs"])];
        let query = vec!["egg".to_string(), "egg".to_string()];
        let matches = match_recipes(&query, &corpus, None);
        assert_eq!(matches[0].match_count, 1);
        assert_eq!(matches[0].match_ratio, 0.5);
    }

    #[test]
    fn test_query_normalization_strips_quantities() {
        let corpus = vec![recipe("a_1", "Omelette", &["4 large eggs (beaten)"])];
        let query = vec!["2 cups eggs".to_string()];
        assert_eq!(match_recipes(&query, &corpus, None).len(), 1);
    }

    #[test]
    fn test_search_filters_are_conjunctive() {
        let mut quick = recipe("a_1", "Caprese Salad", &["tomato", "mozzarella"]);
        quick.tags = vec!["vegetarian".to_string()];
        quick.cuisine = "Italian".to_string();
        quick.total_time = 10;

        let mut slow = recipe("b_2", "Lasagna", &["pasta", "tomato"]);
        slow.tags = vec!["vegetarian".to_string()];
        slow.cuisine = "Italian".to_string();
        slow.total_time = 90;

        let corpus = vec![quick, slow];
        let filters = SearchFilters {
            tags: vec!["vegetarian".to_string()],
            max_time: Some(30),
            cuisine: Some("italian".to_string()),
            ..SearchFilters::default()
        };
        let results = search_recipes(&corpus, &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a_1");
    }

    #[test]
    fn test_search_query_hits_ingredients() {
        let corpus = vec![recipe("a_1", "Caprese Salad", &["fresh Mozzarella"])];
        let filters = SearchFilters {
            query: Some("mozzarella".to_string()),
            ..SearchFilters::default()
        };
        assert_eq!(search_recipes(&corpus, &filters).len(), 1);
    }

    #[test]
    fn test_empty_filters_return_full_corpus() {
        let corpus = vec![
            recipe("a_1", "Omelette", &["4 eggs"]),
            recipe("b_2", "Salad", &["lettuce"]),
        ];
        assert_eq!(search_recipes(&corpus, &SearchFilters::default()).len(), 2);
    }
}
