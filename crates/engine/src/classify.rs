//! Keyword-table ingredient classification and cuisine inference.
//!
//! Recipe identity lives in its specialty ingredients: chickpea flour makes
//! a faina, so it must never be treated as a substitutable pantry staple.
//! The tables here are swappable configuration data; tuning them never
//! requires touching engine logic.

use std::collections::HashMap;

use myfridge_types::Recipe;
use serde::Deserialize;

use crate::normalize::{is_usable_ingredient, normalize_ingredient};

/// How an ingredient participates in a recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngredientClass {
    /// Identity-bearing ingredient; the matched specialty keyword.
    Specialty(String),
    /// Universally available staple; the matched pantry item.
    Pantry(String),
    /// Neither list matched: an ordinary main ingredient.
    Main,
}

/// Specialty/pantry keyword tables.
#[derive(Clone, Debug, Deserialize)]
pub struct IngredientClassifier {
    /// Keywords marking ingredients that should never be treated as
    /// pantry staples.
    pub specialty_keywords: Vec<String>,
    /// The only items assumed universally available.
    pub basic_pantry: Vec<String>,
}

impl Default for IngredientClassifier {
    fn default() -> Self {
        Self {
            specialty_keywords: [
                // flours
                "chickpea", "almond", "coconut", "rice flour", "cornmeal", "semolina",
                "buckwheat", "rye", "spelt", "quinoa flour", "oat flour", "whole wheat",
                "bread flour", "cake flour",
                // dairy
                "parmesan", "parmigiano", "cheddar", "mozzarella", "feta", "goat cheese",
                "blue cheese", "brie", "camembert", "cream cheese", "sour cream",
                "heavy cream", "whipping cream", "greek yogurt", "buttermilk", "ricotta",
                "mascarpone",
                // proteins
                "prosciutto", "pancetta", "bacon", "sausage", "chorizo", "lamb", "veal",
                "duck", "venison", "salmon", "tuna", "shrimp", "prawns", "lobster", "crab",
                "scallops", "anchovies", "sardines",
                // produce
                "avocado", "eggplant", "zucchini", "asparagus", "artichoke", "fennel",
                "leek", "shallot", "kale", "arugula", "spinach", "bok choy", "broccoli",
                "cauliflower", "brussels sprouts",
                // condiments and sauces
                "tahini", "miso", "curry paste", "fish sauce", "oyster sauce", "hoisin",
                "sriracha", "harissa", "pesto", "capers", "olives", "sun-dried tomato",
                "roasted red pepper",
                // herbs and spices beyond the basics
                "saffron", "cardamom", "turmeric", "cumin", "coriander", "paprika",
                "cayenne", "chili powder", "curry powder", "garam masala", "five spice",
                "oregano", "thyme", "rosemary", "basil", "cilantro", "parsley", "dill",
                "mint", "sage", "tarragon",
                // nuts and seeds
                "pine nuts", "cashews", "pistachios", "hazelnuts", "macadamia", "pecans",
                "walnuts", "sesame seeds", "sunflower seeds", "pumpkin seeds",
                "chia seeds", "flax seeds",
                // sweeteners
                "honey", "maple syrup", "agave", "molasses", "brown sugar",
                "powdered sugar", "confectioners",
                // grains and legumes
                "quinoa", "couscous", "bulgur", "farro", "barley", "lentils", "chickpeas",
                "black beans", "kidney beans",
                // liquids
                "coconut milk", "almond milk", "wine", "beer", "stock", "broth",
                "tomato sauce", "tomato paste",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            basic_pantry: [
                "salt", "pepper", "black pepper", "water", "oil", "olive oil",
                "vegetable oil", "cooking oil", "canola oil", "butter", "unsalted butter",
                "salted butter", "sugar", "white sugar", "granulated sugar", "flour",
                "all-purpose flour", "plain flour", "ap flour", "garlic", "garlic clove",
                "garlic powder", "onion", "onion powder", "soy sauce", "vinegar",
                "white vinegar", "balsamic vinegar",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl IngredientClassifier {
    /// Classify a raw ingredient line. Specialty keywords win over pantry
    /// matches: a specialty ingredient must never be downgraded to a staple.
    pub fn classify(&self, raw: &str) -> IngredientClass {
        let normalized = normalize_ingredient(raw);

        if let Some(keyword) = self
            .specialty_keywords
            .iter()
            .find(|keyword| normalized.contains(keyword.as_str()))
        {
            return IngredientClass::Specialty(keyword.clone());
        }

        for pantry_item in &self.basic_pantry {
            if normalized == *pantry_item {
                return IngredientClass::Pantry(pantry_item.clone());
            }
            if normalized.contains(pantry_item.as_str()) {
                // Flour variants are specialty unless they are the plain
                // all-purpose forms; be strict there.
                if pantry_item.contains("flour") {
                    if matches!(
                        normalized.as_str(),
                        "flour" | "all-purpose flour" | "plain flour" | "ap flour"
                    ) {
                        return IngredientClass::Pantry(pantry_item.clone());
                    }
                } else {
                    return IngredientClass::Pantry(pantry_item.clone());
                }
            }
        }

        IngredientClass::Main
    }
}

/// One specialty-ingredient occurrence in the corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecialtyOccurrence {
    pub matched_keyword: String,
    pub recipe_names: Vec<String>,
}

/// Corpus-wide ingredient audit.
#[derive(Clone, Debug, Default)]
pub struct AuditReport {
    pub total_recipes: usize,
    pub total_ingredients: usize,
    pub specialty_found: usize,
    /// Normalized specialty ingredient -> where it occurs, most used first.
    pub specialty: Vec<(String, SpecialtyOccurrence)>,
    /// Normalized main ingredient -> usage count, most used first.
    pub main_ingredients: Vec<(String, usize)>,
}

impl IngredientClassifier {
    /// Audit every ingredient of every recipe in the corpus.
    pub fn audit_corpus(&self, corpus: &[Recipe]) -> AuditReport {
        let mut specialty: HashMap<String, SpecialtyOccurrence> = HashMap::new();
        let mut main_counts: HashMap<String, usize> = HashMap::new();
        let mut total_ingredients = 0usize;
        let mut specialty_found = 0usize;

        for recipe in corpus {
            for raw in &recipe.ingredients {
                total_ingredients += 1;
                let normalized = normalize_ingredient(raw);
                if !is_usable_ingredient(&normalized) {
                    continue;
                }
                match self.classify(raw) {
                    IngredientClass::Specialty(keyword) => {
                        specialty_found += 1;
                        specialty
                            .entry(normalized)
                            .or_insert_with(|| SpecialtyOccurrence {
                                matched_keyword: keyword,
                                recipe_names: Vec::new(),
                            })
                            .recipe_names
                            .push(recipe.name.clone());
                    }
                    IngredientClass::Pantry(_) => {}
                    IngredientClass::Main => {
                        *main_counts.entry(normalized).or_default() += 1;
                    }
                }
            }
        }

        let mut specialty: Vec<_> = specialty.into_iter().collect();
        specialty.sort_by(|a, b| {
            b.1.recipe_names
                .len()
                .cmp(&a.1.recipe_names.len())
                .then_with(|| a.0.cmp(&b.0))
        });
        let mut main_ingredients: Vec<_> = main_counts.into_iter().collect();
        main_ingredients.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        AuditReport {
            total_recipes: corpus.len(),
            total_ingredients,
            specialty_found,
            specialty,
            main_ingredients,
        }
    }
}

/// Cuisine keyword table for heuristic inference from ingredient text.
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct CuisineKeywords(pub Vec<(String, Vec<String>)>);

impl Default for CuisineKeywords {
    fn default() -> Self {
        Self(vec![
            (
                "Italian".to_string(),
                ["pasta", "spaghetti", "parmesan", "mozzarella", "risotto"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            (
                "Mexican".to_string(),
                ["taco", "tortilla", "salsa", "enchilada", "burrito"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            (
                "Asian".to_string(),
                ["soy sauce", "stir fry", "noodles", "sesame oil", "rice wine"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            (
                "Indian".to_string(),
                ["curry", "masala", "turmeric", "garam", "naan"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
        ])
    }
}

/// Infer a cuisine label from a recipe's name and ingredient text using the
/// keyword table; defaults to `"International"` when nothing matches.
pub fn infer_cuisine(recipe: &Recipe, keywords: &CuisineKeywords) -> String {
    let mut text = recipe.name.to_lowercase();
    for ingredient in &recipe.ingredients {
        text.push(' ');
        text.push_str(&ingredient.to_lowercase());
    }

    keywords
        .0
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| text.contains(marker.as_str())))
        .map(|(cuisine, _)| cuisine.clone())
        .unwrap_or_else(|| "International".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialty_wins_over_pantry_overlap() {
        let classifier = IngredientClassifier::default();
        // "chickpea flour" contains pantry "flour" but is identity-bearing.
        assert_eq!(
            classifier.classify("2 cups chickpea flour"),
            IngredientClass::Specialty("chickpea".to_string())
        );
    }

    #[test]
    fn test_plain_flour_is_pantry_but_variants_are_not() {
        let classifier = IngredientClassifier::default();
        assert_eq!(
            classifier.classify("2 cups all-purpose flour"),
            IngredientClass::Pantry("flour".to_string())
        );
        assert_eq!(classifier.classify("2 cups tapioca flour"), IngredientClass::Main);
    }

    #[test]
    fn test_unlisted_ingredient_is_main() {
        let classifier = IngredientClassifier::default();
        assert_eq!(
            classifier.classify("2 chicken breasts"),
            IngredientClass::Main
        );
    }

    #[test]
    fn test_pantry_contains_match() {
        let classifier = IngredientClassifier::default();
        assert_eq!(
            classifier.classify("1 tsp sea salt"),
            IngredientClass::Pantry("salt".to_string())
        );
    }

    #[test]
    fn test_audit_counts_and_orders_by_frequency() {
        let classifier = IngredientClassifier::default();
        let corpus = vec![
            Recipe {
                id: "a_1".to_string(),
                name: "Faina".to_string(),
                ingredients: vec![
                    "2 cups chickpea flour".to_string(),
                    "1 tsp salt".to_string(),
                    "water".to_string(),
                ],
                ..Recipe::default()
            },
            Recipe {
                id: "b_2".to_string(),
                name: "Chicken Rice".to_string(),
                ingredients: vec![
                    "2 chicken breasts".to_string(),
                    "1 cup rice".to_string(),
                    "2 chicken breasts".to_string(),
                ],
                ..Recipe::default()
            },
        ];

        let report = classifier.audit_corpus(&corpus);
        assert_eq!(report.total_recipes, 2);
        assert_eq!(report.total_ingredients, 6);
        assert_eq!(report.specialty_found, 1);
        assert_eq!(report.specialty[0].0, "chickpea flour");
        assert_eq!(report.main_ingredients[0], ("chicken breasts".to_string(), 2));
    }

    #[test]
    fn test_cuisine_inference_from_name_and_ingredients() {
        let keywords = CuisineKeywords::default();
        let pasta = Recipe {
            name: "Weeknight Spaghetti".to_string(),
            ..Recipe::default()
        };
        assert_eq!(infer_cuisine(&pasta, &keywords), "Italian");

        let stirfry = Recipe {
            name: "Veggie Bowl".to_string(),
            ingredients: vec!["2 tbsp soy sauce".to_string()],
            ..Recipe::default()
        };
        assert_eq!(infer_cuisine(&stirfry, &keywords), "Asian");

        let plain = Recipe {
            name: "Roast Chicken".to_string(),
            ..Recipe::default()
        };
        assert_eq!(infer_cuisine(&plain, &keywords), "International");
    }
}
