use std::collections::BTreeMap;

use myfridge_engine::infer_cuisine;
use myfridge_store::RecipeStore;

use crate::config::Config;
use crate::error::AppResult;

/// Report how ingredients across the corpus classify as specialty, pantry
/// or main, plus cuisine-label gaps. Read-only.
pub async fn run(config: Config, limit: usize) -> AppResult<()> {
    let mut store = RecipeStore::open(&config.store.path);
    let load = store.load()?;

    let report = config.classify.tables.audit_corpus(store.recipes());

    println!("Specialty ingredients (identity-bearing, never pantry):");
    for (ingredient, occurrence) in report.specialty.iter().take(limit) {
        println!(
            "  {} - {} recipe(s), matched '{}'",
            ingredient,
            occurrence.recipe_names.len(),
            occurrence.matched_keyword
        );
        for name in occurrence.recipe_names.iter().take(3) {
            println!("    - {name}");
        }
        if occurrence.recipe_names.len() > 3 {
            println!("    ... and {} more", occurrence.recipe_names.len() - 3);
        }
    }

    println!("\nMost common main ingredients:");
    for (ingredient, count) in report.main_ingredients.iter().take(limit) {
        println!("  {ingredient} (used in {count} recipe(s))");
    }

    let mut inferred: BTreeMap<String, usize> = BTreeMap::new();
    for recipe in store.recipes().iter().filter(|r| r.cuisine.is_empty()) {
        *inferred
            .entry(infer_cuisine(recipe, &config.classify.cuisines))
            .or_default() += 1;
    }
    if !inferred.is_empty() {
        let unlabeled: usize = inferred.values().sum();
        println!("\n{unlabeled} recipe(s) missing a cuisine label; inferred:");
        for (cuisine, count) in &inferred {
            println!("  {cuisine}: {count}");
        }
    }

    println!(
        "\n{} recipes, {} ingredients, {} specialty occurrences, {} skipped at load",
        report.total_recipes, report.total_ingredients, report.specialty_found, load.skipped
    );
    Ok(())
}
