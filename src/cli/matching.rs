use std::path::PathBuf;

use myfridge_engine::match_recipes;
use myfridge_store::{RecipeStore, StoreError};
use myfridge_types::InventorySummary;

use crate::config::Config;
use crate::error::AppResult;

/// Rank the corpus against a free-text ingredient list, optionally extended
/// with the non-expired items of an inventory summary. Read-only.
pub async fn run(
    config: Config,
    mut ingredients: Vec<String>,
    inventory: Option<String>,
    limit: usize,
) -> AppResult<()> {
    if let Some(path) = inventory {
        ingredients.extend(load_inventory_names(&path)?);
    }

    let mut store = RecipeStore::open(&config.store.path);
    store.load()?;

    let matches = match_recipes(&ingredients, store.recipes(), Some(limit));
    if matches.is_empty() {
        println!("No recipes match the given ingredients.");
        return Ok(());
    }

    println!("Best matches for {}:", ingredients.join(", "));
    for (rank, matched) in matches.iter().enumerate() {
        println!(
            "  {}. {} ({}) - {}/{} ingredient(s), ratio {:.2}",
            rank + 1,
            matched.recipe.name,
            matched.recipe.id,
            matched.match_count,
            ingredients.len(),
            matched.match_ratio
        );
    }
    Ok(())
}

fn load_inventory_names(path: &str) -> AppResult<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    let summary: InventorySummary =
        serde_json::from_str(&raw).map_err(|source| StoreError::MalformedDocument {
            path: PathBuf::from(path),
            source,
        })?;
    Ok(summary.available_ingredient_names())
}
