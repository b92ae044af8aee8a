use myfridge_engine::resolve;
use myfridge_store::RecipeStore;

use crate::config::Config;
use crate::error::AppResult;

/// Find and merge near-duplicate recipes.
///
/// Read-only until confirmed: the resolver runs over a snapshot, the merge
/// report is printed, and only an explicit confirmation (or `--yes`)
/// triggers the backup plus write-back.
pub async fn run(config: Config, yes: bool) -> AppResult<()> {
    let mut store = RecipeStore::open(&config.store.path);
    let load = store.load()?;

    let outcome = resolve(
        store.recipes(),
        &config.dedup.stop_words,
        &config.dedup.source_priorities,
    );

    if outcome.stats.removed == 0 {
        println!("No duplicates found ({} recipes, {} skipped at load).", load.loaded, load.skipped);
        return Ok(());
    }

    for group in &outcome.audit {
        println!("group '{}':", group.group_key);
        println!("  keeping  {}", group.survivor_id);
        for removed in &group.removed_ids {
            println!("  removing {removed}");
        }
    }
    println!(
        "\n{} recipes, {} duplicates to remove, {} kept, {} skipped at load",
        outcome.stats.original, outcome.stats.removed, outcome.stats.kept, load.skipped
    );

    if !yes
        && !super::confirm(&format!(
            "Remove {} duplicate recipe(s)?",
            outcome.stats.removed
        ))?
    {
        println!("Cancelled; store untouched.");
        return Ok(());
    }

    let backup_path = store.backup()?;
    println!("Backup written to {}", backup_path.display());
    store.save(&outcome.recipes)?;
    println!("Saved {} deduplicated recipes.", outcome.stats.kept);
    Ok(())
}
