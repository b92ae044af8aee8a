use std::path::Path;

use myfridge_engine::{
    EngagementSignals, NeutralSignals, TableSignals, TrendSignals, score_corpus,
};
use myfridge_store::{RecipeStore, ScoreCheckpoint};

use crate::config::Config;
use crate::error::AppResult;

const TOP_MOVERS: usize = 10;

/// Recompute popularity scores over the corpus.
///
/// Providers may be slow and flaky; the batch paces, times out, retries and
/// degrades per record, and checkpoints after every score so `--resume`
/// never re-pays already-fetched signals. Write-back is confirmation-gated
/// and always preceded by a backup.
pub async fn run(
    config: Config,
    limit: Option<usize>,
    resume: bool,
    yes: bool,
    signals: Option<String>,
) -> AppResult<()> {
    let mut store = RecipeStore::open(&config.store.path);
    let load = store.load()?;
    println!("Loaded {} recipes ({} skipped).", load.loaded, load.skipped);

    let checkpoint_path = config.store.checkpoint_path();
    if !resume && Path::new(&checkpoint_path).exists() {
        ScoreCheckpoint::load_or_default(&checkpoint_path)?.clear()?;
        tracing::info!("discarded stale checkpoint at {checkpoint_path}");
    }
    let mut checkpoint = ScoreCheckpoint::load_or_default(&checkpoint_path)?;
    if resume && !checkpoint.is_empty() {
        println!("Resuming: {} recipe(s) already scored.", checkpoint.len());
    }

    let signals_path = signals.or_else(|| config.popularity.signals_path.clone());
    let (trends, engagement): (Box<dyn TrendSignals>, Box<dyn EngagementSignals>) =
        match &signals_path {
            Some(path) => {
                let table =
                    TableSignals::from_file(Path::new(path), config.popularity.aliases.clone())?;
                (Box::new(table.clone()), Box::new(table))
            }
            None => {
                let neutral = NeutralSignals {
                    value: config.popularity.neutral_signal,
                };
                (Box::new(neutral), Box::new(neutral))
            }
        };

    let options = config.popularity.batch_options(limit);
    let outcome = score_corpus(
        store.recipes(),
        trends.as_ref(),
        engagement.as_ref(),
        &config.popularity.weights,
        &options,
        Some(&mut checkpoint),
    )
    .await?;

    let report = &outcome.report;
    println!(
        "\nScored {} recipe(s): {} fetched, {} reused from checkpoint, {} remaining, {} degraded signal(s)",
        report.fetched + report.reused,
        report.fetched,
        report.reused,
        report.remaining,
        report.degraded.len()
    );
    for degraded in &report.degraded {
        println!("  degraded {}: {}", degraded.id, degraded.detail);
    }

    let mut movers = report.entries.clone();
    movers.sort_by(|a, b| {
        let delta_a = (a.new_score - a.old_score).abs();
        let delta_b = (b.new_score - b.old_score).abs();
        delta_b.partial_cmp(&delta_a).unwrap_or(std::cmp::Ordering::Equal)
    });
    if !movers.is_empty() {
        println!("\nBiggest score changes:");
        for entry in movers.iter().take(TOP_MOVERS) {
            println!(
                "  {}: {:.1} -> {:.1} ({:+.1})",
                entry.name,
                entry.old_score,
                entry.new_score,
                entry.new_score - entry.old_score
            );
        }
    }

    if report.remaining > 0 {
        println!(
            "\n{} recipe(s) not scored this run; re-run with --resume to continue.",
            report.remaining
        );
    }

    if !yes && !super::confirm("Write updated scores back to the store?")? {
        println!("Cancelled; store untouched (checkpoint kept for --resume).");
        return Ok(());
    }

    let backup_path = store.backup()?;
    println!("Backup written to {}", backup_path.display());
    store.save(&outcome.recipes)?;
    if report.remaining == 0 {
        checkpoint.clear()?;
    }
    println!("Saved {} recipes with updated scores.", outcome.recipes.len());
    Ok(())
}
