//! Popularity scoring: a composite 0-100 demand metric blending externally
//! supplied trend/engagement signals with the internal quality score.
//!
//! The single-recipe computation is pure and deterministic; the batch pass
//! over a corpus is the one I/O-bound operation in the engine and is built
//! to survive flaky providers: serial fetches behind a fixed inter-request
//! delay, per-fetch timeout, bounded retries with backoff, neutral
//! degradation on provider failure, and a checkpoint after every record so
//! an interrupted run resumes where it left off.

use std::time::Duration;

use chrono::Utc;
use myfridge_store::{ScoreCheckpoint, StoreError};
use myfridge_types::Recipe;
use rand::RngExt;
use serde::Deserialize;

use crate::quality::quality_score;
use crate::signals::{EngagementSignals, SignalError, TrendSignals};

/// Component weights of the composite score. Must sum to 1.0.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PopularityWeights {
    pub trend: f64,
    pub engagement: f64,
    pub quality: f64,
    pub recency: f64,
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            trend: 0.40,
            engagement: 0.30,
            quality: 0.20,
            recency: 0.10,
        }
    }
}

impl PopularityWeights {
    pub fn validate(&self) -> Result<(), String> {
        let sum = self.trend + self.engagement + self.quality + self.recency;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(format!("popularity weights must sum to 1.0, got {sum}"));
        }
        if [self.trend, self.engagement, self.quality, self.recency]
            .iter()
            .any(|weight| *weight < 0.0)
        {
            return Err("popularity weights must be non-negative".to_string());
        }
        Ok(())
    }
}

/// Externally supplied signal values for one recipe, each in 0-100.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalSet {
    pub trend: f64,
    pub engagement: f64,
    pub recency: f64,
}

/// Compute the composite popularity score, clamped to 0-100 and rounded to
/// one decimal. Identical recipe and signals always yield the identical
/// score.
pub fn popularity_score(recipe: &Recipe, signals: &SignalSet, weights: &PopularityWeights) -> f64 {
    let quality = f64::from(quality_score(recipe));
    let raw = signals.trend.clamp(0.0, 100.0) * weights.trend
        + signals.engagement.clamp(0.0, 100.0) * weights.engagement
        + quality * weights.quality
        + signals.recency.clamp(0.0, 100.0) * weights.recency;
    (raw.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

/// Pacing and resilience knobs for the batch pass.
#[derive(Clone, Copy, Debug)]
pub struct BatchOptions {
    /// Fixed delay between provider fetches (provider throttling).
    pub request_delay: Duration,
    /// Per-fetch timeout.
    pub fetch_timeout: Duration,
    /// Retries after the first attempt before degrading to neutral.
    pub max_retries: u32,
    /// Base backoff between retries; doubled each retry, with jitter.
    pub retry_backoff: Duration,
    /// Substituted when a signal provider fails or times out.
    pub neutral_signal: f64,
    /// Flat recency component; no live trending-topics source exists.
    pub recency_boost: f64,
    /// Cap on records fetched this run; the rest pass through untouched.
    pub limit: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(1),
            fetch_timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
            neutral_signal: 50.0,
            recency_boost: 50.0,
            limit: None,
        }
    }
}

/// Old/new score pair for one recipe, for the comparison report.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRecipe {
    pub id: String,
    pub name: String,
    pub old_score: f64,
    pub new_score: f64,
}

/// Per-record degradation captured without aborting the batch.
#[derive(Clone, Debug)]
pub struct DegradedSignal {
    pub id: String,
    pub detail: String,
}

#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    /// Records scored with fresh provider fetches this run.
    pub fetched: usize,
    /// Records whose score was reused from the checkpoint.
    pub reused: usize,
    /// Records left untouched because of the run limit.
    pub remaining: usize,
    pub degraded: Vec<DegradedSignal>,
    pub entries: Vec<ScoredRecipe>,
}

/// Batch outcome: the rescored corpus (original order) plus the run report.
#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    pub recipes: Vec<Recipe>,
    pub report: BatchReport,
}

/// Score every record of a corpus snapshot independently.
///
/// Provider failures degrade that record to the neutral default and are
/// recorded; they never abort the batch. When a checkpoint is supplied,
/// records it already covers are reused without a fetch, and every freshly
/// scored record is checkpointed immediately. Only a checkpoint persistence
/// failure is fatal.
pub async fn score_corpus(
    corpus: &[Recipe],
    trends: &dyn TrendSignals,
    engagement: &dyn EngagementSignals,
    weights: &PopularityWeights,
    options: &BatchOptions,
    mut checkpoint: Option<&mut ScoreCheckpoint>,
) -> Result<BatchOutcome, StoreError> {
    let mut recipes = Vec::with_capacity(corpus.len());
    let mut report = BatchReport::default();

    for recipe in corpus {
        if let Some(entry) = checkpoint.as_ref().and_then(|cp| cp.get(&recipe.id)) {
            let mut updated = recipe.clone();
            updated.popularity_score_old = recipe.popularity_score;
            updated.popularity_score = entry.score;
            updated.popularity_last_updated = Some(entry.updated_at);
            report.entries.push(ScoredRecipe {
                id: updated.id.clone(),
                name: updated.name.clone(),
                old_score: recipe.popularity_score,
                new_score: entry.score,
            });
            report.reused += 1;
            recipes.push(updated);
            continue;
        }

        if options.limit.is_some_and(|limit| report.fetched >= limit) {
            report.remaining += 1;
            recipes.push(recipe.clone());
            continue;
        }

        let trend = match fetch_with_retry(|| trends.trend_score(&recipe.name), options).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(id = %recipe.id, "trend signal unavailable: {err}");
                report.degraded.push(DegradedSignal {
                    id: recipe.id.clone(),
                    detail: format!("trend: {err}"),
                });
                options.neutral_signal
            }
        };
        let engagement_value =
            match fetch_with_retry(|| engagement.engagement_score(&recipe.name), options).await {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(id = %recipe.id, "engagement signal unavailable: {err}");
                    report.degraded.push(DegradedSignal {
                        id: recipe.id.clone(),
                        detail: format!("engagement: {err}"),
                    });
                    options.neutral_signal
                }
            };

        let signals = SignalSet {
            trend,
            engagement: engagement_value,
            recency: options.recency_boost,
        };
        let score = popularity_score(recipe, &signals, weights);
        let updated_at = Utc::now();

        let mut updated = recipe.clone();
        updated.popularity_score_old = recipe.popularity_score;
        updated.popularity_score = score;
        updated.popularity_last_updated = Some(updated_at);

        if let Some(cp) = checkpoint.as_mut() {
            cp.record(&recipe.id, score, updated_at)?;
        }

        report.entries.push(ScoredRecipe {
            id: updated.id.clone(),
            name: updated.name.clone(),
            old_score: recipe.popularity_score,
            new_score: score,
        });
        report.fetched += 1;
        tracing::debug!(id = %recipe.id, score, "scored recipe");
        recipes.push(updated);

        if !options.request_delay.is_zero() {
            tokio::time::sleep(options.request_delay).await;
        }
    }

    Ok(BatchOutcome { recipes, report })
}

async fn fetch_with_retry<Fut>(
    mut attempt: impl FnMut() -> Fut,
    options: &BatchOptions,
) -> Result<f64, SignalError>
where
    Fut: Future<Output = Result<f64, SignalError>>,
{
    let mut backoff = options.retry_backoff;
    let mut last_error = SignalError::Timeout(options.fetch_timeout);

    for retry in 0..=options.max_retries {
        match tokio::time::timeout(options.fetch_timeout, attempt()).await {
            Ok(Ok(value)) => return Ok(value.clamp(0.0, 100.0)),
            Ok(Err(err)) => last_error = err,
            Err(_) => last_error = SignalError::Timeout(options.fetch_timeout),
        }
        if retry < options.max_retries {
            let jitter: f64 = rand::rng().random_range(0.0..1.0);
            tokio::time::sleep(backoff.mul_f64(1.0 + jitter)).await;
            backoff *= 2;
        }
    }
    Err(last_error)
}
