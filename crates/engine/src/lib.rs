//! Matching, deduplication and scoring engine for the recipe corpus.
//!
//! Everything here is a stateless transform over an immutable corpus
//! snapshot: normalizers feed the quality scorer, the quality scorer feeds
//! the duplicate resolver and the popularity scorer, and the match & rank
//! engine consumes a deduplicated snapshot plus raw query ingredients. The
//! one async path is the popularity batch pass, which talks to rate-limited
//! external signal providers.

pub mod classify;
pub mod dedup;
pub mod matching;
pub mod normalize;
pub mod popularity;
pub mod quality;
pub mod signals;

pub use classify::{AuditReport, IngredientClass, IngredientClassifier, infer_cuisine};
pub use dedup::{DedupOutcome, DedupStats, MergeGroup, SourcePriorities, resolve};
pub use matching::{RecipeMatch, SearchFilters, match_recipes, search_recipes};
pub use normalize::{NameKey, StopWords, canonical_key, normalize_ingredient};
pub use popularity::{
    BatchOptions, BatchReport, PopularityWeights, ScoredRecipe, SignalSet, popularity_score,
    score_corpus,
};
pub use quality::quality_score;
pub use signals::{
    EngagementSignals, FoodAliases, NeutralSignals, SignalError, TableSignals, TrendSignals,
};
