//! External demand-signal providers.
//!
//! Trend and engagement signals are 0-100 values fetched per recipe name
//! from rate-limited external collaborators. Providers are fallible; the
//! popularity batch degrades a failed fetch to a configured neutral default
//! instead of failing the recipe.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("signal provider unavailable: {0}")]
    Unavailable(String),

    #[error("signal fetch timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("no signal known for '{0}'")]
    Unknown(String),
}

/// Search-interest ("buzz") signal provider.
#[async_trait]
pub trait TrendSignals: Send + Sync {
    /// Interest score in 0-100 for a recipe name.
    async fn trend_score(&self, name: &str) -> Result<f64, SignalError>;
}

/// Platform engagement (ratings/reviews/saves) signal provider.
#[async_trait]
pub trait EngagementSignals: Send + Sync {
    /// Engagement score in 0-100 for a recipe name.
    async fn engagement_score(&self, name: &str) -> Result<f64, SignalError>;
}

/// Provider that always answers with one fixed value. Used as the offline
/// stand-in when no signal source is configured.
#[derive(Clone, Copy, Debug)]
pub struct NeutralSignals {
    pub value: f64,
}

impl Default for NeutralSignals {
    fn default() -> Self {
        Self { value: 50.0 }
    }
}

#[async_trait]
impl TrendSignals for NeutralSignals {
    async fn trend_score(&self, _name: &str) -> Result<f64, SignalError> {
        Ok(self.value)
    }
}

#[async_trait]
impl EngagementSignals for NeutralSignals {
    async fn engagement_score(&self, _name: &str) -> Result<f64, SignalError> {
        Ok(self.value)
    }
}

/// Alias table expanding a recipe name into the search terms a signal
/// provider should be queried with ("pad thai" also covers "phad thai").
/// Swappable configuration data.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct FoodAliases(pub HashMap<String, Vec<String>>);

impl FoodAliases {
    /// All search terms for a recipe name: the main term first, then its
    /// aliases. Falls back to the lowercased name itself.
    pub fn search_terms(&self, recipe_name: &str) -> Vec<String> {
        let lowered = recipe_name.to_lowercase();
        let lowered = lowered.trim();
        for (main_term, aliases) in &self.0 {
            if lowered.contains(main_term.as_str()) || aliases.iter().any(|alias| alias == lowered)
            {
                let mut terms = vec![main_term.clone()];
                terms.extend(aliases.iter().cloned());
                return terms;
            }
        }
        vec![lowered.to_string()]
    }
}

/// Curated name -> signal table loaded from a JSON document. Lookup tries
/// every alias-expanded search term; a name with no entry is an error so
/// the batch records the degradation.
#[derive(Clone, Debug, Default)]
pub struct TableSignals {
    trend: HashMap<String, f64>,
    engagement: HashMap<String, f64>,
    aliases: FoodAliases,
}

#[derive(Debug, Default, Deserialize)]
struct SignalDocument {
    #[serde(default)]
    trend: HashMap<String, f64>,
    #[serde(default)]
    engagement: HashMap<String, f64>,
}

impl TableSignals {
    pub fn new(
        trend: HashMap<String, f64>,
        engagement: HashMap<String, f64>,
        aliases: FoodAliases,
    ) -> Self {
        Self {
            trend,
            engagement,
            aliases,
        }
    }

    /// Load a `{"trend": {...}, "engagement": {...}}` document.
    pub fn from_file(path: &Path, aliases: FoodAliases) -> Result<Self, SignalError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| SignalError::Unavailable(format!("{}: {err}", path.display())))?;
        let document: SignalDocument = serde_json::from_str(&raw)
            .map_err(|err| SignalError::Unavailable(format!("{}: {err}", path.display())))?;
        Ok(Self::new(document.trend, document.engagement, aliases))
    }

    fn lookup(&self, table: &HashMap<String, f64>, name: &str) -> Result<f64, SignalError> {
        self.aliases
            .search_terms(name)
            .iter()
            .find_map(|term| table.get(term).copied())
            .ok_or_else(|| SignalError::Unknown(name.to_string()))
    }
}

#[async_trait]
impl TrendSignals for TableSignals {
    async fn trend_score(&self, name: &str) -> Result<f64, SignalError> {
        self.lookup(&self.trend, name)
    }
}

#[async_trait]
impl EngagementSignals for TableSignals {
    async fn engagement_score(&self, name: &str) -> Result<f64, SignalError> {
        self.lookup(&self.engagement, name)
    }
}
