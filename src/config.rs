use std::env;
use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use myfridge_engine::popularity::BatchOptions;
use myfridge_engine::classify::{CuisineKeywords, IngredientClassifier};
use myfridge_engine::{FoodAliases, PopularityWeights, SourcePriorities, StopWords};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub popularity: PopularityConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
    /// Popularity-batch checkpoint location; defaults next to the store.
    #[serde(default)]
    pub checkpoint_path: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            checkpoint_path: None,
        }
    }
}

fn default_store_path() -> String {
    "data/recipes.json".to_string()
}

impl StoreConfig {
    pub fn checkpoint_path(&self) -> String {
        self.checkpoint_path
            .clone()
            .unwrap_or_else(|| format!("{}.checkpoint.json", self.path))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Duplicate-resolution tables. Values are hand-chosen upstream and treated
/// purely as configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DedupConfig {
    #[serde(default)]
    pub source_priorities: SourcePriorities,
    #[serde(default)]
    pub stop_words: StopWords,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PopularityConfig {
    #[serde(default)]
    pub weights: PopularityWeights,
    #[serde(default = "default_neutral_signal")]
    pub neutral_signal: f64,
    #[serde(default = "default_recency_boost")]
    pub recency_boost: f64,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Curated signal table document; neutral signals when unset.
    #[serde(default)]
    pub signals_path: Option<String>,
    #[serde(default)]
    pub aliases: FoodAliases,
}

impl Default for PopularityConfig {
    fn default() -> Self {
        Self {
            weights: PopularityWeights::default(),
            neutral_signal: default_neutral_signal(),
            recency_boost: default_recency_boost(),
            request_delay_ms: default_request_delay_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            signals_path: None,
            aliases: FoodAliases::default(),
        }
    }
}

fn default_neutral_signal() -> f64 {
    50.0
}

fn default_recency_boost() -> f64 {
    50.0
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl PopularityConfig {
    pub fn batch_options(&self, limit: Option<usize>) -> BatchOptions {
        BatchOptions {
            request_delay: Duration::from_millis(self.request_delay_ms),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_retries: self.max_retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            neutral_signal: self.neutral_signal,
            recency_boost: self.recency_boost,
            limit,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClassifyConfig {
    #[serde(default)]
    pub tables: IngredientClassifier,
    #[serde(default)]
    pub cuisines: CuisineKeywords,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MYFRIDGE__STORE__PATH, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional; defaults cover everything.
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MYFRIDGE")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.store.path.is_empty() {
            return Err("store path must not be empty".to_string());
        }
        self.popularity.weights.validate()?;
        if !(0.0..=100.0).contains(&self.popularity.neutral_signal) {
            return Err("neutral_signal must be within 0-100".to_string());
        }
        if !(0.0..=100.0).contains(&self.popularity.recency_boost) {
            return Err("recency_boost must be within 0-100".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config {
            store: StoreConfig::default(),
            observability: ObservabilityConfig::default(),
            dedup: DedupConfig::default(),
            popularity: PopularityConfig::default(),
            classify: ClassifyConfig::default(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut config = Config {
            store: StoreConfig::default(),
            observability: ObservabilityConfig::default(),
            dedup: DedupConfig::default(),
            popularity: PopularityConfig::default(),
            classify: ClassifyConfig::default(),
        };
        config.popularity.weights.trend = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_checkpoint_path_defaults_next_to_store() {
        let store = StoreConfig {
            path: "data/recipes.json".to_string(),
            checkpoint_path: None,
        };
        assert_eq!(store.checkpoint_path(), "data/recipes.json.checkpoint.json");
    }

    #[test]
    fn test_out_of_range_neutral_signal_rejected() {
        let mut config = Config {
            store: StoreConfig::default(),
            observability: ObservabilityConfig::default(),
            dedup: DedupConfig::default(),
            popularity: PopularityConfig::default(),
            classify: ClassifyConfig::default(),
        };
        config.popularity.neutral_signal = 150.0;
        assert!(config.validate().is_err());
    }
}
