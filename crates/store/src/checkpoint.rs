use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{StoreError, StoreResult};

/// One already-computed popularity score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointEntry {
    pub score: f64,
    pub updated_at: DateTime<Utc>,
}

/// Resumable progress of a popularity batch pass.
///
/// The batch persists the checkpoint after every scored record; an
/// interrupted run resumes without re-paying the fetch cost for recipes it
/// already scored. Same write-then-swap discipline as the corpus document.
#[derive(Debug, Default)]
pub struct ScoreCheckpoint {
    path: PathBuf,
    entries: BTreeMap<String, CheckpointEntry>,
}

impl ScoreCheckpoint {
    /// Load an existing checkpoint, or start empty when none exists.
    pub fn load_or_default(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|source| StoreError::MalformedDocument {
                    path: path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };
        Ok(Self { path, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, recipe_id: &str) -> Option<CheckpointEntry> {
        self.entries.get(recipe_id).copied()
    }

    /// Record a scored recipe and persist the checkpoint.
    pub fn record(&mut self, recipe_id: &str, score: f64, updated_at: DateTime<Utc>) -> StoreResult<()> {
        self.entries
            .insert(recipe_id.to_string(), CheckpointEntry { score, updated_at });
        self.persist()
    }

    /// Delete the checkpoint file after a fully written-back run.
    pub fn clear(self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                path: self.path,
                source,
            }),
        }
    }

    fn persist(&self) -> StoreResult<()> {
        let document = serde_json::to_string(&self.entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, document).map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}
