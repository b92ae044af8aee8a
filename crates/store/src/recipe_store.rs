use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use myfridge_types::Recipe;
use serde_json::Value;

use crate::{StoreError, StoreResult};

/// Counts reported by a tolerant load pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Records skipped because they were unparseable or missing `id`.
    pub skipped: usize,
}

/// Handle on the corpus document.
///
/// Owns the full ordered collection; consumers get immutable snapshots via
/// [`RecipeStore::recipes`]. Mutation happens only through [`RecipeStore::save`].
pub struct RecipeStore {
    path: PathBuf,
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Create a handle without touching the filesystem. Call
    /// [`RecipeStore::load`] before reading.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recipes: Vec::new(),
        }
    }

    /// The current in-memory snapshot.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Load the corpus from disk.
    ///
    /// Each array element is decoded independently: a record that fails to
    /// decode, or that has no `id`, is skipped and counted rather than
    /// failing the load. Missing optional keys are defaulted by the record
    /// type.
    pub fn load(&mut self) -> StoreResult<LoadReport> {
        let raw = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let values: Vec<Value> =
            serde_json::from_str(&raw).map_err(|source| StoreError::MalformedDocument {
                path: self.path.clone(),
                source,
            })?;

        let mut recipes = Vec::with_capacity(values.len());
        let mut skipped = 0usize;
        for value in values {
            match serde_json::from_value::<Recipe>(value) {
                Ok(recipe) if !recipe.id.is_empty() => recipes.push(recipe),
                Ok(_) => {
                    skipped += 1;
                    tracing::warn!("skipping record without id");
                }
                Err(err) => {
                    skipped += 1;
                    tracing::warn!("skipping malformed record: {err}");
                }
            }
        }

        let report = LoadReport {
            loaded: recipes.len(),
            skipped,
        };
        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped,
            "loaded recipe corpus from {}",
            self.path.display()
        );
        self.recipes = recipes;
        Ok(report)
    }

    /// Re-read the corpus from disk, replacing the in-memory snapshot.
    pub fn reload(&mut self) -> StoreResult<LoadReport> {
        self.load()
    }

    /// Persist `recipes` as the new corpus.
    ///
    /// Writes the full document to a scratch file next to the live one, then
    /// renames it into place. Any failure leaves the live store untouched.
    pub fn save(&mut self, recipes: &[Recipe]) -> StoreResult<()> {
        let document = serde_json::to_string_pretty(recipes)?;
        let tmp_path = self.path.with_extension("json.tmp");

        fs::write(&tmp_path, document).map_err(|source| StoreError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| {
            // Leave no scratch file behind on a failed swap.
            let _ = fs::remove_file(&tmp_path);
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::info!(count = recipes.len(), "saved corpus to {}", self.path.display());
        self.recipes = recipes.to_vec();
        Ok(())
    }

    /// Copy the live store to a timestamped sibling and return its path.
    /// Destructive commands call this before any write-back.
    pub fn backup(&self) -> StoreResult<PathBuf> {
        let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("recipes");
        let backup_path = self.path.with_file_name(format!("{stem}.backup-{stamp}.json"));

        fs::copy(&self.path, &backup_path).map_err(|source| StoreError::Write {
            path: backup_path.clone(),
            source,
        })?;
        tracing::info!("backup written to {}", backup_path.display());
        Ok(backup_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    fn recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            ..Recipe::default()
        }
    }

    #[test]
    fn test_round_trip_preserves_records_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        let corpus = vec![recipe("a_1", "Pad Thai"), recipe("b_2", "Chicken Soup")];

        let mut store = RecipeStore::open(&path);
        store.save(&corpus).unwrap();

        let mut reread = RecipeStore::open(&path);
        let report = reread.load().unwrap();
        assert_eq!(report, LoadReport { loaded: 2, skipped: 0 });
        assert_eq!(reread.recipes(), corpus.as_slice());
    }

    #[test]
    fn test_malformed_records_are_skipped_and_counted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        fs::write(
            &path,
            r#"[
                {"id": "ok_1", "name": "Fried Rice"},
                {"name": "no id here"},
                {"id": "ok_2", "ingredients": "not-a-list"},
                {"id": "ok_3", "name": "Tacos"}
            ]"#,
        )
        .unwrap();

        let mut store = RecipeStore::open(&path);
        let report = store.load().unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 2);
        assert!(store.find_by_id("ok_3").is_some());
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        let mut store = RecipeStore::open(&path);
        store.save(&[recipe("a_1", "Pizza")]).unwrap();
        store.load().unwrap();

        // Another writer replaces the document behind this handle's back.
        let mut other = RecipeStore::open(&path);
        other
            .save(&[recipe("a_1", "Pizza"), recipe("b_2", "Soup")])
            .unwrap();

        let report = store.reload().unwrap();
        assert_eq!(report.loaded, 2);
        assert!(store.find_by_id("b_2").is_some());
    }

    #[test]
    fn test_missing_store_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = RecipeStore::open(dir.path().join("absent.json"));
        assert!(matches!(store.load(), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_document_that_is_not_an_array_fails_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        fs::write(&path, r#"{"id": "solo"}"#).unwrap();

        let mut store = RecipeStore::open(&path);
        assert!(matches!(
            store.load(),
            Err(StoreError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_save_leaves_no_scratch_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        let mut store = RecipeStore::open(&path);
        store.save(&[recipe("a_1", "Pizza")]).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_backup_copies_live_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        let mut store = RecipeStore::open(&path);
        store.save(&[recipe("a_1", "Pizza")]).unwrap();

        let backup_path = store.backup().unwrap();
        assert!(backup_path.exists());
        assert_ne!(backup_path, path);

        let mut backup_store = RecipeStore::open(&backup_path);
        assert_eq!(backup_store.load().unwrap().loaded, 1);
    }

    #[test]
    fn test_save_to_unwritable_path_leaves_original_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.json");
        let mut store = RecipeStore::open(&path);
        store.save(&[recipe("a_1", "Pizza")]).unwrap();

        // Point a second handle at a path whose parent does not exist.
        let mut broken = RecipeStore::open(dir.path().join("missing-dir").join("recipes.json"));
        assert!(matches!(
            broken.save(&[recipe("b_2", "Soup")]),
            Err(StoreError::Write { .. })
        ));

        let mut original = RecipeStore::open(&path);
        assert_eq!(original.load().unwrap().loaded, 1);
    }
}
