use crate::catalog::recipe::Recipe;
use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Dataset compiled into the binary, used when no dataset path is configured.
const BUNDLED_DATASET: &str = include_str!("../../data/recipes.json");

/// Immutable, in-memory recipe collection.
///
/// Built once at startup and shared read-only (behind an `Arc`) by every
/// request. There is no mutation path after construction.
#[derive(Debug, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

/// Outcome of loading a dataset.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone)]
pub struct RejectedRecord {
    /// Zero-based position of the record in the dataset array
    pub position: usize,
    pub reason: String,
}

impl RecipeStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store from already-parsed records, dropping duplicate ids.
    pub fn from_records(records: Vec<Recipe>) -> Self {
        let mut recipes = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for recipe in records {
            if by_id.contains_key(&recipe.id) {
                warn!("Dropping recipe with duplicate id: {}", recipe.id);
                continue;
            }
            by_id.insert(recipe.id.clone(), recipes.len());
            recipes.push(recipe);
        }

        Self { recipes, by_id }
    }

    /// Parse a JSON dataset. The document must be an array of recipe
    /// objects; individual malformed records are rejected and reported,
    /// a malformed document is an error.
    pub fn from_json(content: &str) -> Result<(Self, LoadReport)> {
        let document: Value = serde_json::from_str(content)?;
        let entries = match document {
            Value::Array(entries) => entries,
            _ => {
                return Err(Error::Dataset(
                    "Dataset must be a JSON array of recipes".to_string(),
                ))
            }
        };

        let mut report = LoadReport::default();
        let mut records = Vec::with_capacity(entries.len());
        let mut seen = HashMap::new();

        for (position, entry) in entries.into_iter().enumerate() {
            match parse_record(entry) {
                Ok(recipe) => {
                    if let Some(first) = seen.get(&recipe.id) {
                        report.rejected.push(RejectedRecord {
                            position,
                            reason: format!(
                                "duplicate id '{}' (first seen at position {first})",
                                recipe.id
                            ),
                        });
                        continue;
                    }
                    seen.insert(recipe.id.clone(), position);
                    records.push(recipe);
                }
                Err(reason) => report.rejected.push(RejectedRecord { position, reason }),
            }
        }

        for rejected in &report.rejected {
            warn!(
                "Rejected recipe record at position {}: {}",
                rejected.position, rejected.reason
            );
        }

        report.accepted = records.len();
        Ok((Self::from_records(records), report))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<(Self, LoadReport)> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Dataset(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Load the dataset compiled into the binary.
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED_DATASET) {
            Ok((store, report)) => {
                info!(
                    "Loaded bundled dataset: {} recipes ({} rejected)",
                    report.accepted,
                    report.rejected.len()
                );
                store
            }
            Err(e) => {
                warn!("Bundled dataset is unusable: {}", e.log_safe());
                Self::empty()
            }
        }
    }

    /// Load the configured dataset, or the bundled one when no path is set.
    ///
    /// Fails closed: any load error is logged and yields an empty store, so
    /// the catalog keeps working and simply shows no recipes.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::bundled();
        };

        match Self::from_file(path) {
            Ok((store, report)) => {
                info!(
                    "Loaded dataset from {}: {} recipes ({} rejected)",
                    path.display(),
                    report.accepted,
                    report.rejected.len()
                );
                store
            }
            Err(e) => {
                warn!(
                    "Failed to load dataset from {}: {}",
                    path.display(),
                    e.log_safe()
                );
                warn!("Continuing with an empty recipe store");
                Self::empty()
            }
        }
    }

    pub fn records(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&index| &self.recipes[index])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

fn parse_record(entry: Value) -> std::result::Result<Recipe, String> {
    let object = entry
        .as_object()
        .ok_or_else(|| "record is not an object".to_string())?;

    for field in ["id", "name"] {
        match object.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(Value::String(_)) => return Err(format!("'{field}' is blank")),
            Some(_) => return Err(format!("'{field}' is not a string")),
            None => return Err(format!("missing required field '{field}'")),
        }
    }

    serde_json::from_value(entry).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_dataset_loads() {
        let store = RecipeStore::bundled();
        assert!(store.len() >= 20);
        assert!(store.get("nasi-goreng").is_some());
    }

    #[test]
    fn test_rejects_records_missing_required_fields() {
        let json = r#"[
            {"id": "1", "name": "Nasi Goreng"},
            {"name": "No Id"},
            {"id": "3"},
            {"id": "  ", "name": "Blank Id"},
            {"id": 5, "name": "Numeric Id"},
            "not an object",
            {"id": "7", "name": "Soto Ayam", "servings": 4}
        ]"#;

        let (store, report) = RecipeStore::from_json(json).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 5);
        assert_eq!(report.rejected[0].position, 1);
        assert!(report.rejected[0].reason.contains("id"));
        assert_eq!(store.records()[1].name, "Soto Ayam");
    }

    #[test]
    fn test_bundled_images_are_shipped() {
        let static_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
        for recipe in RecipeStore::bundled().records() {
            let asset = recipe
                .image
                .strip_prefix("/static/")
                .unwrap_or_else(|| panic!("{} image is not a static asset", recipe.id));
            assert!(
                static_dir.join(asset).is_file(),
                "missing image for {}: {}",
                recipe.id,
                recipe.image
            );
        }
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let json = r#"[
            {"id": "1", "name": "Rawon"},
            {"id": "1", "name": "Rawon Copy"}
        ]"#;

        let (store, report) = RecipeStore::from_json(json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").unwrap().name, "Rawon");
        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].reason.contains("duplicate"));
    }

    #[test]
    fn test_non_array_document_is_error() {
        assert!(RecipeStore::from_json(r#"{"id": "1"}"#).is_err());
        assert!(RecipeStore::from_json("not json").is_err());
    }

    #[test]
    fn test_load_or_empty_fails_closed() {
        let missing = std::path::PathBuf::from("/nonexistent/recipes.json");
        let store = RecipeStore::load_or_empty(Some(&missing));
        assert!(store.is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"id\": \"x\"").unwrap();
        let store = RecipeStore::load_or_empty(Some(file.path()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "name": "Gado-Gado", "ingredients": ["tahu", "tempe"]}}]"#
        )
        .unwrap();

        let store = RecipeStore::load_or_empty(Some(file.path()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().ingredient_list().len(), 2);
    }
}
