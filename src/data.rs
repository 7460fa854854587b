//! Catalog Loading and Management
//!
//! Handles loading recipe catalogs from JSON or CSV exports, preparing every
//! record through `Recipe::prepare`, and falling back to the built-in fixture
//! catalog when the primary source is unavailable.
//!
//! The catalog is read-only once built: sustainability indices are computed
//! exactly once here, never during search.

use crate::fixtures::builtin_recipes;
use crate::recipe::{parse_decimal, RawRecipe, Recipe, RecipeError};
use crate::scorer::SustainabilityScorer;
use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a catalog came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum CatalogSource {
    Json(PathBuf),
    Csv(PathBuf),
    /// Built-in fixture recipes (degraded mode when substituted for a real source)
    Fixture,
    /// Records supplied directly by the caller
    Records,
}

/// A record that did not make it into the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedRecord {
    /// Position in the source
    pub index: usize,
    pub reason: String,
}

/// Outcome of catalog preparation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreparationReport {
    pub total: usize,
    pub loaded: usize,
    pub low_confidence: usize,
    pub dropped: Vec<DroppedRecord>,
}

/// Prepared, read-only recipe catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    index: FxHashMap<u64, usize>,
    source: CatalogSource,
    degraded: bool,
}

impl Catalog {
    /// Prepare raw records into a catalog
    ///
    /// Records are prepared in parallel (order preserved), then deduplicated
    /// by id keeping the first occurrence.
    pub fn prepare(
        raws: Vec<RawRecipe>,
        scorer: &SustainabilityScorer,
        source: CatalogSource,
    ) -> (Self, PreparationReport) {
        let prepared: Vec<Result<Recipe, RecipeError>> = raws
            .into_par_iter()
            .map(|raw| Recipe::prepare(raw, scorer))
            .collect();

        Self::from_prepared(prepared, source)
    }

    fn from_prepared(
        prepared: Vec<Result<Recipe, RecipeError>>,
        source: CatalogSource,
    ) -> (Self, PreparationReport) {
        let mut report = PreparationReport {
            total: prepared.len(),
            ..Default::default()
        };
        let mut recipes = Vec::with_capacity(prepared.len());
        let mut index = FxHashMap::default();

        for (position, result) in prepared.into_iter().enumerate() {
            let outcome = result.and_then(|recipe| {
                if index.contains_key(&recipe.id) {
                    Err(RecipeError::DuplicateId(recipe.id))
                } else {
                    Ok(recipe)
                }
            });

            match outcome {
                Ok(recipe) => {
                    if recipe.low_confidence {
                        report.low_confidence += 1;
                    }
                    index.insert(recipe.id, recipes.len());
                    recipes.push(recipe);
                }
                Err(reason) => {
                    tracing::warn!("Dropping catalog record {}: {}", position, reason);
                    report.dropped.push(DroppedRecord {
                        index: position,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        report.loaded = recipes.len();
        tracing::info!(
            "Catalog prepared: {} loaded, {} dropped, {} low-confidence",
            report.loaded,
            report.dropped.len(),
            report.low_confidence
        );

        let catalog = Self {
            recipes,
            index,
            source,
            degraded: false,
        };
        (catalog, report)
    }

    /// Built-in fixture catalog
    pub fn fixture(scorer: &SustainabilityScorer) -> (Self, PreparationReport) {
        Self::prepare(builtin_recipes(), scorer, CatalogSource::Fixture)
    }

    /// Load a catalog, choosing the reader by file extension (`.csv` or JSON)
    pub fn load(path: &Path, scorer: &SustainabilityScorer) -> Result<(Self, PreparationReport)> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            Self::load_csv(path, scorer)
        } else {
            Self::load_json(path, scorer)
        }
    }

    /// Load the primary catalog, substituting the fixture catalog on failure
    ///
    /// A missing path, an unreadable file, or a source with zero usable
    /// recipes all switch to degraded mode.
    pub fn load_or_fallback(
        path: Option<&Path>,
        scorer: &SustainabilityScorer,
    ) -> (Self, PreparationReport) {
        let loaded = match path {
            Some(path) => Self::load(path, scorer),
            None => Err(anyhow::anyhow!("no catalog path configured")),
        };

        match loaded {
            Ok((catalog, report)) if !catalog.is_empty() => (catalog, report),
            Ok(_) => {
                tracing::warn!("Catalog source has no usable recipes - using built-in fixtures (degraded mode)");
                Self::degraded_fixture(scorer)
            }
            Err(e) => {
                tracing::warn!("Catalog unavailable ({:#}) - using built-in fixtures (degraded mode)", e);
                Self::degraded_fixture(scorer)
            }
        }
    }

    fn degraded_fixture(scorer: &SustainabilityScorer) -> (Self, PreparationReport) {
        let (mut catalog, report) = Self::fixture(scorer);
        catalog.degraded = true;
        (catalog, report)
    }

    /// Load a JSON catalog: either an array of records or `{ "recipes": [...] }`
    pub fn load_json(path: &Path, scorer: &SustainabilityScorer) -> Result<(Self, PreparationReport)> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        let value: Value = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse catalog JSON")?;

        let records = match value {
            Value::Array(records) => records,
            Value::Object(mut map) => match map.remove("recipes") {
                Some(Value::Array(records)) => records,
                _ => anyhow::bail!("Catalog JSON object has no 'recipes' array"),
            },
            _ => anyhow::bail!("Catalog JSON must be an array of recipe records"),
        };

        // Non-object records cannot be decoded; keep them as placeholders so
        // they are reported with their position.
        let prepared: Vec<Result<Recipe, RecipeError>> = records
            .into_par_iter()
            .map(|record| {
                let raw: RawRecipe = serde_json::from_value(record).unwrap_or_default();
                Recipe::prepare(raw, scorer)
            })
            .collect();

        Ok(Self::from_prepared(prepared, CatalogSource::Json(path.to_path_buf())))
    }

    /// Load a CSV catalog export (R-style list columns are fine)
    pub fn load_csv(path: &Path, scorer: &SustainabilityScorer) -> Result<(Self, PreparationReport)> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| "Failed to load catalog CSV")?;

        let raws = raw_recipes_from_dataframe(&df);
        Ok(Self::prepare(raws, scorer, CatalogSource::Csv(path.to_path_buf())))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: u64) -> Option<&Recipe> {
        self.index.get(&id).map(|&i| &self.recipes[i])
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// True when the fixture catalog stands in for an unavailable source
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

// ============================================================================
// CSV decoding
// ============================================================================

/// First present column among `names`, as f64 (non-numeric cells → None)
fn f64_column(df: &DataFrame, names: &[&str]) -> Vec<Option<f64>> {
    for name in names {
        let Ok(column) = df.column(name) else { continue };
        // text columns may carry decimal commas ("20,5")
        if let Ok(values) = column.str() {
            return values.into_iter().map(|v| v.and_then(parse_decimal)).collect();
        }
        if let Ok(cast) = column.cast(&DataType::Float64) {
            if let Ok(values) = cast.f64() {
                return values.into_iter().collect();
            }
        }
    }
    vec![None; df.height()]
}

/// First present column among `names`, as strings
fn str_column(df: &DataFrame, names: &[&str]) -> Vec<Option<String>> {
    for name in names {
        let Ok(column) = df.column(name) else { continue };
        if let Ok(cast) = column.cast(&DataType::String) {
            if let Ok(values) = cast.str() {
                return values.into_iter().map(|v| v.map(str::to_string)).collect();
            }
        }
    }
    vec![None; df.height()]
}

fn raw_recipes_from_dataframe(df: &DataFrame) -> Vec<RawRecipe> {
    let ids = f64_column(df, &["id", "recipe_id", "RecipeId"]);
    let names = str_column(df, &["name", "title", "Name"]);
    let ingredients = str_column(df, &["ingredients", "RecipeIngredientParts", "ingredients_raw"]);
    let categories = str_column(df, &["category"]);
    let env = f64_column(df, &["env_score", "environmental_score", "env"]);
    let nutri = f64_column(df, &["nutri_score", "nutrition_score", "nutri"]);
    let instructions = str_column(df, &["instructions", "RecipeInstructions"]);

    (0..df.height())
        .map(|i| RawRecipe {
            id: ids[i].filter(|v| v.fract() == 0.0).map(|v| v as i64),
            name: names[i].clone(),
            ingredients: ingredients[i].clone(),
            category: categories[i].clone(),
            env_score: env[i],
            nutri_score: nutri[i],
            instructions: instructions[i].clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_fixture_catalog() {
        let (catalog, report) = Catalog::fixture(&SustainabilityScorer::default());
        assert_eq!(report.loaded, catalog.len());
        assert!(report.dropped.is_empty());
        assert!(!catalog.is_degraded());
        assert_eq!(catalog.get(1).map(|r| r.name.as_str()), Some("Lencseleves"));
    }

    #[test]
    fn test_prepare_drops_bad_records_and_duplicates() {
        let raws: Vec<RawRecipe> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "A", "env_score": 10, "nutri_score": 50},
                {"id": -1, "name": "B", "env_score": 10, "nutri_score": 50},
                {"id": 1, "name": "A again", "env_score": 20, "nutri_score": 50},
                {"id": 2, "name": "C", "nutri_score": 50},
                {"id": 3, "name": "D"}
            ]"#,
        )
        .unwrap();

        let (catalog, report) =
            Catalog::prepare(raws, &SustainabilityScorer::default(), CatalogSource::Records);

        assert_eq!(report.total, 5);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.low_confidence, 1);
        assert_eq!(
            report.dropped.iter().map(|d| d.index).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
        assert_eq!(catalog.get(1).map(|r| r.name.as_str()), Some("A"));
    }

    #[test]
    fn test_load_json_wrapped_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(
            &dir,
            "wrapped.json",
            r#"{"recipes": [{"id": 5, "name": "Bableves", "ingredients": "bab, hagyma", "env_score": 20, "nutri_score": 70}, 42]}"#,
        );
        let (catalog, report) = Catalog::load_json(&path, &SustainabilityScorer::default()).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(catalog.source(), &CatalogSource::Json(path));
    }

    #[test]
    fn test_load_csv_with_r_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(
            &dir,
            "catalog.csv",
            "id,name,ingredients,env_score,nutri_score\n\
             1,Lencseleves,\"c(\"\"lencse\"\", \"\"hagyma\"\")\",15,82\n\
             2,Marhapörkölt,\"c(\"\"marha\"\", \"\"hagyma\"\")\",88,38\n",
        );
        let (catalog, report) = Catalog::load_csv(&path, &SustainabilityScorer::default()).unwrap();

        assert_eq!(report.loaded, 2);
        let lentil = catalog.get(1).unwrap();
        assert_eq!(lentil.ingredients, vec!["lencse", "hagyma"]);
    }

    #[test]
    fn test_load_csv_decimal_comma_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(
            &dir,
            "comma.csv",
            "id,name,ingredients,env_score,nutri_score\n\
             1,Lencseleves,lencse,\"25,5\",\"78,2\"\n\
             2,Bableves,bab,\"20\",\"n/a\"\n",
        );
        let (catalog, report) = Catalog::load_csv(&path, &SustainabilityScorer::default()).unwrap();

        assert_eq!(report.loaded, 2);
        let lentil = catalog.get(1).unwrap();
        assert_eq!(lentil.env_score, 25.5);
        assert_eq!(lentil.nutri_score, 78.2);
        assert!(!lentil.low_confidence);
        assert!(catalog.get(2).unwrap().low_confidence);
    }

    #[test]
    fn test_fallback_when_missing() {
        let (catalog, _) = Catalog::load_or_fallback(
            Some(Path::new("/nonexistent/catalog.json")),
            &SustainabilityScorer::default(),
        );
        assert!(catalog.is_degraded());
        assert_eq!(catalog.source(), &CatalogSource::Fixture);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_fallback_when_no_usable_recipes() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "empty.json", "[]");
        let (catalog, _) = Catalog::load_or_fallback(Some(&path), &SustainabilityScorer::default());
        assert!(catalog.is_degraded());
    }
}
