//! Model bundle persistence
//!
//! A bundle is the unit of deployment: the fitted pipeline plus the
//! declared numeric and categorical feature lists, serialized as one
//! pretty-printed JSON document. The service loads exactly one bundle
//! at startup and never reloads it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BankmarkError, Result};
use crate::pipeline::Pipeline;
use crate::schema::{self, FieldKind};

/// A fitted pipeline with its feature declarations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub pipeline: Pipeline,
    pub numeric_features: Vec<String>,
    pub categorical_features: Vec<String>,
}

impl ModelBundle {
    /// Build a bundle around a pipeline, declaring the pipeline's own columns
    pub fn new(pipeline: Pipeline) -> Self {
        let numeric_features = pipeline.numeric_columns().to_vec();
        let categorical_features = pipeline.categorical_columns().to_vec();
        Self {
            pipeline,
            numeric_features,
            categorical_features,
        }
    }

    /// All declared feature names, numeric first, in declaration order
    ///
    /// This is the order clients see in metadata and the order records
    /// are framed in before prediction.
    pub fn all_features(&self) -> Vec<String> {
        let mut features = self.numeric_features.clone();
        features.extend(self.categorical_features.iter().cloned());
        features
    }

    /// Save the bundle to a file as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a bundle from a file
    ///
    /// A missing file is reported as [`BankmarkError::BundleMissing`] so
    /// callers can fail fast with a message naming the path.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BankmarkError::BundleMissing(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        let bundle: Self = serde_json::from_str(&json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Check the declarations against the schema and the pipeline
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in self.all_features() {
            if !seen.insert(name.clone()) {
                return Err(BankmarkError::SchemaError(format!(
                    "feature '{}' is declared more than once",
                    name
                )));
            }
        }

        for name in &self.numeric_features {
            match schema::kind_of(name) {
                Some(FieldKind::Numeric) => {}
                Some(FieldKind::Categorical) => {
                    return Err(BankmarkError::SchemaError(format!(
                        "feature '{}' is categorical but declared numeric",
                        name
                    )))
                }
                None => {
                    return Err(BankmarkError::SchemaError(format!(
                        "unknown numeric feature '{}'",
                        name
                    )))
                }
            }
        }
        for name in &self.categorical_features {
            match schema::kind_of(name) {
                Some(FieldKind::Categorical) => {}
                Some(FieldKind::Numeric) => {
                    return Err(BankmarkError::SchemaError(format!(
                        "feature '{}' is numeric but declared categorical",
                        name
                    )))
                }
                None => {
                    return Err(BankmarkError::SchemaError(format!(
                        "unknown categorical feature '{}'",
                        name
                    )))
                }
            }
        }

        if self.pipeline.numeric_columns() != self.numeric_features.as_slice() {
            return Err(BankmarkError::SchemaError(
                "declared numeric features do not match the pipeline's columns".to_string(),
            ));
        }
        if self.pipeline.categorical_columns() != self.categorical_features.as_slice() {
            return Err(BankmarkError::SchemaError(
                "declared categorical features do not match the pipeline's columns".to_string(),
            ));
        }

        self.pipeline.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{LogisticModel, OneHotEncoder};
    use ndarray::Array1;
    use std::collections::HashMap;

    fn small_bundle() -> ModelBundle {
        let mut categories = HashMap::new();
        categories.insert(
            "loan".to_string(),
            vec!["yes".to_string(), "no".to_string(), "unknown".to_string()],
        );

        let pipeline = Pipeline::new(
            vec!["age".to_string(), "balance".to_string()],
            vec!["loan".to_string()],
            OneHotEncoder::new(categories),
            LogisticModel::new(Array1::from_vec(vec![0.1, -0.2, 0.3, 0.0, -0.1]), 0.5),
        );
        ModelBundle::new(pipeline)
    }

    #[test]
    fn test_all_features_order() {
        let bundle = small_bundle();
        assert_eq!(bundle.all_features(), vec!["age", "balance", "loan"]);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("bundle.json");

        let bundle = small_bundle();
        bundle.save(&path).unwrap();

        let loaded = ModelBundle::load(&path).unwrap();
        assert_eq!(loaded.numeric_features, bundle.numeric_features);
        assert_eq!(loaded.categorical_features, bundle.categorical_features);
        assert_eq!(
            loaded.pipeline.design_width().unwrap(),
            bundle.pipeline.design_width().unwrap()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = ModelBundle::load(&path).unwrap_err();
        assert!(matches!(err, BankmarkError::BundleMissing(_)));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ModelBundle::load(&path).unwrap_err();
        assert!(matches!(err, BankmarkError::SerializationError(_)));
    }

    #[test]
    fn test_validate_unknown_feature() {
        let mut bundle = small_bundle();
        bundle.numeric_features.push("salary".to_string());

        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn test_validate_kind_mismatch() {
        let mut bundle = small_bundle();
        bundle.numeric_features.push("job".to_string());

        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("categorical but declared numeric"));
    }

    #[test]
    fn test_validate_duplicate_feature() {
        let mut bundle = small_bundle();
        bundle.categorical_features.push("loan".to_string());

        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_pipeline_mismatch() {
        let mut bundle = small_bundle();
        bundle.numeric_features = vec!["age".to_string()];

        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[test]
    fn test_load_rejects_inconsistent_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");

        let mut bundle = small_bundle();
        bundle.numeric_features = vec!["age".to_string()];
        // save() does not validate; the exporter is trusted, load() is not
        bundle.save(&path).unwrap();

        let err = ModelBundle::load(&path).unwrap_err();
        assert!(matches!(err, BankmarkError::SchemaError(_)));
    }
}
