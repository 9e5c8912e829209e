//! One-hot encoding with training-time category vocabularies

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{BankmarkError, Result};

/// One-hot encoder over fixed, ordered category lists
///
/// For each covered column the encoder emits one indicator column per known
/// category, named `{column}_{category}`, and drops the original. A value
/// outside the vocabulary, or a null, turns the whole block to zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: HashMap<String, Vec<String>>,
}

impl OneHotEncoder {
    pub fn new(categories: HashMap<String, Vec<String>>) -> Self {
        Self { categories }
    }

    /// Ordered category vocabulary for a column
    pub fn categories_for(&self, column: &str) -> Option<&[String]> {
        self.categories.get(column).map(|c| c.as_slice())
    }

    /// Indicator column names for a column, in vocabulary order
    pub fn expanded_names(&self, column: &str) -> Option<Vec<String>> {
        self.categories
            .get(column)
            .map(|cats| cats.iter().map(|c| format!("{}_{}", column, c)).collect())
    }

    /// Number of indicator columns a column expands into
    pub fn width_of(&self, column: &str) -> Option<usize> {
        self.categories.get(column).map(|c| c.len())
    }

    /// Expand every covered column into its indicator block
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for (col_name, cats) in &self.categories {
            if let Ok(column) = df.column(col_name) {
                let ca = column
                    .as_materialized_series()
                    .str()
                    .map_err(|e| BankmarkError::DataError(e.to_string()))?;

                for category in cats {
                    let indicator_name = format!("{}_{}", col_name, category);
                    let values: Vec<f64> = ca
                        .into_iter()
                        .map(|v| if v == Some(category.as_str()) { 1.0 } else { 0.0 })
                        .collect();

                    result = result
                        .with_column(Series::new(indicator_name.into(), values))
                        .map_err(|e| BankmarkError::DataError(e.to_string()))?
                        .clone();
                }

                result = result
                    .drop(col_name)
                    .map_err(|e| BankmarkError::DataError(e.to_string()))?;
            }
        }

        Ok(result)
    }
}
