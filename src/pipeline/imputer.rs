//! Missing value fills captured at training time

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{BankmarkError, Result};

/// Fill values for numeric columns, typically training-set means or medians
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericImputer {
    fills: HashMap<String, f64>,
}

impl NumericImputer {
    pub fn new(fills: HashMap<String, f64>) -> Self {
        Self { fills }
    }

    /// Fill value recorded for a column, if any
    pub fn fill_for(&self, column: &str) -> Option<f64> {
        self.fills.get(column).copied()
    }

    /// Replace nulls in covered columns with their recorded fill value
    ///
    /// Columns without a recorded fill pass through untouched.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for (col_name, fill) in &self.fills {
            if let Ok(column) = df.column(col_name) {
                let ca = column
                    .as_materialized_series()
                    .f64()
                    .map_err(|e| BankmarkError::DataError(e.to_string()))?;

                let filled: Float64Chunked = ca
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(*fill)))
                    .collect();

                result = result
                    .with_column(filled.with_name(col_name.as_str().into()).into_series())
                    .map_err(|e| BankmarkError::DataError(e.to_string()))?
                    .clone();
            }
        }

        Ok(result)
    }
}

/// Fill categories for categorical columns, typically training-set modes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalImputer {
    fills: HashMap<String, String>,
}

impl CategoricalImputer {
    pub fn new(fills: HashMap<String, String>) -> Self {
        Self { fills }
    }

    pub fn fill_for(&self, column: &str) -> Option<&str> {
        self.fills.get(column).map(|s| s.as_str())
    }

    /// Replace nulls in covered columns with their recorded fill category
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for (col_name, fill) in &self.fills {
            if let Ok(column) = df.column(col_name) {
                let ca = column
                    .as_materialized_series()
                    .str()
                    .map_err(|e| BankmarkError::DataError(e.to_string()))?;

                let filled: StringChunked = ca
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(fill.as_str()).to_string()))
                    .collect();

                result = result
                    .with_column(filled.with_name(col_name.as_str().into()).into_series())
                    .map_err(|e| BankmarkError::DataError(e.to_string()))?
                    .clone();
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_fill() {
        let df = DataFrame::new(vec![
            Series::new("age".into(), vec![Some(30.0), None, Some(50.0)]).into(),
        ])
        .unwrap();

        let mut fills = HashMap::new();
        fills.insert("age".to_string(), 40.0);
        let imputer = NumericImputer::new(fills);

        let result = imputer.transform(&df).unwrap();
        let col = result.column("age").unwrap().f64().unwrap();
        assert_eq!(col.get(0), Some(30.0));
        assert_eq!(col.get(1), Some(40.0));
        assert_eq!(col.get(2), Some(50.0));
    }

    #[test]
    fn test_numeric_fill_skips_uncovered_columns() {
        let df = DataFrame::new(vec![
            Series::new("balance".into(), vec![None::<f64>]).into(),
        ])
        .unwrap();

        let imputer = NumericImputer::new(HashMap::new());
        let result = imputer.transform(&df).unwrap();
        assert_eq!(result.column("balance").unwrap().f64().unwrap().get(0), None);
    }

    #[test]
    fn test_categorical_fill() {
        let df = DataFrame::new(vec![
            Series::new("job".into(), vec![Some("retired".to_string()), None]).into(),
        ])
        .unwrap();

        let mut fills = HashMap::new();
        fills.insert("job".to_string(), "blue-collar".to_string());
        let imputer = CategoricalImputer::new(fills);

        let result = imputer.transform(&df).unwrap();
        let col = result.column("job").unwrap().str().unwrap();
        assert_eq!(col.get(0), Some("retired"));
        assert_eq!(col.get(1), Some("blue-collar"));
    }
}
