//! Standard scaling with training-time statistics

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{BankmarkError, Result};

/// Training-set statistics for one scaled column
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub std: f64,
}

/// Z-score scaler: (x - mean) / std, per column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    params: HashMap<String, ColumnStats>,
}

impl StandardScaler {
    pub fn new(params: HashMap<String, ColumnStats>) -> Self {
        Self { params }
    }

    pub fn stats_for(&self, column: &str) -> Option<ColumnStats> {
        self.params.get(column).copied()
    }

    /// Scale every covered column.
    /// Builds all replacement columns first, then applies them in a single pass.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let replacements: Vec<Series> = self
            .params
            .iter()
            .filter_map(|(col_name, stats)| {
                df.column(col_name).ok().map(|column| {
                    let series = column.as_materialized_series();
                    self.scale_series(series, stats)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut result = df.clone();
        for scaled in replacements {
            result = result
                .with_column(scaled)
                .map_err(|e| BankmarkError::DataError(e.to_string()))?
                .clone();
        }

        Ok(result)
    }

    fn scale_series(&self, series: &Series, stats: &ColumnStats) -> Result<Series> {
        let ca = series
            .f64()
            .map_err(|e| BankmarkError::DataError(e.to_string()))?;

        // A constant column has std 0; dividing by 1 leaves the centered value
        let scale = if stats.std == 0.0 { 1.0 } else { stats.std };
        let scaled: Float64Chunked = ca
            .into_iter()
            .map(|opt| opt.map(|v| (v - stats.mean) / scale))
            .collect();

        Ok(scaled.with_name(series.name().clone()).into_series())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler_for(column: &str, mean: f64, std: f64) -> StandardScaler {
        let mut params = HashMap::new();
        params.insert(column.to_string(), ColumnStats { mean, std });
        StandardScaler::new(params)
    }

    #[test]
    fn test_scales_to_zscores() {
        let df = DataFrame::new(vec![
            Series::new("age".into(), &[30.0, 40.0, 50.0]).into(),
        ])
        .unwrap();

        let scaler = scaler_for("age", 40.0, 10.0);
        let result = scaler.transform(&df).unwrap();

        let col = result.column("age").unwrap().f64().unwrap();
        assert_eq!(col.get(0), Some(-1.0));
        assert_eq!(col.get(1), Some(0.0));
        assert_eq!(col.get(2), Some(1.0));
    }

    #[test]
    fn test_zero_std_centers_only() {
        let df = DataFrame::new(vec![Series::new("pdays".into(), &[-1.0, -1.0]).into()]).unwrap();

        let scaler = scaler_for("pdays", -1.0, 0.0);
        let result = scaler.transform(&df).unwrap();

        let col = result.column("pdays").unwrap().f64().unwrap();
        assert_eq!(col.get(0), Some(0.0));
        assert_eq!(col.get(1), Some(0.0));
    }

    #[test]
    fn test_preserves_nulls() {
        let df = DataFrame::new(vec![
            Series::new("age".into(), vec![Some(50.0), None]).into(),
        ])
        .unwrap();

        let scaler = scaler_for("age", 40.0, 10.0);
        let result = scaler.transform(&df).unwrap();

        let col = result.column("age").unwrap().f64().unwrap();
        assert_eq!(col.get(0), Some(1.0));
        assert_eq!(col.get(1), None);
    }

    #[test]
    fn test_skips_absent_columns() {
        let df = DataFrame::new(vec![Series::new("age".into(), &[25.0]).into()]).unwrap();

        let scaler = scaler_for("balance", 1000.0, 500.0);
        let result = scaler.transform(&df).unwrap();
        assert_eq!(result.column("age").unwrap().f64().unwrap().get(0), Some(25.0));
    }
}
