//! Fitted inference pipeline
//!
//! Mirrors the shape of the training-side pipeline the bundle was exported
//! from: numeric imputation, categorical imputation, scaling, one-hot
//! encoding, then a logistic classifier over the resulting design matrix.
//! All stage parameters are fixed at construction; nothing here fits.

mod classifier;
mod encoder;
mod imputer;
mod scaler;

pub use classifier::LogisticModel;
pub use encoder::OneHotEncoder;
pub use imputer::{CategoricalImputer, NumericImputer};
pub use scaler::{ColumnStats, StandardScaler};

use ndarray::{Array1, Array2};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{BankmarkError, Result};

/// A complete fitted pipeline from raw feature frame to class probability
///
/// Input frames must carry Float64 numeric columns and String categorical
/// columns, named as declared here. The imputers and scaler are optional;
/// a pipeline without numeric imputation will refuse rows that still carry
/// a missing numeric value when the design matrix is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    numeric_imputer: Option<NumericImputer>,
    categorical_imputer: Option<CategoricalImputer>,
    scaler: Option<StandardScaler>,
    encoder: OneHotEncoder,
    classifier: LogisticModel,
}

impl Pipeline {
    pub fn new(
        numeric_columns: Vec<String>,
        categorical_columns: Vec<String>,
        encoder: OneHotEncoder,
        classifier: LogisticModel,
    ) -> Self {
        Self {
            numeric_columns,
            categorical_columns,
            numeric_imputer: None,
            categorical_imputer: None,
            scaler: None,
            encoder,
            classifier,
        }
    }

    pub fn with_numeric_imputer(mut self, imputer: NumericImputer) -> Self {
        self.numeric_imputer = Some(imputer);
        self
    }

    pub fn with_categorical_imputer(mut self, imputer: CategoricalImputer) -> Self {
        self.categorical_imputer = Some(imputer);
        self
    }

    pub fn with_scaler(mut self, scaler: StandardScaler) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical_columns
    }

    /// Encoder vocabulary for a categorical column
    pub fn vocabulary(&self, column: &str) -> Option<&[String]> {
        self.encoder.categories_for(column)
    }

    /// Expand a raw feature frame into the design matrix the classifier
    /// consumes: imputed, scaled numerics first, then one-hot blocks
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        let encoded = self.preprocess(df)?;
        self.to_matrix(&encoded)
    }

    /// Positive-class probability for each row of the frame
    pub fn predict_proba(&self, df: &DataFrame) -> Result<Array1<f64>> {
        let x = self.transform(df)?;
        self.classifier.predict_proba(&x)
    }

    /// Class label for each row, 1.0 for the subscription outcome
    pub fn predict(&self, df: &DataFrame) -> Result<Array1<f64>> {
        let x = self.transform(df)?;
        self.classifier.predict(&x)
    }

    /// Run the fitted preprocessing stages in training order
    fn preprocess(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        if let Some(ref imputer) = self.numeric_imputer {
            result = imputer.transform(&result)?;
        }
        if let Some(ref imputer) = self.categorical_imputer {
            result = imputer.transform(&result)?;
        }
        if let Some(ref scaler) = self.scaler {
            result = scaler.transform(&result)?;
        }
        self.encoder.transform(&result)
    }

    /// Design matrix column names: numerics first, then each categorical
    /// column's indicator block in vocabulary order
    pub fn expanded_columns(&self) -> Result<Vec<String>> {
        let mut names = self.numeric_columns.clone();
        for column in &self.categorical_columns {
            let block = self
                .encoder
                .expanded_names(column)
                .ok_or_else(|| BankmarkError::FeatureNotFound(column.clone()))?;
            names.extend(block);
        }
        Ok(names)
    }

    /// Number of design matrix columns
    pub fn design_width(&self) -> Result<usize> {
        Ok(self.expanded_columns()?.len())
    }

    /// Assemble the encoded frame into a dense matrix
    ///
    /// Any null left at this point means the bundle carries no imputation
    /// for that column, which the model cannot absorb.
    fn to_matrix(&self, df: &DataFrame) -> Result<Array2<f64>> {
        let names = self.expanded_columns()?;
        let mut x = Array2::<f64>::zeros((df.height(), names.len()));

        for (col_idx, name) in names.iter().enumerate() {
            let column = df
                .column(name)
                .map_err(|_| BankmarkError::FeatureNotFound(name.clone()))?;
            let ca = column
                .as_materialized_series()
                .f64()
                .map_err(|e| BankmarkError::DataError(e.to_string()))?;

            for (row_idx, value) in ca.into_iter().enumerate() {
                x[[row_idx, col_idx]] = value.ok_or_else(|| {
                    BankmarkError::InferenceError(format!(
                        "feature '{}' has a missing value and no imputation is configured",
                        name
                    ))
                })?;
            }
        }

        Ok(x)
    }

    /// Check internal consistency of the fitted stages
    pub fn validate(&self) -> Result<()> {
        for column in &self.categorical_columns {
            if self.encoder.categories_for(column).is_none() {
                return Err(BankmarkError::SchemaError(format!(
                    "categorical column '{}' has no encoder vocabulary",
                    column
                )));
            }
        }

        let width = self.design_width()?;
        if width != self.classifier.n_features() {
            return Err(BankmarkError::SchemaError(format!(
                "design matrix is {} columns wide but the classifier expects {}",
                width,
                self.classifier.n_features()
            )));
        }

        Ok(())
    }
}
