//! Logistic classifier over the encoded design matrix

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{BankmarkError, Result};

/// A fitted logistic regression model
///
/// Carries only what inference needs: one coefficient per design matrix
/// column and the intercept. The positive class is 1, the subscription
/// outcome, and the decision threshold is 0.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Array1<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Width of the design matrix this model was fitted on
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    /// Positive-class probability per row
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(BankmarkError::InferenceError(format!(
                "design matrix has {} columns, model expects {}",
                x.ncols(),
                self.coefficients.len()
            )));
        }

        let linear = x.dot(&self.coefficients) + self.intercept;
        Ok(Self::sigmoid(&linear))
    }

    /// Class label per row, 1.0 for probabilities at or above 0.5
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba(x)?;
        Ok(proba.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_proba_is_bounded() {
        let model = LogisticModel::new(array![2.0, -1.0], 0.5);
        let x = array![[10.0, 0.0], [-10.0, 0.0], [0.0, 0.0]];

        let proba = model.predict_proba(&x).unwrap();
        for p in proba.iter() {
            assert!(*p > 0.0 && *p < 1.0);
        }
        assert!(proba[0] > 0.99);
        assert!(proba[1] < 0.01);
        assert!((proba[2] - 0.62245).abs() < 1e-4);
    }

    #[test]
    fn test_predict_threshold() {
        let model = LogisticModel::new(array![1.0], 0.0);
        let x = array![[3.0], [-3.0], [0.0]];

        let labels = model.predict(&x).unwrap();
        assert_eq!(labels[0], 1.0);
        assert_eq!(labels[1], 0.0);
        // sigmoid(0) = 0.5, at the threshold, counts as positive
        assert_eq!(labels[2], 1.0);
    }

    #[test]
    fn test_width_mismatch() {
        let model = LogisticModel::new(array![1.0, 2.0, 3.0], 0.0);
        let x = array![[1.0, 2.0]];

        let err = model.predict_proba(&x).unwrap_err();
        assert!(err.to_string().contains("model expects 3"));
    }
}
