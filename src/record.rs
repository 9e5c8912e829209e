//! Typed prospect records built from client payloads
//!
//! A [`ProspectRecord`] holds one value slot per declared feature. Records
//! are built from arbitrary JSON objects: declared keys are coerced to the
//! feature's kind, absent or uncoercible values become missing, and unknown
//! keys are dropped. Coercion itself never fails; only a payload that is
//! not a JSON object at all is rejected.

use polars::prelude::*;
use serde_json::Value;

use crate::error::{BankmarkError, Result};
use crate::schema::{self, FieldKind};

/// A single marketing prospect, one field per declared feature
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProspectRecord {
    pub age: Option<f64>,
    pub balance: Option<f64>,
    pub day: Option<f64>,
    pub duration: Option<f64>,
    pub campaign: Option<f64>,
    pub pdays: Option<f64>,
    pub previous: Option<f64>,
    pub job: Option<String>,
    pub marital: Option<String>,
    pub education: Option<String>,
    pub default_credit: Option<String>,
    pub housing: Option<String>,
    pub loan: Option<String>,
    pub contact: Option<String>,
    pub month: Option<String>,
    pub poutcome: Option<String>,
}

impl ProspectRecord {
    /// Build a record from a client payload
    ///
    /// The payload must be a JSON object. Every declared feature is read
    /// from it by name; anything else in the object is ignored.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let object = payload.as_object().ok_or_else(|| {
            BankmarkError::DataError(format!(
                "expected a JSON object, got {}",
                json_type_name(payload)
            ))
        })?;

        let mut record = Self::default();
        for spec in schema::FEATURES {
            let raw = object.get(spec.name).unwrap_or(&Value::Null);
            match spec.kind {
                FieldKind::Numeric => record.set_numeric(spec.name, coerce_numeric(raw)),
                FieldKind::Categorical => {
                    record.set_categorical(spec.name, coerce_categorical(raw))
                }
            }
        }
        Ok(record)
    }

    /// Value of a declared numeric feature
    pub fn numeric_value(&self, name: &str) -> Result<Option<f64>> {
        match name {
            "age" => Ok(self.age),
            "balance" => Ok(self.balance),
            "day" => Ok(self.day),
            "duration" => Ok(self.duration),
            "campaign" => Ok(self.campaign),
            "pdays" => Ok(self.pdays),
            "previous" => Ok(self.previous),
            _ => Err(BankmarkError::FeatureNotFound(name.to_string())),
        }
    }

    /// Value of a declared categorical feature
    pub fn categorical_value(&self, name: &str) -> Result<Option<String>> {
        match name {
            "job" => Ok(self.job.clone()),
            "marital" => Ok(self.marital.clone()),
            "education" => Ok(self.education.clone()),
            "default" => Ok(self.default_credit.clone()),
            "housing" => Ok(self.housing.clone()),
            "loan" => Ok(self.loan.clone()),
            "contact" => Ok(self.contact.clone()),
            "month" => Ok(self.month.clone()),
            "poutcome" => Ok(self.poutcome.clone()),
            _ => Err(BankmarkError::FeatureNotFound(name.to_string())),
        }
    }

    fn set_numeric(&mut self, name: &str, value: Option<f64>) {
        match name {
            "age" => self.age = value,
            "balance" => self.balance = value,
            "day" => self.day = value,
            "duration" => self.duration = value,
            "campaign" => self.campaign = value,
            "pdays" => self.pdays = value,
            "previous" => self.previous = value,
            _ => {}
        }
    }

    fn set_categorical(&mut self, name: &str, value: Option<String>) {
        match name {
            "job" => self.job = value,
            "marital" => self.marital = value,
            "education" => self.education = value,
            "default" => self.default_credit = value,
            "housing" => self.housing = value,
            "loan" => self.loan = value,
            "contact" => self.contact = value,
            "month" => self.month = value,
            "poutcome" => self.poutcome = value,
            _ => {}
        }
    }

    /// Frame the record as a single-row DataFrame in the given column order
    ///
    /// Numeric columns come first, then categorical ones, each in the order
    /// the bundle declares them. Missing values become nulls of the column's
    /// dtype so downstream imputation can fill them.
    pub fn to_dataframe(&self, numeric: &[String], categorical: &[String]) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(numeric.len() + categorical.len());

        for name in numeric {
            let value = self.numeric_value(name)?;
            columns.push(Series::new(name.as_str().into(), vec![value]).into());
        }
        for name in categorical {
            let value = self.categorical_value(name)?;
            columns.push(Series::new(name.as_str().into(), vec![value]).into());
        }

        DataFrame::new(columns).map_err(|e| BankmarkError::DataError(e.to_string()))
    }
}

/// Coerce a JSON value to a numeric feature value
///
/// Numbers pass through, finite numeric strings are parsed, booleans become
/// 0/1. Everything else, including non-numeric and non-finite strings,
/// degrades to missing.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // parse::<f64> accepts "NaN" and "inf"; non-finite input counts as missing
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Coerce a JSON value to a categorical feature value
///
/// Strings pass through; numbers and booleans are rendered as text so the
/// encoder can still match them against known categories. Nulls, arrays
/// and objects degrade to missing.
pub fn coerce_categorical(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_full() {
        let payload = json!({
            "age": 41,
            "balance": 2100.5,
            "day": 12,
            "duration": 180,
            "campaign": 2,
            "pdays": -1,
            "previous": 0,
            "job": "technician",
            "marital": "married",
            "education": "tertiary",
            "default": "no",
            "housing": "yes",
            "loan": "no",
            "contact": "cellular",
            "month": "may",
            "poutcome": "unknown"
        });
        let record = ProspectRecord::from_payload(&payload).unwrap();
        assert_eq!(record.age, Some(41.0));
        assert_eq!(record.balance, Some(2100.5));
        assert_eq!(record.pdays, Some(-1.0));
        assert_eq!(record.job.as_deref(), Some("technician"));
        assert_eq!(record.default_credit.as_deref(), Some("no"));
        assert_eq!(record.poutcome.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_from_payload_empty_object() {
        let record = ProspectRecord::from_payload(&json!({})).unwrap();
        assert_eq!(record, ProspectRecord::default());
        assert!(record.age.is_none());
        assert!(record.job.is_none());
    }

    #[test]
    fn test_from_payload_ignores_unknown_keys() {
        let record =
            ProspectRecord::from_payload(&json!({"age": 30, "salary": 90000, "x": true})).unwrap();
        assert_eq!(record.age, Some(30.0));
        let empty = ProspectRecord {
            age: Some(30.0),
            ..Default::default()
        };
        assert_eq!(record, empty);
    }

    #[test]
    fn test_from_payload_rejects_non_objects() {
        for payload in [json!(null), json!(5), json!("age"), json!([1, 2])] {
            let err = ProspectRecord::from_payload(&payload).unwrap_err();
            assert!(err.to_string().contains("expected a JSON object"));
        }
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce_numeric(&json!(42)), Some(42.0));
        assert_eq!(coerce_numeric(&json!(-1.5)), Some(-1.5));
        assert_eq!(coerce_numeric(&json!("1000")), Some(1000.0));
        assert_eq!(coerce_numeric(&json!(" 7.5 ")), Some(7.5));
        assert_eq!(coerce_numeric(&json!(true)), Some(1.0));
        assert_eq!(coerce_numeric(&json!(false)), Some(0.0));
        assert_eq!(coerce_numeric(&json!("abc")), None);
        assert_eq!(coerce_numeric(&json!(null)), None);
        assert_eq!(coerce_numeric(&json!([1])), None);
        assert_eq!(coerce_numeric(&json!({"v": 1})), None);
    }

    #[test]
    fn test_numeric_coercion_rejects_non_finite_strings() {
        assert_eq!(coerce_numeric(&json!("NaN")), None);
        assert_eq!(coerce_numeric(&json!("nan")), None);
        assert_eq!(coerce_numeric(&json!("inf")), None);
        assert_eq!(coerce_numeric(&json!("-infinity")), None);
        assert_eq!(coerce_numeric(&json!("1e999")), None);
    }

    #[test]
    fn test_categorical_coercion() {
        assert_eq!(coerce_categorical(&json!("married")), Some("married".into()));
        assert_eq!(coerce_categorical(&json!(5)), Some("5".into()));
        assert_eq!(coerce_categorical(&json!(true)), Some("true".into()));
        assert_eq!(coerce_categorical(&json!(null)), None);
        assert_eq!(coerce_categorical(&json!(["a"])), None);
        assert_eq!(coerce_categorical(&json!({"k": "v"})), None);
    }

    #[test]
    fn test_to_dataframe_column_order() {
        let record = ProspectRecord::from_payload(&json!({"age": 40, "job": "retired"})).unwrap();
        let numeric = vec!["age".to_string(), "balance".to_string()];
        let categorical = vec!["job".to_string(), "month".to_string()];
        let df = record.to_dataframe(&numeric, &categorical).unwrap();

        assert_eq!(df.height(), 1);
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["age", "balance", "job", "month"]);
        assert_eq!(df.column("age").unwrap().f64().unwrap().get(0), Some(40.0));
        assert_eq!(df.column("balance").unwrap().f64().unwrap().get(0), None);
        assert_eq!(
            df.column("job").unwrap().str().unwrap().get(0),
            Some("retired")
        );
        assert_eq!(df.column("month").unwrap().str().unwrap().get(0), None);
    }

    #[test]
    fn test_to_dataframe_unknown_feature() {
        let record = ProspectRecord::default();
        let err = record
            .to_dataframe(&["salary".to_string()], &[])
            .unwrap_err();
        assert!(matches!(err, BankmarkError::FeatureNotFound(_)));
    }
}
