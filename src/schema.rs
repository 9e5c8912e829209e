//! Static schema for the bank marketing prospect features
//!
//! The sixteen input features of the term-deposit campaign dataset, with
//! their kinds and, for categorical fields, the closed set of values the
//! dataset uses. Bundles declare which of these features they consume and
//! in what order; this table is the vocabulary those declarations are
//! checked against.

use serde::{Deserialize, Serialize};

/// Kind of a declared input feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// Description of a single input feature
#[derive(Debug, Clone)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Known values for categorical features, empty for numeric ones
    pub choices: &'static [&'static str],
}

pub const JOB_CHOICES: &[&str] = &[
    "admin.",
    "unknown",
    "unemployed",
    "management",
    "housemaid",
    "entrepreneur",
    "student",
    "blue-collar",
    "self-employed",
    "retired",
    "technician",
    "services",
];

pub const MARITAL_CHOICES: &[&str] = &["married", "divorced", "single", "unknown"];

pub const EDUCATION_CHOICES: &[&str] = &["unknown", "secondary", "primary", "tertiary"];

pub const DEFAULT_CHOICES: &[&str] = &["no", "unknown", "yes"];

pub const HOUSING_CHOICES: &[&str] = &["yes", "no", "unknown"];

pub const LOAN_CHOICES: &[&str] = &["yes", "no", "unknown"];

pub const CONTACT_CHOICES: &[&str] = &["unknown", "telephone", "cellular"];

pub const MONTH_CHOICES: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub const POUTCOME_CHOICES: &[&str] = &["unknown", "other", "failure", "success"];

/// Every feature the dataset declares, numeric and categorical
pub const FEATURES: &[FeatureSpec] = &[
    FeatureSpec {
        name: "age",
        kind: FieldKind::Numeric,
        choices: &[],
    },
    FeatureSpec {
        name: "balance",
        kind: FieldKind::Numeric,
        choices: &[],
    },
    FeatureSpec {
        name: "day",
        kind: FieldKind::Numeric,
        choices: &[],
    },
    FeatureSpec {
        name: "duration",
        kind: FieldKind::Numeric,
        choices: &[],
    },
    FeatureSpec {
        name: "campaign",
        kind: FieldKind::Numeric,
        choices: &[],
    },
    FeatureSpec {
        name: "pdays",
        kind: FieldKind::Numeric,
        choices: &[],
    },
    FeatureSpec {
        name: "previous",
        kind: FieldKind::Numeric,
        choices: &[],
    },
    FeatureSpec {
        name: "job",
        kind: FieldKind::Categorical,
        choices: JOB_CHOICES,
    },
    FeatureSpec {
        name: "marital",
        kind: FieldKind::Categorical,
        choices: MARITAL_CHOICES,
    },
    FeatureSpec {
        name: "education",
        kind: FieldKind::Categorical,
        choices: EDUCATION_CHOICES,
    },
    FeatureSpec {
        name: "default",
        kind: FieldKind::Categorical,
        choices: DEFAULT_CHOICES,
    },
    FeatureSpec {
        name: "housing",
        kind: FieldKind::Categorical,
        choices: HOUSING_CHOICES,
    },
    FeatureSpec {
        name: "loan",
        kind: FieldKind::Categorical,
        choices: LOAN_CHOICES,
    },
    FeatureSpec {
        name: "contact",
        kind: FieldKind::Categorical,
        choices: CONTACT_CHOICES,
    },
    FeatureSpec {
        name: "month",
        kind: FieldKind::Categorical,
        choices: MONTH_CHOICES,
    },
    FeatureSpec {
        name: "poutcome",
        kind: FieldKind::Categorical,
        choices: POUTCOME_CHOICES,
    },
];

/// Look up a feature by name
pub fn lookup(name: &str) -> Option<&'static FeatureSpec> {
    FEATURES.iter().find(|spec| spec.name == name)
}

/// Kind of a named feature, if it is declared at all
pub fn kind_of(name: &str) -> Option<FieldKind> {
    lookup(name).map(|spec| spec.kind)
}

/// Names of all declared numeric features, in table order
pub fn numeric_names() -> Vec<String> {
    FEATURES
        .iter()
        .filter(|spec| spec.kind == FieldKind::Numeric)
        .map(|spec| spec.name.to_string())
        .collect()
}

/// Names of all declared categorical features, in table order
pub fn categorical_names() -> Vec<String> {
    FEATURES
        .iter()
        .filter(|spec| spec.kind == FieldKind::Categorical)
        .map(|spec| spec.name.to_string())
        .collect()
}
