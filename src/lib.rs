//! Bankmark - term-deposit subscription prediction
//!
//! This crate packages the serving side of a bank marketing campaign
//! model:
//! - A static schema of the sixteen prospect features
//! - Typed records built from arbitrary client JSON
//! - An inference-only pipeline (imputation, scaling, one-hot encoding,
//!   logistic classifier) loaded from a JSON model bundle
//! - An HTTP service exposing metadata and prediction endpoints
//! - A terminal form client that fills the call sheet and queries the
//!   service
//!
//! # Modules
//!
//! - [`schema`] - Feature declarations and category vocabularies
//! - [`record`] - Payload coercion into typed prospect records
//! - [`pipeline`] - Fitted preprocessing stages and the classifier
//! - [`bundle`] - Bundle persistence and validation
//! - [`server`] - HTTP service
//! - [`client`] - Interactive form client
//! - [`cli`] - Command-line entry points

// Core error handling
pub mod error;

// Data model
pub mod bundle;
pub mod pipeline;
pub mod record;
pub mod schema;

// Services
pub mod cli;
pub mod client;
pub mod server;

pub use error::{BankmarkError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bundle::ModelBundle;
    pub use crate::error::{BankmarkError, Result};
    pub use crate::pipeline::{
        CategoricalImputer, ColumnStats, LogisticModel, NumericImputer, OneHotEncoder, Pipeline,
        StandardScaler,
    };
    pub use crate::record::ProspectRecord;
    pub use crate::schema::{FeatureSpec, FieldKind};
    pub use crate::server::{create_router, AppState, ServerConfig};
}
