//! Application state shared across handlers

use crate::bundle::ModelBundle;

use super::ServerConfig;

/// Immutable service context constructed once at startup
///
/// The bundle is loaded before the listener binds and never swapped out,
/// so handlers read it without any locking. Replacing a model means
/// restarting the process.
pub struct AppState {
    pub config: ServerConfig,
    pub bundle: ModelBundle,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig, bundle: ModelBundle) -> Self {
        Self {
            config,
            bundle,
            started_at: chrono::Utc::now(),
        }
    }
}
