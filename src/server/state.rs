//! Application state shared across handlers.

use crate::config::Config;
use crate::db::Database;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Catalog store handle.
    pub db: Database,
}

impl AppState {
    /// Create new application state with database.
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }

    /// Title shown on rendered pages.
    pub fn title(&self) -> &str {
        &self.config.server.title
    }
}
