pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::config::{Config, SearchSettings};
use crate::query::QueryBuilder;
use crate::state::RecipeStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub builder: Arc<QueryBuilder>,
    pub settings: SearchSettings,
    pub metrics_enabled: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            builder: Arc::new(QueryBuilder::new(table)),
            settings: SearchSettings::default(),
            metrics_enabled: false,
        }
    }

    /// State wired from the loaded configuration
    pub fn from_config(store: Arc<dyn RecipeStore>, config: &Config) -> Self {
        Self::new(store, config.database.table.clone())
            .with_settings(config.search)
            .with_metrics(config.observability.prometheus_enabled)
    }

    /// Set the paging defaults and limits
    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Expose `/metrics`
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }
}
