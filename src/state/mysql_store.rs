use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::Recipe;
use crate::query::{BoundValue, RecipeQuery};
use crate::state::RecipeStore;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

/// MySQL-backed recipe store
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Build a lazily-connecting pool from configuration.
    ///
    /// No connection is opened here; the first query (or [`RecipeStore::ping`])
    /// does that, so the server can start while the database is still down.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_lazy_with(options);

        Self { pool }
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for MySqlStore {
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>> {
        let mut statement = sqlx::query_as::<_, Recipe>(&query.sql);
        for value in &query.values {
            statement = match value {
                BoundValue::Text(text) => statement.bind(text.as_str()),
                BoundValue::Integer(n) => statement.bind(*n),
            };
        }

        let recipes = statement.fetch_all(&self.pool).await?;
        Ok(recipes)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }
}
