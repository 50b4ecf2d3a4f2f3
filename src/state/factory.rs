use crate::config::{DatabaseConfig, StoreBackend};
use crate::error::Result;
use crate::state::{InMemoryStore, MySqlStore, RecipeStore};
use std::sync::Arc;

/// Create a recipe store based on configuration
pub async fn create_store(config: &DatabaseConfig) -> Result<Arc<dyn RecipeStore>> {
    match config.backend {
        StoreBackend::Mysql => {
            tracing::info!(
                host = %config.host,
                port = config.port,
                database = %config.name,
                user = %config.user,
                "Initializing MySQL storage backend"
            );

            let store = MySqlStore::connect_lazy(config);

            // A failed first connection is logged, not fatal; searches report
            // 500 until the database comes up.
            match store.ping().await {
                Ok(()) => tracing::info!("Connected to MySQL database"),
                Err(e) => tracing::error!(error = %e, "Database connection failed"),
            }

            Ok(Arc::new(store))
        }

        StoreBackend::Memory => {
            let store = match &config.seed_path {
                Some(path) => InMemoryStore::from_json_file(path)?,
                None => {
                    tracing::warn!("In-memory backend has no seed_path, starting empty");
                    InMemoryStore::default()
                }
            };

            tracing::info!(recipes = store.len(), "Initializing in-memory storage backend");
            Ok(Arc::new(store))
        }
    }
}

/// Create an in-memory store (for testing and development)
pub fn create_in_memory_store() -> Arc<dyn RecipeStore> {
    tracing::info!("Initializing in-memory storage backend");
    Arc::new(InMemoryStore::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchMode;
    use crate::query::QueryBuilder;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_seeded_memory_store() {
        let temp_dir = TempDir::new().unwrap();
        let seed = temp_dir.path().join("seed.json");
        std::fs::write(
            &seed,
            r#"[{"name":"Pancakes","description":"Fluffy","recipeIngredientParts":"flour, eggs, milk","recipeInstructions":"Mix and fry."}]"#,
        )
        .unwrap();

        let config = DatabaseConfig {
            backend: StoreBackend::Memory,
            seed_path: Some(seed),
            ..Default::default()
        };

        let store = create_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "memory");

        let query = QueryBuilder::new("info")
            .build(&["milk".to_string()], MatchMode::All, 1, 10)
            .unwrap();
        assert_eq!(store.search(&query).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_requires_readable_seed() {
        let config = DatabaseConfig {
            backend: StoreBackend::Memory,
            seed_path: Some("/nonexistent/seed.json".into()),
            ..Default::default()
        };

        assert!(create_store(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_create_in_memory_store() {
        let store = create_in_memory_store();
        assert!(store.ping().await.is_ok());
    }
}
