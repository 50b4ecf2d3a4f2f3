pub mod store;
pub mod mysql_store;
pub mod factory;

pub use store::*;
pub use mysql_store::MySqlStore;
pub use factory::{create_store, create_in_memory_store};

use crate::error::Result;
use crate::models::Recipe;
use crate::query::RecipeQuery;
use async_trait::async_trait;

/// Read-only access to the recipe table
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Execute a built search and return at most `query.limit()` rows
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<()>;

    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
