//! Search client: controller state machine, result rendering and the HTTP
//! transport used to reach the search endpoint.
//!
//! ```text
//! SearchController ──RecipeApi──▶ POST /recipes
//!        │
//!        ▼
//!   SearchState ──▶ render_recipe / Highlighter
//! ```

mod controller;
mod error;
mod highlight;
mod http;

pub use controller::{
    parse_ingredients, PendingSearch, SearchController, SearchState, DEFAULT_PAGE_SIZE,
    PAGE_SIZE_OPTIONS,
};
pub use error::{ClientError, ClientResult};
pub use highlight::{
    highlight, page_label, render_recipe, result_summary, Highlighter, RenderedRecipe,
    EMPTY_RESULTS_MESSAGE, HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN,
};
pub use http::HttpRecipeApi;

use crate::models::{Recipe, SearchRequest};
use async_trait::async_trait;

/// Transport seam between the controller and the search endpoint
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Send one search request and return the page of recipes
    async fn search(&self, request: &SearchRequest) -> ClientResult<Vec<Recipe>>;
}
