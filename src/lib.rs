//! Recipe Finder
//!
//! Ingredient-based recipe search. The server side accepts a list of
//! ingredients with an `all`/`any` match mode, turns it into a parameterized
//! `LIKE` query against the recipe table and returns one page of recipes. The
//! client side drives searches and pagination and highlights the searched
//! ingredients in the results.
//!
//! ```text
//! client::SearchController ──POST /recipes──▶ api::handlers::search_recipes
//!                                                   │
//!                                   models::SearchPayload::into_params
//!                                                   │
//!                                         query::QueryBuilder::build
//!                                                   │
//!                                         state::RecipeStore::search
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod state;

pub use error::{AppError, Result};
