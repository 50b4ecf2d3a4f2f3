//! Ingredient search query construction
//!
//! Turns an ingredient list and a [`MatchMode`](crate::models::MatchMode)
//! into a `SELECT` against the recipe table:
//!
//! ```text
//! SELECT name, description, recipeIngredientParts, recipeInstructions
//! FROM info
//! WHERE recipeIngredientParts LIKE ? AND recipeIngredientParts LIKE ?
//! LIMIT ? OFFSET ?
//! ```
//!
//! Ingredients only ever travel as bound values. No `ORDER BY` is emitted,
//! so rows come back in whatever order the store produces them.
//!
//! # Example
//!
//! ```
//! use recipe_finder::models::MatchMode;
//! use recipe_finder::query::{BoundValue, QueryBuilder};
//!
//! let query = QueryBuilder::new("info")
//!     .build(&["egg".to_string()], MatchMode::Any, 2, 5)
//!     .unwrap();
//!
//! assert_eq!(
//!     query.values,
//!     vec![BoundValue::Text("%egg%".into()), BoundValue::Integer(5), BoundValue::Integer(5)]
//! );
//! ```

mod builder;

pub use builder::{
    like_pattern, page_offset, BoundValue, QueryBuilder, RecipeQuery, INGREDIENT_COLUMN,
    SELECT_COLUMNS,
};
