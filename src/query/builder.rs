//! Parameterized recipe query construction

use crate::error::{AppError, Result};
use crate::models::{MatchMode, SearchParams, NO_INGREDIENTS};
use serde::Serialize;

/// Column the ingredient predicates run against
pub const INGREDIENT_COLUMN: &str = "recipeIngredientParts";

/// Columns returned for every recipe row
pub const SELECT_COLUMNS: &str = "name, description, recipeIngredientParts, recipeInstructions";

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Text(String),
    Integer(u64),
}

impl From<&str> for BoundValue {
    fn from(value: &str) -> Self {
        BoundValue::Text(value.to_string())
    }
}

impl From<u64> for BoundValue {
    fn from(value: u64) -> Self {
        BoundValue::Integer(value)
    }
}

/// A query template plus the values for its placeholders, in order.
///
/// The first `predicate_count` values are the `%ingredient%` patterns, the
/// last two are `LIMIT` and `OFFSET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub sql: String,
    pub values: Vec<BoundValue>,
    pub mode: MatchMode,
    pub predicate_count: usize,
}

impl RecipeQuery {
    /// The LIKE patterns, one per ingredient
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.values[..self.predicate_count]
            .iter()
            .filter_map(|v| match v {
                BoundValue::Text(s) => Some(s.as_str()),
                BoundValue::Integer(_) => None,
            })
    }

    pub fn limit(&self) -> u64 {
        self.integer_at(self.predicate_count)
    }

    pub fn offset(&self) -> u64 {
        self.integer_at(self.predicate_count + 1)
    }

    fn integer_at(&self, index: usize) -> u64 {
        match self.values.get(index) {
            Some(BoundValue::Integer(n)) => *n,
            _ => 0,
        }
    }
}

/// Wrap an ingredient as a lowercase substring pattern
pub fn like_pattern(ingredient: &str) -> String {
    format!("%{}%", ingredient.to_lowercase())
}

/// Rows skipped before the requested page
pub fn page_offset(page: u32, page_size: u32) -> Result<u64> {
    if page == 0 || page_size == 0 {
        return Err(AppError::Validation(
            "page and pageSize must be positive integers".to_string(),
        ));
    }
    Ok((u64::from(page) - 1) * u64::from(page_size))
}

/// Builds recipe search statements against a single table
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: String,
}

impl QueryBuilder {
    /// Create a builder for `table`.
    ///
    /// The table name is written into the statement verbatim; callers pass a
    /// validated identifier from configuration, never request data.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Build the statement for validated search parameters
    pub fn build_params(&self, params: &SearchParams) -> Result<RecipeQuery> {
        self.build(&params.ingredients, params.mode, params.page, params.page_size)
    }

    /// Build a `SELECT` with one `LIKE ?` predicate per ingredient, joined by
    /// the match mode, followed by `LIMIT ? OFFSET ?`.
    pub fn build(
        &self,
        ingredients: &[String],
        mode: MatchMode,
        page: u32,
        page_size: u32,
    ) -> Result<RecipeQuery> {
        if ingredients.is_empty() {
            return Err(AppError::Validation(NO_INGREDIENTS.to_string()));
        }

        let offset = page_offset(page, page_size)?;

        let predicate = format!("{INGREDIENT_COLUMN} LIKE ?");
        let conditions = vec![predicate.as_str(); ingredients.len()].join(mode.joiner());

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM {} WHERE {conditions} LIMIT ? OFFSET ?",
            self.table
        );

        let mut values: Vec<BoundValue> = ingredients
            .iter()
            .map(|i| BoundValue::Text(like_pattern(i)))
            .collect();
        values.push(BoundValue::Integer(u64::from(page_size)));
        values.push(BoundValue::Integer(offset));

        Ok(RecipeQuery {
            sql,
            values,
            mode,
            predicate_count: ingredients.len(),
        })
    }
}
