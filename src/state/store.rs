use crate::error::{AppError, Result};
use crate::models::{MatchMode, Recipe};
use crate::query::RecipeQuery;
use crate::state::RecipeStore;
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

/// In-memory recipe store (for development and testing)
///
/// Evaluates a [`RecipeQuery`] the way MySQL would under a case-insensitive
/// collation: `%` and `_` wildcards, backslash escapes, predicates combined
/// by the query's match mode, then `LIMIT`/`OFFSET` over insertion order.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    recipes: Arc<Vec<Recipe>>,
}

impl InMemoryStore {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Arc::new(recipes),
        }
    }

    /// Load recipes from a JSON array of recipe records
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let recipes: Vec<Recipe> = serde_json::from_str(&raw)?;

        tracing::info!(path = ?path, count = recipes.len(), "Loaded recipe seed file");
        Ok(Self::new(recipes))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[async_trait]
impl RecipeStore for InMemoryStore {
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>> {
        let matchers = query
            .patterns()
            .map(LikeMatcher::new)
            .collect::<Result<Vec<_>>>()?;

        let offset = usize::try_from(query.offset())
            .map_err(|_| AppError::Database("OFFSET out of range".to_string()))?;
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        let results: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| {
                let text = recipe.ingredient_text();
                match query.mode {
                    MatchMode::All => matchers.iter().all(|m| m.is_match(text)),
                    MatchMode::Any => matchers.iter().any(|m| m.is_match(text)),
                }
            })
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        tracing::debug!(
            matched = results.len(),
            offset = offset,
            limit = limit,
            "In-memory search complete"
        );
        Ok(results)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// A SQL `LIKE` pattern compiled to an anchored, case-insensitive regex
#[derive(Debug, Clone)]
pub struct LikeMatcher {
    regex: Regex,
}

impl LikeMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut expr = String::from("(?is)^");
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                '%' => expr.push_str(".*"),
                '_' => expr.push('.'),
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        expr.push_str(&regex::escape(&escaped.to_string()));
                    }
                }
                other => expr.push_str(&regex::escape(&other.to_string())),
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr)
            .map_err(|e| AppError::Internal(format!("Invalid LIKE pattern '{pattern}': {e}")))?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
