//! Shared fixtures for the API and client integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use recipe_finder::{
    api::{build_router, AppState},
    error::{AppError, Result},
    models::Recipe,
    query::RecipeQuery,
    state::{InMemoryStore, RecipeStore},
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Small recipe table with known ingredient overlap
pub fn fixture_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new(
            "Tomato Onion Salad",
            "Fresh and quick",
            "Tomato, red onion, olive oil, salt",
            "Slice the tomato and onion. Dress with oil.",
        ),
        Recipe::new(
            "Tomato Soup",
            "Comfort food",
            "tomatoes, garlic, basil, cream",
            "Simmer the tomatoes with garlic.",
        ),
        Recipe::new(
            "French Onion Soup",
            "Slow cooked",
            "onions, butter, beef stock, gruyere",
            "Caramelise the onions for an hour.",
        ),
        Recipe::new(
            "Omelette",
            "Breakfast",
            "Eggs, milk, butter",
            "Whisk the eggs with milk.",
        ),
        Recipe::new(
            "Garlic Bread",
            "Side",
            "baguette, garlic, butter, parsley",
            "Spread garlic butter and bake.",
        ),
    ]
}

pub fn memory_store() -> Arc<dyn RecipeStore> {
    Arc::new(InMemoryStore::new(fixture_recipes()))
}

pub fn app_with_store(store: Arc<dyn RecipeStore>) -> Router {
    build_router(AppState::new(store, "info"))
}

pub fn app() -> Router {
    app_with_store(memory_store())
}

/// Store that fails every call
pub struct FailingStore;

#[async_trait]
impl RecipeStore for FailingStore {
    async fn search(&self, _query: &RecipeQuery) -> Result<Vec<Recipe>> {
        Err(AppError::Database(
            "Access denied for user 'root'@'localhost'".to_string(),
        ))
    }

    async fn ping(&self) -> Result<()> {
        Err(AppError::Database("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Wraps the in-memory store and records every query it executes
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    queries: Mutex<Vec<RecipeQuery>>,
}

impl RecordingStore {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            inner: InMemoryStore::new(recipes),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<RecipeQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeStore for RecordingStore {
    async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>> {
        self.queries.lock().unwrap().push(query.clone());
        self.inner.search(query).await
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// POST a raw body and return the status and parsed JSON response
pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

pub fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
