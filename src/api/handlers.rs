use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::metrics::{SEARCHES_TOTAL, STORE_QUERY_DURATION_SECONDS};
use crate::models::{Recipe, SearchPayload};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: if status.is_success() { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store_backend: state.store.backend_name().to_string(),
            store: store.to_string(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store_backend: String,
    pub store: String,
}

/// Search recipes by ingredient.
///
/// Returns the matching page as a bare JSON array. Input problems are 400s;
/// any store failure is a 500 with a generic message.
pub async fn search_recipes(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchPayload>, JsonRejection>,
) -> Result<Json<Vec<Recipe>>> {
    let Json(payload) = payload?;
    let params = payload.into_params(&state.settings)?;
    let query = state.builder.build_params(&params)?;

    tracing::debug!(
        sql = %query.sql,
        values = ?query.values,
        "Executing recipe search"
    );

    let backend = state.store.backend_name();
    let timer = STORE_QUERY_DURATION_SECONDS
        .with_label_values(&[backend])
        .start_timer();
    let result = state.store.search(&query).await;
    timer.observe_duration();

    let recipes = match result {
        Ok(recipes) => recipes,
        Err(e) => {
            SEARCHES_TOTAL
                .with_label_values(&[params.mode.as_str(), "error"])
                .inc();
            return Err(store_failure(e));
        }
    };

    let outcome = if recipes.is_empty() { "empty" } else { "success" };
    SEARCHES_TOTAL
        .with_label_values(&[params.mode.as_str(), outcome])
        .inc();

    tracing::info!(
        mode = %params.mode,
        ingredients = params.ingredients.len(),
        page = params.page,
        page_size = params.page_size,
        returned = recipes.len(),
        "Recipe search complete"
    );

    Ok(Json(recipes))
}

/// Report a failed store call as a database error without re-wrapping one
fn store_failure(err: AppError) -> AppError {
    match err {
        err @ (AppError::Validation(_) | AppError::Database(_)) => err,
        other => AppError::Database(other.to_string()),
    }
}

/// Prometheus metrics endpoint
///
/// Returns metrics in Prometheus text exposition format
pub async fn metrics() -> (StatusCode, String) {
    let metrics = crate::metrics::gather_metrics();
    (StatusCode::OK, metrics)
}
