use super::{ClientError, ClientResult, RecipeApi};
use crate::models::{Recipe, SearchRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `RecipeApi` over HTTP, posting JSON to `{base}/recipes`
#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
    endpoint: String,
}

impl HttpRecipeApi {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let endpoint = format!("{}/recipes", base_url);
        Self {
            client,
            base_url,
            endpoint,
        }
    }

    /// Post to a different path under the same base, e.g. `/api/recipes`
    /// when running behind the development proxy
    pub fn with_path(mut self, path: &str) -> Self {
        self.endpoint = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the server's health document
    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        // a degraded server answers 503 with a useful body
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn search(&self, request: &SearchRequest) -> ClientResult<Vec<Recipe>> {
        tracing::debug!(
            endpoint = %self.endpoint,
            ingredients = ?request.ingredients,
            action = %request.action,
            page = request.page,
            "Sending recipe search"
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        Ok(response.json::<Vec<Recipe>>().await?)
    }
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}
