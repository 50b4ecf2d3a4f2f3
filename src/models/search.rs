use crate::config::SearchSettings;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

pub const NO_INGREDIENTS: &str = "No ingredients provided";
pub const INVALID_ACTION: &str = "Invalid action (use 'all' or 'any')";

/// How the per-ingredient predicates are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every ingredient must appear in the ingredient text
    #[default]
    All,
    /// At least one ingredient must appear
    Any,
}

impl MatchMode {
    /// SQL operator joining the predicates, padded with spaces
    pub fn joiner(&self) -> &'static str {
        match self {
            MatchMode::All => " AND ",
            MatchMode::Any => " OR ",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::All => "all",
            MatchMode::Any => "any",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(MatchMode::All),
            "any" => Ok(MatchMode::Any),
            _ => Err(AppError::Validation(INVALID_ACTION.to_string())),
        }
    }
}

/// Search request as sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub ingredients: Vec<String>,
    pub action: MatchMode,
    pub page: u32,
    pub page_size: u32,
}

/// A page number as it may arrive on the wire: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl PageValue {
    fn coerce(&self, field: &str) -> Result<i64> {
        let invalid = || AppError::Validation(format!("{field} must be a positive integer"));

        match self {
            PageValue::Integer(n) => Ok(*n),
            PageValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(*f as i64),
            PageValue::Float(_) => Err(invalid()),
            PageValue::Text(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        }
    }
}

/// Raw request body accepted by the search endpoint.
///
/// Every field is optional here so that missing or wrongly-typed values turn
/// into the endpoint's own 400 messages instead of a generic body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub page: Option<PageValue>,
    #[serde(default)]
    pub page_size: Option<PageValue>,
}

impl SearchPayload {
    /// Validate and normalise the payload.
    ///
    /// Ingredients are trimmed and lowercased and blank entries dropped; a list
    /// that ends up empty is rejected before the action is looked at. A given
    /// `pageSize` is used as is, so `offset = (page - 1) * pageSize` holds for
    /// every accepted request.
    pub fn into_params(self, settings: &SearchSettings) -> Result<SearchParams> {
        let ingredients: Vec<String> = self
            .ingredients
            .unwrap_or_default()
            .iter()
            .map(|i| i.trim().to_lowercase())
            .filter(|i| !i.is_empty())
            .collect();

        if ingredients.is_empty() {
            return Err(AppError::Validation(NO_INGREDIENTS.to_string()));
        }

        let mode = self
            .action
            .as_deref()
            .ok_or_else(|| AppError::Validation(INVALID_ACTION.to_string()))?
            .parse::<MatchMode>()?;

        let page = match &self.page {
            Some(value) => positive(value.coerce("page")?, "page")?,
            None => 1,
        };

        let page_size = match &self.page_size {
            Some(value) => positive(value.coerce("pageSize")?, "pageSize")?,
            None => settings.default_page_size,
        };

        let params = SearchParams {
            ingredients,
            mode,
            page,
            page_size,
        };
        params.validate()?;

        Ok(params)
    }
}

fn positive(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| AppError::Validation(format!("{field} must be a positive integer")))
}

/// A validated search, ready for the query builder
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SearchParams {
    #[validate(length(min = 1, message = "No ingredients provided"))]
    pub ingredients: Vec<String>,
    pub mode: MatchMode,
    #[validate(range(min = 1))]
    pub page: u32,
    #[validate(range(min = 1))]
    pub page_size: u32,
}
