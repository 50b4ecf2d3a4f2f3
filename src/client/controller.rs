use super::{ClientError, ClientResult, RecipeApi};
use crate::models::{MatchMode, Recipe, SearchRequest};

/// Page sizes offered to the user
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Split comma-separated input into trimmed, lowercased, non-empty ingredients
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect()
}

/// Everything the search screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub input_text: String,
    pub last_action: MatchMode,
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<Recipe>,
    /// Ingredients the current `results` were fetched with
    pub searched_ingredients: Vec<String>,
    pub loading: bool,
    /// Last failure, cleared by the next applied response
    pub last_error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            last_action: MatchMode::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            results: Vec::new(),
            searched_ingredients: Vec::new(),
            loading: false,
            last_error: None,
        }
    }
}

/// A request that has been issued but not yet applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub seq: u64,
    pub request: SearchRequest,
}

/// Client-side search state machine.
///
/// State only changes through [`search`](Self::search), [`next`](Self::next),
/// [`prev`](Self::prev) and [`set_page_size`](Self::set_page_size), or the
/// split [`begin`](Self::begin)/[`complete`](Self::complete) pair they are
/// built on. Every issued request gets an increasing sequence number and a
/// response is only applied if it belongs to the latest request, so a slow
/// earlier response can never overwrite a newer page.
pub struct SearchController<A> {
    api: A,
    state: SearchState,
    latest_seq: u64,
}

impl<A: RecipeApi> SearchController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: SearchState::default(),
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
    }

    /// "Prev" is disabled on the first page
    pub fn can_prev(&self) -> bool {
        self.state.page > 1
    }

    /// "Next" is always enabled; the total result count is unknown, so it may
    /// lead to an empty page
    pub fn can_next(&self) -> bool {
        true
    }

    /// Issue a request without waiting for it.
    ///
    /// Records `action` as the last action and marks the controller as
    /// loading. Fails without issuing anything when the input holds no
    /// ingredients.
    pub fn begin(&mut self, action: MatchMode, target_page: u32) -> ClientResult<PendingSearch> {
        let ingredients = parse_ingredients(&self.state.input_text);
        self.state.last_action = action;

        if ingredients.is_empty() {
            self.state.last_error = Some(ClientError::NoIngredients.to_string());
            return Err(ClientError::NoIngredients);
        }

        self.latest_seq += 1;
        self.state.loading = true;

        Ok(PendingSearch {
            seq: self.latest_seq,
            request: SearchRequest {
                ingredients,
                action,
                page: target_page.max(1),
                page_size: self.state.page_size,
            },
        })
    }

    /// Apply the outcome of `pending`.
    ///
    /// Returns `false` when the response was stale and dropped. On failure the
    /// previous results stay on screen and the error is kept in `last_error`.
    pub fn complete(
        &mut self,
        pending: PendingSearch,
        outcome: ClientResult<Vec<Recipe>>,
    ) -> bool {
        if pending.seq != self.latest_seq {
            tracing::debug!(
                seq = pending.seq,
                latest = self.latest_seq,
                "Dropping stale search response"
            );
            return false;
        }

        self.state.loading = false;

        match outcome {
            Ok(recipes) => {
                self.state.results = recipes;
                self.state.page = pending.request.page;
                self.state.searched_ingredients = pending.request.ingredients;
                self.state.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching recipes");
                self.state.last_error = Some(e.to_string());
            }
        }

        true
    }

    /// Search with the current input and show `target_page`.
    ///
    /// Returns `true` when results were replaced.
    pub async fn search(&mut self, action: MatchMode, target_page: u32) -> bool {
        let pending = match self.begin(action, target_page) {
            Ok(pending) => pending,
            Err(_) => return false,
        };

        let outcome = self.api.search(&pending.request).await;
        let succeeded = outcome.is_ok();

        self.complete(pending, outcome) && succeeded
    }

    /// Fetch the following page with the last action
    pub async fn next(&mut self) -> bool {
        let page = self.state.page + 1;
        self.search(self.state.last_action, page).await
    }

    /// Fetch the previous page with the last action; no-op on page 1
    pub async fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        let page = self.state.page - 1;
        self.search(self.state.last_action, page).await
    }

    /// Change the page size, go back to page 1 and re-run the last action
    pub async fn set_page_size(&mut self, page_size: u32) -> bool {
        if page_size == 0 {
            return false;
        }
        self.state.page_size = page_size;
        self.search(self.state.last_action, 1).await
    }
}
