//! Search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::PageContext;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::Book;
use crate::state::AppState;

/// Query parameters for the search page.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "search_results.html")]
pub struct SearchResultsTemplate {
    pub ctx: PageContext,
    pub query: String,
    pub books: Vec<Book>,
}

/// Case-insensitive search over title and author.
///
/// A missing or empty `q` lists every book.
#[instrument(skip(state, session))]
pub async fn search(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Query(params): Query<SearchQuery>,
) -> Result<SearchResultsTemplate> {
    let books = state.catalog().search(&params.q).await?;
    tracing::debug!(query = %params.q, results = books.len(), "Search");

    Ok(SearchResultsTemplate {
        ctx: PageContext::load(user, &session).await,
        query: params.q,
        books,
    })
}
