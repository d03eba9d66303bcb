//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use super::PageContext;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::Book;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub books: Vec<Book>,
}

/// Display every book in the catalog.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<HomeTemplate> {
    let books = state.catalog().list_all().await?;

    Ok(HomeTemplate {
        ctx: PageContext::load(user, &session).await,
        books,
    })
}
