//! Book detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use bookstore_core::BookId;

use super::PageContext;
use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, push_flash};
use crate::models::{Book, FlashLevel};
use crate::services::CatalogError;
use crate::state::AppState;

/// Book detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "book_detail.html")]
pub struct BookDetailTemplate {
    pub ctx: PageContext,
    pub book: Book,
}

/// Display a single book.
///
/// An id that does not parse is treated like one that does not exist: the
/// visitor is sent home with a "Book not found" message.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response> {
    let book = match id.parse::<BookId>() {
        Ok(id) => match state.catalog().get(id).await {
            Ok(book) => Some(book),
            Err(CatalogError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        },
        Err(e) => {
            tracing::debug!("Rejected book id: {}", e);
            None
        }
    };

    let Some(book) = book else {
        push_flash(&session, FlashLevel::Danger, "Book not found").await?;
        return Ok(Redirect::to("/").into_response());
    };

    Ok(BookDetailTemplate {
        ctx: PageContext::load(user, &session).await,
        book,
    }
    .into_response())
}
