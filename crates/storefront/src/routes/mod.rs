//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Book listing
//! GET  /book/{id}       - Book detail (unknown id redirects home)
//! GET  /search?q=       - Title/author search
//!
//! # Auth
//! GET  /login           - Login page
//! POST /login           - Login action
//! GET  /register        - Register page
//! POST /register        - Register action
//! GET  /logout          - Logout action
//!
//! # Operations
//! GET  /health          - Liveness
//! GET  /health/ready    - Readiness (book store reachable)
//! ```

pub mod auth;
pub mod books;
pub mod health;
pub mod home;
pub mod search;

use axum::{Router, http::Uri, routing::get};
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::take_flashes;
use crate::models::{CurrentUser, FlashMessage};
use crate::state::AppState;

/// Create the page routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/book/{id}", get(books::show))
        .route("/search", get(search::search))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Data every full page needs for the layout: who is logged in and which
/// flash messages are pending.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<FlashMessage>,
}

impl PageContext {
    /// Build the context for a page render, consuming pending flashes.
    pub async fn load(current_user: Option<CurrentUser>, session: &Session) -> Self {
        Self {
            current_user,
            flashes: take_flashes(session).await,
        }
    }
}
