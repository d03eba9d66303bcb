//! Authentication route handlers.
//!
//! Username/password login and registration against the local user store.
//! Outcomes are reported to the visitor through flash messages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::PageContext;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_session, push_flash, set_current_user};
use crate::models::{CurrentUser, FlashLevel};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub ctx: PageContext,
    pub username: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub ctx: PageContext,
    pub username: String,
    pub email: String,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> LoginTemplate {
    LoginTemplate {
        ctx: PageContext::load(user, &session).await,
        username: String::new(),
    }
}

/// Handle login form submission.
///
/// An unknown username and a wrong password produce the same message.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    OptionalAuth(current): OptionalAuth,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.users());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            set_current_user(&session, &CurrentUser::from(&user)).await?;
            set_sentry_user(&user.id, &user.username);
            tracing::info!(user_id = %user.id, "User logged in");

            push_flash(&session, FlashLevel::Success, "Login successful!").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Login failed");
            push_flash(
                &session,
                FlashLevel::Danger,
                "Invalid username or password",
            )
            .await?;

            Ok(LoginTemplate {
                ctx: PageContext::load(current, &session).await,
                username: form.username,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> RegisterTemplate {
    RegisterTemplate {
        ctx: PageContext::load(user, &session).await,
        username: String::new(),
        email: String::new(),
    }
}

/// Handle registration form submission.
///
/// Registration does not log the new user in; they are sent to the login
/// page instead.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    OptionalAuth(current): OptionalAuth,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.users());

    let message = match auth
        .register(&form.username, &form.password, &form.email)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User registered");
            push_flash(
                &session,
                FlashLevel::Success,
                "Registration successful! Please login.",
            )
            .await?;
            return Ok(Redirect::to("/login").into_response());
        }
        Err(AuthError::DuplicateUsername) => {
            tracing::warn!(username = %form.username, "Registration rejected: username taken");
            "Username already exists"
        }
        Err(AuthError::MissingField(_)) => "Username and password are required",
        Err(e) => return Err(e.into()),
    };

    push_flash(&session, FlashLevel::Danger, message).await?;

    Ok(RegisterTemplate {
        ctx: PageContext::load(current, &session).await,
        username: form.username,
        email: form.email,
    }
    .into_response())
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout.
///
/// Drops the whole session, then starts a fresh one to carry the goodbye
/// message.
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_session(&session).await?;
    clear_sentry_user();

    push_flash(&session, FlashLevel::Info, "You have been logged out").await?;
    Ok(Redirect::to("/"))
}
