//! Data access for the storefront.
//!
//! # Collections
//!
//! - `books` - The catalog ([`BookRepository`])
//! - `users` - Registered accounts ([`UserRepository`])
//!
//! Sessions live in the tower-sessions table, not here.
//!
//! # Adapters
//!
//! - [`books::PgBookRepository`] / [`users::PgUserRepository`] - `PostgreSQL` via sqlx
//! - [`memory::MemoryStore`] - in-process store used when no database is
//!   configured and by the test suite
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p bookstore-cli -- migrate
//! ```

pub mod books;
pub mod memory;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use bookstore_core::BookId;

use crate::models::{Book, NewBook, NewUser, User};

pub use books::PgBookRepository;
pub use memory::MemoryStore;
pub use users::PgUserRepository;

/// Errors raised by store adapters.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Access to the `books` collection.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Number of stored books.
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Every stored book. Order is adapter-defined.
    async fn list(&self) -> Result<Vec<Book>, RepositoryError>;

    /// Point lookup by id.
    async fn get(&self, id: BookId) -> Result<Option<Book>, RepositoryError>;

    /// Store a new book and return it with its assigned id.
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError>;
}

/// Access to the `users` collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// First user with this username, if any.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Store a new user and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-violation into `RepositoryError::Conflict`.
fn map_unique_violation(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
