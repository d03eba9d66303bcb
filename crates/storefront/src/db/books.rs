//! `PostgreSQL` adapter for the `books` collection.
//!
//! Queries use the runtime sqlx API with `FromRow` rows so the crate builds
//! without a live database.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use bookstore_core::{BookId, Price};

use super::{BookRepository, RepositoryError};
use crate::models::{Book, NewBook};

/// Row shape of the `books` table.
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: BookId,
    title: String,
    author: String,
    price: Decimal,
    description: String,
    image_url: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            price: Price::usd(row.price),
            description: row.description,
            image_url: row.image_url,
        }
    }
}

/// Repository for book database operations.
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative book count {count}")))
    }

    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r"
            SELECT id, title, author, price, description, image_url
            FROM books
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let row = sqlx::query_as::<_, BookRow>(
            r"
            SELECT id, title, author, price, description, image_url
            FROM books
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Book::from))
    }

    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let id: BookId = sqlx::query_scalar(
            r"
            INSERT INTO books (title, author, price, description, image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price.amount)
        .bind(&book.description)
        .bind(&book.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(book.with_id(id))
    }
}
