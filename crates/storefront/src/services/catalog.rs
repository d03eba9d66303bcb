//! Book catalog service.
//!
//! Thin layer over a [`BookRepository`]: listing, point lookup, full-scan
//! search and first-run seeding.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use bookstore_core::{BookId, Price};

use crate::db::{BookRepository, RepositoryError};
use crate::models::{Book, NewBook};

/// Errors returned by [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book with this id.
    #[error("book {0} not found")]
    NotFound(BookId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The book catalog.
#[derive(Clone)]
pub struct Catalog {
    books: Arc<dyn BookRepository>,
}

impl Catalog {
    #[must_use]
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    /// Insert the sample books if the catalog is empty.
    ///
    /// Returns how many books were inserted (0 when the catalog already had
    /// data). Two processes seeding an empty store at the same time can both
    /// insert.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn seed_if_empty(&self) -> Result<usize, CatalogError> {
        if self.books.count().await? > 0 {
            tracing::debug!("Catalog already populated, skipping seed");
            return Ok(0);
        }

        let samples = sample_books();
        let inserted = samples.len();
        for book in samples {
            let stored = self.books.insert(book).await?;
            tracing::debug!(book_id = %stored.id, title = %stored.title, "Seeded book");
        }

        tracing::info!(count = inserted, "Seeded empty catalog");
        Ok(inserted)
    }

    /// Every book with its id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn list_all(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.books.list().await?)
    }

    /// Look up a single book.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not resolve.
    pub async fn get(&self, id: BookId) -> Result<Book, CatalogError> {
        self.books
            .get(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Case-insensitive substring search over title and author.
    ///
    /// Scans every record; there is no index. An empty query matches all books.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Book>, CatalogError> {
        let needle = query.to_lowercase();
        let mut books = self.books.list().await?;
        books.retain(|book| book.matches_lowercase(&needle));
        Ok(books)
    }

    /// Number of books in the store.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn count(&self) -> Result<u64, CatalogError> {
        Ok(self.books.count().await?)
    }
}

/// The fixed books inserted into an empty catalog.
#[must_use]
pub fn sample_books() -> Vec<NewBook> {
    vec![
        NewBook {
            title: "The Great Gatsby".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            price: Price::usd(Decimal::new(1099, 2)),
            description: "A story of wealth and love in the Jazz Age".to_string(),
            image_url: "https://m.media-amazon.com/images/I/71FTb9X6wsL._AC_UF1000,1000_QL80_.jpg"
                .to_string(),
        },
        NewBook {
            title: "To Kill a Mockingbird".to_string(),
            author: "Harper Lee".to_string(),
            price: Price::usd(Decimal::new(1250, 2)),
            description: "A powerful story of racial injustice".to_string(),
            image_url: "https://m.media-amazon.com/images/I/71FxgtFKcQL._AC_UF1000,1000_QL80_.jpg"
                .to_string(),
        },
        NewBook {
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            price: Price::usd(Decimal::new(999, 2)),
            description: "Dystopian novel about totalitarianism".to_string(),
            image_url: "https://m.media-amazon.com/images/I/71kxa1-0mfL._AC_UF1000,1000_QL80_.jpg"
                .to_string(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    async fn seeded() -> Catalog {
        let catalog = Catalog::new(Arc::new(MemoryStore::new()));
        catalog.seed_if_empty().await.unwrap();
        catalog
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        let mut titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }

    #[tokio::test]
    async fn test_seed_empty_catalog() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new()));
        assert_eq!(catalog.seed_if_empty().await.unwrap(), 3);

        let books = catalog.list_all().await.unwrap();
        assert_eq!(
            titles(&books),
            vec!["1984", "The Great Gatsby", "To Kill a Mockingbird"]
        );
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let catalog = seeded().await;
        let before = catalog.list_all().await.unwrap();

        assert_eq!(catalog.seed_if_empty().await.unwrap(), 0);
        assert_eq!(catalog.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_catalog() {
        let store = Arc::new(MemoryStore::new());
        let mut custom = sample_books().remove(0);
        custom.title = "Only Book".to_string();
        BookRepository::insert(store.as_ref(), custom).await.unwrap();

        let catalog = Catalog::new(store);
        assert_eq!(catalog.seed_if_empty().await.unwrap(), 0);
        assert_eq!(catalog.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let new_book = NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            price: Price::usd(Decimal::new(1475, 2)),
            description: "Spice".to_string(),
            image_url: "https://img.test/dune.jpg".to_string(),
        };
        let stored = BookRepository::insert(store.as_ref(), new_book.clone())
            .await
            .unwrap();

        let catalog = Catalog::new(store);
        let fetched = catalog.get(stored.id).await.unwrap();
        assert_eq!(fetched, new_book.with_id(stored.id));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let catalog = seeded().await;
        let err = catalog.get(BookId::new(9_999)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == BookId::new(9_999)));
    }

    #[tokio::test]
    async fn test_empty_search_returns_everything() {
        let catalog = seeded().await;
        let all = catalog.list_all().await.unwrap();
        assert_eq!(catalog.search("").await.unwrap(), all);
    }

    #[tokio::test]
    async fn test_search_title_case_insensitive() {
        let catalog = seeded().await;
        let results = catalog.search("GATSBY").await.unwrap();
        assert_eq!(titles(&results), vec!["The Great Gatsby"]);
    }

    #[tokio::test]
    async fn test_search_author() {
        let catalog = seeded().await;
        let results = catalog.search("orwell").await.unwrap();
        assert_eq!(titles(&results), vec!["1984"]);
    }

    #[tokio::test]
    async fn test_search_matches_across_books() {
        let catalog = seeded().await;
        // Fitzgerald and Harper both contain "er"
        let results = catalog.search("ER").await.unwrap();
        assert_eq!(
            titles(&results),
            vec!["The Great Gatsby", "To Kill a Mockingbird"]
        );
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let catalog = seeded().await;
        assert!(catalog.search("tolkien").await.unwrap().is_empty());
    }
}
