//! In-process store for both collections.
//!
//! Used when no `DATABASE_URL` is configured (local development) and by the
//! test suite. Data is lost on restart. Ids are assigned sequentially from 1.

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookstore_core::{BookId, UserId};

use super::{BookRepository, RepositoryError, UserRepository};
use crate::models::{Book, NewBook, NewUser, User};

#[derive(Default)]
struct Collections {
    books: Vec<Book>,
    users: Vec<User>,
    next_book_id: i32,
    next_user_id: i32,
}

/// In-memory implementation of [`BookRepository`] and [`UserRepository`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn count(&self) -> Result<u64, RepositoryError> {
        let len = self.inner.read().await.books.len();
        Ok(len as u64)
    }

    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.inner.read().await.books.clone())
    }

    async fn get(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.books.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.next_book_id += 1;
        let book = book.with_id(BookId::new(inner.next_book_id));
        inner.books.push(book.clone());
        Ok(book)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut inner = self.inner.write().await;
        // Checked under the write lock, so concurrent inserts cannot both pass.
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict("username already exists".to_owned()));
        }
        inner.next_user_id += 1;
        let user = user.with_id(UserId::new(inner.next_user_id));
        inner.users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bookstore_core::Price;
    use rust_decimal::Decimal;

    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Anon".to_string(),
            price: Price::usd(Decimal::new(1250, 2)),
            description: "desc".to_string(),
            image_url: "https://img.test/cover.jpg".to_string(),
        }
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: format!("{username}@mail.test"),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = BookRepository::insert(&store, new_book("A")).await.unwrap();
        let b = BookRepository::insert(&store, new_book("B")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_round_trips_fields() {
        let store = MemoryStore::new();
        let stored = BookRepository::insert(&store, new_book("Round Trip"))
            .await
            .unwrap();
        let fetched = store.get(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.price.display(), "$12.50");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert!(store.get(BookId::new(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_insert_rejects_duplicate_username() {
        let store = MemoryStore::new();
        UserRepository::insert(&store, new_user("alice")).await.unwrap();
        let err = UserRepository::insert(&store, new_user("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_by_username_is_exact() {
        let store = MemoryStore::new();
        let alice = UserRepository::insert(&store, new_user("alice")).await.unwrap();
        assert_eq!(store.find_by_username("alice").await.unwrap(), Some(alice));
        assert!(store.find_by_username("Alice").await.unwrap().is_none());
    }
}
