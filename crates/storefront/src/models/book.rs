//! Book domain types.

use bookstore_core::{BookId, Price};

/// A book in the catalog.
///
/// The `id` is assigned by the store on insert and filled in by the adapter
/// on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Store-assigned identifier.
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub price: Price,
    pub description: String,
    /// Cover image URL.
    pub image_url: String,
}

impl Book {
    /// Whether `needle` (already lowercased) occurs in the title or author,
    /// ignoring case.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

/// A book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: Price,
    pub description: String,
    pub image_url: String,
}

impl NewBook {
    /// Attach a store-assigned id.
    #[must_use]
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            price: self.price,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn book(title: &str, author: &str) -> Book {
        NewBook {
            title: title.to_string(),
            author: author.to_string(),
            price: Price::usd(Decimal::new(999, 2)),
            description: String::new(),
            image_url: String::new(),
        }
        .with_id(BookId::new(1))
    }

    #[test]
    fn test_matches_title_or_author() {
        let b = book("Nineteen Eighty-Four", "George Orwell");
        assert!(b.matches_lowercase("eighty"));
        assert!(b.matches_lowercase("orwell"));
        assert!(b.matches_lowercase(""));
        assert!(!b.matches_lowercase("huxley"));
    }

    #[test]
    fn test_needle_must_be_lowercased_by_caller() {
        let b = book("Dune", "Frank Herbert");
        assert!(b.matches_lowercase("dune"));
        assert!(!b.matches_lowercase("Dune"));
    }
}
