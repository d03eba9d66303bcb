//! Seed the catalog with the sample books.

use std::sync::Arc;

use bookstore_storefront::db::PgBookRepository;
use bookstore_storefront::services::Catalog;

use super::{CommandError, connect};

/// Insert the sample books if the `books` table is empty.
///
/// Returns how many books were inserted.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<usize, CommandError> {
    let pool = connect().await?;
    let catalog = Catalog::new(Arc::new(PgBookRepository::new(pool)));

    let inserted = catalog.seed_if_empty().await?;
    if inserted == 0 {
        tracing::info!("Catalog already has books, nothing to seed");
    } else {
        tracing::info!(count = inserted, "Seeded catalog");
    }

    Ok(inserted)
}
