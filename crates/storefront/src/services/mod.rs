//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Password hashing, registration and login
//! - `catalog` - Book listing, lookup, search and seeding

pub mod auth;
pub mod catalog;

pub use auth::{AuthError, AuthService};
pub use catalog::{Catalog, CatalogError};
