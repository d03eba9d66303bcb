//! Domain models for the storefront.
//!
//! These types represent validated domain objects separate from database row
//! types. Store adapters convert rows into these before handing them out.

pub mod book;
pub mod flash;
pub mod session;
pub mod user;

pub use book::{Book, NewBook};
pub use flash::{FlashLevel, FlashMessage};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, User};
