//! SQLite repository implementations.
//!
//! - [`SqliteShortUrlRepository`] - Short URL storage and retrieval

pub mod sqlite_short_url_repository;

pub use sqlite_short_url_repository::{SqliteSettings, SqliteShortUrlRepository};
