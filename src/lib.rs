//! # warnlink
//!
//! A URL shortening service with optional content warnings, built with Axum
//! and SQLite.
//!
//! A short code either redirects straight to its destination or, when the
//! link carries a warning, to a warning interstitial page that forwards the
//! visitor afterwards.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository trait, redirect decision
//! - **Application Layer** ([`application`]) - Creation and resolution rules
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://database.sqlite"
//! cargo run
//!
//! curl -X POST localhost:3000/api/new \
//!   -H 'content-type: application/json' \
//!   -d '{"originalUrl":"https://example.com","alias":"abc"}'
//! curl -i localhost:3000/abc
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CreateShortUrl, ShortUrlService};
    pub use crate::domain::entities::{NewShortUrl, ShortUrl, WarningType};
    pub use crate::domain::redirect::RedirectTarget;
    pub use crate::error::AppError;
    pub use crate::state::{AppState, LinkSettings};
}
