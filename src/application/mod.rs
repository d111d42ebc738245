//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a single place for validation and business rules.
//!
//! - [`services::short_url_service::ShortUrlService`] - Short URL creation and resolution

pub mod services;
