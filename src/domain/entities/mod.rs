//! Core domain entities.
//!
//! - [`ShortUrl`] - A stored short code mapping
//! - [`NewShortUrl`] - Data for inserting a new mapping
//! - [`WarningType`] - Content warning attached to a mapping

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl, UnknownWarningType, WarningType};
