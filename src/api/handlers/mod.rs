//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod health;
pub mod redirect;
pub mod short_url;

pub use create::create_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use short_url::get_short_url_handler;
