//! API route configuration.

use crate::api::handlers::{create_handler, get_short_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /new`          - Create a short URL
/// - `GET  /urls/{code}`  - Look up a short URL without counting an access
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/new", post(create_handler))
        .route("/urls/{code}", get(get_short_url_handler))
}
