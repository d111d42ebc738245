//! Handler for read-only short URL lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::short_url::ShortUrlResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a stored short URL, including its access count.
///
/// # Endpoint
///
/// `GET /api/urls/{code}`
///
/// Unlike `GET /{code}` this does not count as an access.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn get_short_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let short_url = state.short_url_service.get_short_url(&code).await?;

    Ok(Json(ShortUrlResponse::new(short_url, &state.links)))
}
