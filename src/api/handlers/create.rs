//! Handler for short URL creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::short_url::{CreateShortUrlRequest, ShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/new`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "alias": "abc",              // optional
///   "warningType": "nsfw",       // optional: nsfw | trigger | custom
///   "customWarning": "Spoilers"  // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortCode": "abc",
///   "originalUrl": "https://example.com",
///   "warningType": "nsfw",
///   "customWarning": "Spoilers",
///   "createdAt": 1700000000,
///   "accessCount": 0
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request: missing/invalid `originalUrl`, invalid alias or warning type, malformed JSON
/// - 409 Conflict: alias already exists
/// - 500 Internal Server Error: no free code after retries, storage failure
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let created = state
        .short_url_service
        .create_short_url(payload.into_validated()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse::new(created, &state.links)),
    ))
}
