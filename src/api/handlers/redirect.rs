//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the code (404 if unknown, nothing is written)
/// 2. Increment the access counter, best-effort
/// 3. If the record carries a warning, redirect to the warning page with
///    `destination`, `warningType` and `customWarning` query params
/// 4. Otherwise redirect straight to the original URL
///
/// Both cases answer `302 Found` with an empty body.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the lookup fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target = state.short_url_service.resolve(&code).await?;
    let location = target.location(&state.links.warning_page_url);

    debug!(%code, %location, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location_header(&location)?)]).into_response())
}

/// Converts a location into a header value.
///
/// Destinations are stored as submitted, so absolute locations are
/// re-serialized through [`Url`] to percent-encode spaces, non-ASCII and
/// control characters. Relative warning-page locations are already encoded.
fn location_header(location: &str) -> Result<HeaderValue, AppError> {
    let normalized = match Url::parse(location) {
        Ok(url) => String::from(url),
        Err(_) => location.to_string(),
    };

    HeaderValue::from_str(&normalized).map_err(|e| {
        AppError::internal(
            "Stored URL cannot be used as a redirect",
            json!({ "reason": e.to_string() }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_passthrough() {
        let value = location_header("https://example.com/path?q=1").unwrap();
        assert_eq!(value, "https://example.com/path?q=1");
    }

    #[test]
    fn test_location_header_relative_warning_page() {
        let value = location_header("/warning?destination=https%3A%2F%2Fexample.com").unwrap();
        assert_eq!(value, "/warning?destination=https%3A%2F%2Fexample.com");
    }

    #[test]
    fn test_location_header_encodes_spaces_and_non_ascii() {
        let value = location_header("https://example.com/a b/café").unwrap();
        assert_eq!(value, "https://example.com/a%20b/caf%C3%A9");
    }

    #[test]
    fn test_location_header_absolute_warning_page_keeps_query() {
        let location = "https://s.example.com/warning?destination=https%3A%2F%2Fexample.com&customWarning=loud+noises";
        let value = location_header(location).unwrap();
        assert_eq!(value, location);
    }

    #[test]
    fn test_location_header_encodes_control_characters() {
        let value = location_header("https://example.com/a\u{7f}b").unwrap();
        assert_eq!(value, "https://example.com/a%7Fb");
    }
}
