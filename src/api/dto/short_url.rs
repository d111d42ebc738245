//! DTOs for short URL creation and lookup.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreateShortUrl;
use crate::domain::entities::{ShortUrl, WarningType};
use crate::error::AppError;
use crate::state::LinkSettings;

/// Request body for `POST /api/new`.
///
/// Every field is optional at the JSON level so that a missing `originalUrl`
/// is reported as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlRequest {
    /// Destination URL (must be absolute HTTP/HTTPS).
    #[validate(length(max = 2048, message = "Original URL must be at most 2048 characters"))]
    pub original_url: Option<String>,

    /// Optional user-chosen short code.
    #[validate(length(max = 64, message = "Alias must be at most 64 characters"))]
    pub alias: Option<String>,

    /// One of `nsfw`, `trigger`, `custom`.
    pub warning_type: Option<String>,

    /// Free-text warning shown on the interstitial.
    #[validate(length(max = 500, message = "Custom warning must be at most 500 characters"))]
    pub custom_warning: Option<String>,
}

impl CreateShortUrlRequest {
    /// Applies the field length limits and converts into service input.
    ///
    /// Shared by the HTTP API and the admin CLI.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages when a limit is exceeded.
    pub fn into_validated(self) -> Result<CreateShortUrl, AppError> {
        self.validate()?;
        Ok(self.into())
    }
}

impl From<CreateShortUrlRequest> for CreateShortUrl {
    fn from(request: CreateShortUrlRequest) -> Self {
        Self {
            original_url: request.original_url,
            alias: request.alias,
            warning_type: request.warning_type,
            custom_warning: request.custom_warning,
        }
    }
}

/// A stored short URL as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResponse {
    pub short_code: String,
    pub original_url: String,
    pub warning_type: Option<WarningType>,
    pub custom_warning: Option<String>,
    pub created_at: i64,
    pub access_count: i64,

    /// Present when `BASE_URL` is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
}

impl ShortUrlResponse {
    pub fn new(short_url: ShortUrl, links: &LinkSettings) -> Self {
        let full = links.short_url(&short_url.short_code);

        Self {
            short_code: short_url.short_code,
            original_url: short_url.original_url,
            warning_type: short_url.warning_type,
            custom_warning: short_url.custom_warning,
            created_at: short_url.created_at,
            access_count: short_url.access_count,
            short_url: full,
        }
    }
}
