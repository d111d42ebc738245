//! Short URL creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl, WarningType};
use crate::domain::redirect::RedirectTarget;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_alias};
use crate::utils::url_validator::validate_destination;
use serde_json::json;

/// Smallest allowed number of generated-code attempts: the first draw plus one retry.
pub const MIN_GENERATION_ATTEMPTS: usize = 2;

/// Raw creation input as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct CreateShortUrl {
    pub original_url: Option<String>,
    pub alias: Option<String>,
    pub warning_type: Option<String>,
    pub custom_warning: Option<String>,
}

/// Service for creating and resolving short URLs.
pub struct ShortUrlService<R: ShortUrlRepository> {
    repository: Arc<R>,
    max_generation_attempts: usize,
}

impl<R: ShortUrlRepository> ShortUrlService<R> {
    /// Creates a service that retries generated-code collisions once.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generation_attempts(repository, MIN_GENERATION_ATTEMPTS)
    }

    /// Creates a service with a custom bound on generated-code attempts.
    ///
    /// Values below [`MIN_GENERATION_ATTEMPTS`] are raised to it.
    pub fn with_generation_attempts(repository: Arc<R>, attempts: usize) -> Self {
        Self {
            repository,
            max_generation_attempts: attempts.max(MIN_GENERATION_ATTEMPTS),
        }
    }

    /// Access to the underlying repository, used by health checks.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validates input, allocates a unique code and stores a new short URL.
    ///
    /// Empty strings for `alias`, `warning_type` and `custom_warning` count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `original_url` is missing, blank or not an absolute HTTP(S) URL
    /// - the alias breaks the alias rules
    /// - `warning_type` is not `nsfw`, `trigger` or `custom`
    ///
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    ///
    /// Returns [`AppError::Internal`] if every generated code collided or the
    /// store fails.
    pub async fn create_short_url(&self, input: CreateShortUrl) -> Result<ShortUrl, AppError> {
        let original_url = input
            .original_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::bad_request(
                    "Original URL is required",
                    json!({ "field": "originalUrl" }),
                )
            })?;

        validate_destination(&original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let warning_type = non_empty(input.warning_type)
            .map(|raw| raw.parse::<WarningType>())
            .transpose()
            .map_err(|e| {
                AppError::bad_request(
                    "Warning type must be one of: nsfw, trigger, custom",
                    json!({ "reason": e.to_string() }),
                )
            })?;
        let custom_warning = non_empty(input.custom_warning);
        let alias = non_empty(input.alias);

        let (short_code, user_supplied) = match alias {
            Some(alias) => {
                validate_alias(&alias)?;

                if self.repository.find_by_code(&alias).await?.is_some() {
                    return Err(alias_conflict(&alias));
                }

                (alias, true)
            }
            None => (self.generate_unique_code().await?, false),
        };

        let new_url = NewShortUrl {
            short_code,
            original_url,
            warning_type,
            custom_warning,
            created_at: chrono::Utc::now().timestamp(),
        };
        let code = new_url.short_code.clone();

        match self.repository.insert(new_url).await {
            Ok(created) => {
                tracing::info!(code = %created.short_code, user_supplied, "Short URL created");
                Ok(created)
            }
            Err(AppError::Conflict { .. }) if user_supplied => Err(alias_conflict(&code)),
            Err(AppError::Conflict { .. }) => Err(AppError::internal(
                "Failed to generate unique short code",
                json!({ "reason": "Generated code was taken concurrently", "code": code }),
            )),
            Err(e) => Err(e),
        }
    }

    /// Looks up a short URL without touching its access counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    pub async fn get_short_url(&self, code: &str) -> Result<ShortUrl, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| short_url_not_found(code))
    }

    /// Resolves a short code for a visit.
    ///
    /// Bumps the access counter on a best-effort basis: a failed increment is
    /// logged and the redirect still goes ahead.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches; nothing is written.
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve(&self, code: &str) -> Result<RedirectTarget, AppError> {
        let short_url = self.get_short_url(code).await?;

        match self.repository.increment_access_count(code).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(code, "Access count not incremented: record vanished"),
            Err(e) => tracing::warn!(code, error = %e, "Failed to increment access count"),
        }

        Ok(RedirectTarget::for_short_url(&short_url))
    }

    /// Draws random codes until one is free, up to the configured bound.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_generation_attempts {
            let code = generate_code()?;

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::debug!(attempt, "Generated short code collided");
        }

        Err(AppError::internal(
            "Failed to generate unique short code, please try again",
            json!({ "attempts": self.max_generation_attempts }),
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn alias_conflict(alias: &str) -> AppError {
    AppError::conflict("Alias already exists", json!({ "alias": alias }))
}

fn short_url_not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": code }))
}
