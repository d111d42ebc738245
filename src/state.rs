//! Shared state injected into every handler.

use std::sync::Arc;

use url::Url;

use crate::application::services::ShortUrlService;
use crate::infrastructure::persistence::SqliteShortUrlRepository;

/// Public-facing URLs used when building responses and redirects.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Origin prepended to short codes in creation responses, e.g. `https://s.example.com`.
    pub base_url: Option<String>,
    /// Warning interstitial endpoint, relative or absolute.
    pub warning_page_url: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            warning_page_url: "/warning".to_string(),
        }
    }
}

impl LinkSettings {
    /// Full short URL for `code`, if a base URL is configured.
    pub fn short_url(&self, code: &str) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), code))
    }

    /// True when the warning page is a path on this host rather than an absolute URL.
    ///
    /// This service does not serve the page itself, so a relative path only
    /// works behind a proxy that routes it to the frontend.
    pub fn warning_page_is_relative(&self) -> bool {
        Url::parse(&self.warning_page_url).is_err()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService<SqliteShortUrlRepository>>,
    pub links: Arc<LinkSettings>,
}

impl AppState {
    pub fn new(
        short_url_service: Arc<ShortUrlService<SqliteShortUrlRepository>>,
        links: LinkSettings,
    ) -> Self {
        Self {
            short_url_service,
            links: Arc::new(links),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_without_base() {
        assert_eq!(LinkSettings::default().short_url("abc"), None);
    }

    #[test]
    fn test_warning_page_is_relative() {
        assert!(LinkSettings::default().warning_page_is_relative());

        let links = LinkSettings {
            warning_page_url: "https://app.example.com/warning".to_string(),
            ..Default::default()
        };
        assert!(!links.warning_page_is_relative());
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let links = LinkSettings {
            base_url: Some("https://s.example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            links.short_url("abc").as_deref(),
            Some("https://s.example.com/abc")
        );
    }
}
