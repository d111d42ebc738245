//! Redirect decision for a resolved short URL.
//!
//! The decision is a pure function of the stored warning fields; nothing about
//! whether a warning was shown is persisted.

use url::form_urlencoded;

use crate::domain::entities::{ShortUrl, WarningType};

/// Where a visitor of a short URL is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Straight to the original URL.
    Direct { destination: String },
    /// Through the warning interstitial, which forwards to `destination`.
    Warning {
        destination: String,
        warning_type: Option<WarningType>,
        custom_warning: Option<String>,
    },
}

impl RedirectTarget {
    pub fn for_short_url(short_url: &ShortUrl) -> Self {
        if short_url.has_warning() {
            RedirectTarget::Warning {
                destination: short_url.original_url.clone(),
                warning_type: short_url.warning_type.clone(),
                custom_warning: short_url.custom_warning.clone(),
            }
        } else {
            RedirectTarget::Direct {
                destination: short_url.original_url.clone(),
            }
        }
    }

    /// Final destination, regardless of the interstitial.
    pub fn destination(&self) -> &str {
        match self {
            RedirectTarget::Direct { destination } | RedirectTarget::Warning { destination, .. } => {
                destination
            }
        }
    }

    /// Builds the `Location` value for this target.
    ///
    /// Warning targets point at `warning_page_url` with `destination`, and when
    /// present `warningType` and `customWarning`, as form-encoded query params.
    pub fn location(&self, warning_page_url: &str) -> String {
        match self {
            RedirectTarget::Direct { destination } => destination.clone(),
            RedirectTarget::Warning {
                destination,
                warning_type,
                custom_warning,
            } => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                query.append_pair("destination", destination);
                if let Some(warning_type) = warning_type {
                    query.append_pair("warningType", warning_type.as_str());
                }
                if let Some(custom_warning) = custom_warning {
                    query.append_pair("customWarning", custom_warning);
                }

                let separator = if warning_page_url.contains('?') { '&' } else { '?' };
                format!("{warning_page_url}{separator}{}", query.finish())
            }
        }
    }
}
