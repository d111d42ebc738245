//! Short URL entity representing a code-to-destination mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of content warning attached to a short URL.
///
/// New records only ever carry the three named kinds. [`WarningType::Other`]
/// holds a value read back from storage that is none of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningType {
    Nsfw,
    Trigger,
    Custom,
    #[serde(untagged)]
    Other(String),
}

impl WarningType {
    /// Value stored in the `warning_type` column and sent to the warning page.
    pub fn as_str(&self) -> &str {
        match self {
            WarningType::Nsfw => "nsfw",
            WarningType::Trigger => "trigger",
            WarningType::Custom => "custom",
            WarningType::Other(raw) => raw,
        }
    }

    /// Reads a stored column value, keeping unrecognized values verbatim.
    pub fn from_stored(value: &str) -> Self {
        value
            .parse()
            .unwrap_or_else(|_| WarningType::Other(value.to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, WarningType::Other(_))
    }
}

impl fmt::Display for WarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known warning type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown warning type: {0}")]
pub struct UnknownWarningType(pub String);

impl FromStr for WarningType {
    type Err = UnknownWarningType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nsfw" => Ok(WarningType::Nsfw),
            "trigger" => Ok(WarningType::Trigger),
            "custom" => Ok(WarningType::Custom),
            other => Err(UnknownWarningType(other.to_string())),
        }
    }
}

/// A stored short URL.
///
/// Only `access_count` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub short_code: String,
    pub original_url: String,
    pub warning_type: Option<WarningType>,
    pub custom_warning: Option<String>,
    /// Unix seconds.
    pub created_at: i64,
    pub access_count: i64,
}

impl ShortUrl {
    /// Returns true if visitors must pass through the warning page.
    pub fn has_warning(&self) -> bool {
        self.warning_type.is_some() || self.custom_warning.is_some()
    }
}

/// Input data for inserting a new short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub short_code: String,
    pub original_url: String,
    pub warning_type: Option<WarningType>,
    pub custom_warning: Option<String>,
    pub created_at: i64,
}

impl NewShortUrl {
    /// The record as it looks right after insertion.
    pub fn into_short_url(self) -> ShortUrl {
        ShortUrl {
            short_code: self.short_code,
            original_url: self.original_url,
            warning_type: self.warning_type,
            custom_warning: self.custom_warning,
            created_at: self.created_at,
            access_count: 0,
        }
    }
}
