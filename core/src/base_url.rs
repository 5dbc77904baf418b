//! Validated API base URL.

use std::fmt;

use url::Url;

use crate::error::ValidationError;

/// An absolute `http`/`https` URL that endpoint paths are appended to.
///
/// Holds the user's text as typed (trimmed, minus one trailing slash), not
/// `Url`'s normalized serialization, so `https://api.test` stays without the
/// root slash `Url` would add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let candidate = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if candidate.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        let parsed = Url::parse(candidate).map_err(|e| ValidationError::InvalidUrl {
            input: candidate.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidUrl {
                input: candidate.to_string(),
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }

        Ok(Self(candidate.to_string()))
    }

    /// Plain concatenation; the joined URL is not re-validated.
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
