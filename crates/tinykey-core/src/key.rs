use crate::error::ShortenerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Longest short key the store accepts.
pub const MAX_KEY_LENGTH: usize = 10;

/// A validated short key identifying a stored URL.
///
/// Short keys are 1-10 characters long and contain only ASCII
/// letters and digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortKey(String);

impl ShortKey {
    /// Creates a new `ShortKey` after validating the input.
    pub fn new(key: impl Into<String>) -> Result<Self, ShortenerError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Creates a `ShortKey` without validation.
    ///
    /// Use this only for keys produced by trusted internal sources
    /// (e.g. generators that only draw from the alphanumeric alphabet).
    pub fn new_unchecked(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(key: &str) -> Result<(), ShortenerError> {
        if key.is_empty() {
            return Err(ShortenerError::InvalidKey(
                "short key cannot be empty".to_string(),
            ));
        }

        if key.len() > MAX_KEY_LENGTH {
            return Err(ShortenerError::InvalidKey(format!(
                "length must be at most {}, got {}",
                MAX_KEY_LENGTH,
                key.len()
            )));
        }

        if !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ShortenerError::InvalidKey(format!(
                "must contain only alphanumeric characters: '{}'",
                key
            )));
        }

        Ok(())
    }
}

impl Display for ShortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShortKey {
    type Error = ShortenerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortKey> for String {
    fn from(value: ShortKey) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_keys() {
        assert!(ShortKey::new("a").is_ok());
        assert!(ShortKey::new("Abc123").is_ok());
        assert!(ShortKey::new("Z".repeat(MAX_KEY_LENGTH)).is_ok());
    }

    #[test]
    fn empty_key() {
        let err = ShortKey::new("").unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidKey(_)));
    }

    #[test]
    fn too_long() {
        assert!(ShortKey::new("a".repeat(MAX_KEY_LENGTH + 1)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortKey::new("abc def").is_err());
        assert!(ShortKey::new("abc-def").is_err());
        assert!(ShortKey::new("abc_def").is_err());
        assert!(ShortKey::new("héllo").is_err());
    }

    #[test]
    fn to_url_joins_with_single_slash() {
        let key = ShortKey::new("abc123").unwrap();
        assert_eq!(key.to_url("https://tiny.key"), "https://tiny.key/abc123");
        assert_eq!(key.to_url("https://tiny.key/"), "https://tiny.key/abc123");
    }

    #[test]
    fn deserialize_validates() {
        let key: ShortKey = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(key.as_str(), "abc123");
        assert!(serde_json::from_str::<ShortKey>("\"a/b\"").is_err());
    }
}
