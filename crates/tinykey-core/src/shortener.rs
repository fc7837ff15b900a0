use crate::error::ShortenerError;
use crate::key::ShortKey;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Longest URL the store accepts.
pub const MAX_URL_LENGTH: usize = 2048;

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// The contract exposed to front ends (CLI, HTTP, ...).
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `long_url` under a freshly generated key and returns the key.
    async fn shorten(&self, long_url: &str) -> Result<ShortKey>;

    /// Looks up the URL stored under `key`.
    ///
    /// A key that was never saved is reported as
    /// [`ShortenerError::KeyNotFound`].
    async fn resolve(&self, key: &str) -> Result<String>;
}

/// Checks that `url` can be stored: non-empty, at most [`MAX_URL_LENGTH`]
/// characters, and starting with `http://` or `https://` followed by something.
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(ShortenerError::InvalidUrl(
            "URL cannot be empty".to_string(),
        ));
    }

    let length = url.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must be at most {} characters, got {}",
            MAX_URL_LENGTH, length
        )));
    }

    let Some(rest) = SCHEMES.iter().find_map(|scheme| url.strip_prefix(scheme)) else {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must start with http:// or https://: {}",
            url
        )));
    };

    if rest.is_empty() {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must have a host: {}",
            url
        )));
    }

    Ok(())
}
