use thiserror::Error;

/// Errors reported by a [`UrlStore`](crate::UrlStore) backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("short key already exists: {0}")]
    DuplicateKey(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Returns `true` if the store rejected an insert because the key is taken.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey(_))
    }
}

/// Errors surfaced by the shortener to its front ends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short key: {0}")]
    InvalidKey(String),
    #[error("short key not found: {0}")]
    KeyNotFound(String),
    #[error("no free short key of length {key_length} after {attempts} attempts")]
    KeyGenerationExhausted { attempts: u32, key_length: usize },
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// What the caller can do about a [`ShortenerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected; fix it and try again.
    InvalidInput,
    /// The key does not exist; try another action.
    NotFound,
    /// The system is temporarily unable to serve the request; retry later.
    Unavailable,
}

impl ShortenerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShortenerError::InvalidUrl(_)
            | ShortenerError::InvalidKey(_)
            | ShortenerError::InvalidConfig(_) => ErrorKind::InvalidInput,
            ShortenerError::KeyNotFound(_) => ErrorKind::NotFound,
            // A saturated keyspace clears up with a longer key or a later retry.
            ShortenerError::KeyGenerationExhausted { .. } | ShortenerError::StoreUnavailable(_) => {
                ErrorKind::Unavailable
            }
        }
    }
}
