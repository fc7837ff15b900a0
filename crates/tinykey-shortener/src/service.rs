use crate::config::ShortenerConfig;
use async_trait::async_trait;
use std::sync::Arc;
use tinykey_core::{
    validate_url, ShortKey, Shortener, ShortenerError, StoreError, UrlRecord, UrlStore,
};
use tinykey_generator::Generator;
use tracing::{debug, info, instrument, warn};

/// A concrete implementation of the [`Shortener`] trait.
///
/// This service wraps a [`UrlStore`] and a [`Generator`] to handle:
/// - URL validation before any store call
/// - key generation with bounded collision retry
/// - translating store failures for front ends
///
/// Uniqueness is never pre-checked. Each candidate goes straight to
/// [`UrlStore::save`], whose constraint decides atomically; a rejected
/// candidate is replaced by a fresh one until `max_attempts` is reached.
#[derive(Debug)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    config: ShortenerConfig,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            config: self.config,
        }
    }
}

impl<S: UrlStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new `ShortenerService` with the default configuration.
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            config: ShortenerConfig::default(),
        }
    }

    /// Creates a new `ShortenerService`, rejecting an invalid configuration.
    pub fn with_config(
        store: S,
        generator: G,
        config: ShortenerConfig,
    ) -> Result<Self, ShortenerError> {
        config.validate()?;
        Ok(Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            config,
        })
    }

    pub fn config(&self) -> &ShortenerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up the full record stored under `key`, including its creation time.
    pub async fn inspect(&self, key: &str) -> Result<UrlRecord, ShortenerError> {
        let key = ShortKey::new(key)?;

        self.store
            .find_record(&key)
            .await
            .map_err(store_to_shortener_error)?
            .ok_or_else(|| ShortenerError::KeyNotFound(key.to_string()))
    }
}

#[async_trait]
impl<S: UrlStore, G: Generator> Shortener for ShortenerService<S, G> {
    #[instrument(skip(self))]
    async fn shorten(&self, long_url: &str) -> Result<ShortKey, ShortenerError> {
        validate_url(long_url)?;

        let ShortenerConfig {
            key_length,
            max_attempts,
        } = self.config;

        for attempt in 1..=max_attempts {
            let candidate = self.generator.generate(key_length);

            match self.store.save(&candidate, long_url).await {
                Ok(()) => {
                    info!(key = %candidate, attempt, "short key created");
                    return Ok(candidate);
                }
                Err(StoreError::DuplicateKey(_)) => {
                    debug!(key = %candidate, attempt, "short key collision");
                }
                Err(err) => {
                    warn!(error = %err, attempt, "store rejected save");
                    return Err(store_to_shortener_error(err));
                }
            }
        }

        warn!(max_attempts, "no free short key found");
        Err(ShortenerError::KeyGenerationExhausted {
            attempts: max_attempts,
            key_length,
        })
    }

    #[instrument(skip(self))]
    async fn resolve(&self, key: &str) -> Result<String, ShortenerError> {
        let key = ShortKey::new(key)?;

        match self.store.find(&key).await {
            Ok(Some(long_url)) => Ok(long_url),
            Ok(None) => {
                debug!(key = %key, "short key not found");
                Err(ShortenerError::KeyNotFound(key.to_string()))
            }
            Err(err) => {
                warn!(error = %err, "store lookup failed");
                Err(store_to_shortener_error(err))
            }
        }
    }
}

/// Converts a [`StoreError`] to a [`ShortenerError`].
///
/// Only `DuplicateKey` is recoverable, and it is handled inside the retry
/// loop; anything reaching this function means the store cannot serve.
fn store_to_shortener_error(e: StoreError) -> ShortenerError {
    ShortenerError::StoreUnavailable(e.to_string())
}
