use tinykey_core::{ShortenerError, MAX_KEY_LENGTH};
use typed_builder::TypedBuilder;

pub const DEFAULT_KEY_LENGTH: usize = 6;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Tuning for key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct ShortenerConfig {
    /// Length of generated keys.
    #[builder(default = DEFAULT_KEY_LENGTH)]
    pub key_length: usize,
    /// How many candidate keys to try before giving up on a save.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ShortenerConfig {
    pub fn validate(&self) -> Result<(), ShortenerError> {
        if self.key_length == 0 || self.key_length > MAX_KEY_LENGTH {
            return Err(ShortenerError::InvalidConfig(format!(
                "key length must be between 1 and {}, got {}",
                MAX_KEY_LENGTH, self.key_length
            )));
        }

        if self.max_attempts == 0 {
            return Err(ShortenerError::InvalidConfig(
                "max attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
