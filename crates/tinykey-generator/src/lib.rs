pub mod random;
pub mod seq;

pub use random::{generate_key, RandomGenerator};
pub use seq::SeqGenerator;

use tinykey_core::ShortKey;

/// The 62 characters a short key is drawn from.
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Trait for generating candidate short keys.
///
/// Implementations are pure generators that don't interact with storage:
/// a generated key may already be taken, and it is up to the caller to
/// let the store decide.
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate key of exactly `length` characters.
    fn generate(&self, length: usize) -> ShortKey;
}
