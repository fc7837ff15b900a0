use crate::{Generator, ALPHABET};
use std::sync::atomic::{AtomicU64, Ordering};
use tinykey_core::ShortKey;

/// A deterministic generator that base62-encodes a counter.
///
/// Codes are left-padded with the first alphabet character to the
/// requested length (`aaaaaa`, `aaaaab`, ...). Once the counter no longer
/// fits in `length` characters only the low-order digits are kept, so keys
/// start repeating and the store's uniqueness check takes over.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

fn encode_base62(mut value: u64, length: usize) -> String {
    let base = ALPHABET.len() as u64;
    let mut digits = vec![ALPHABET[0]; length];

    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % base) as usize];
        value /= base;
    }

    digits.into_iter().map(char::from).collect()
}

impl Generator for SeqGenerator {
    fn generate(&self, length: usize) -> ShortKey {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortKey::new_unchecked(encode_base62(count, length))
    }
}
