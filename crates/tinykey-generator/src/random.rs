use crate::{Generator, ALPHABET};
use std::iter;
use tinykey_core::ShortKey;

/// Generates a random string of `length` characters from [`ALPHABET`].
///
/// Every character is an independent uniform draw. A `length` of zero
/// yields an empty string.
pub fn generate_key(length: usize) -> String {
    iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// A generator backed by the thread-local random number generator.
///
/// Keys are statistically uniform but not suitable as secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self, length: usize) -> ShortKey {
        ShortKey::new_unchecked(generate_key(length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_have_requested_length() {
        for length in 1..=32 {
            assert_eq!(generate_key(length).len(), length);
        }
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate_key(0), "");
    }

    #[test]
    fn keys_are_alphanumeric() {
        for _ in 0..100 {
            let key = generate_key(10);
            assert!(key.bytes().all(|b| ALPHABET.contains(&b)), "bad key {key}");
        }
    }

    #[test]
    fn thousand_keys_are_distinct() {
        // 62^6 possible keys; a collision among 1000 is vanishingly unlikely.
        let keys: HashSet<String> = (0..1000).map(|_| generate_key(6)).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn draws_cover_the_alphabet() {
        let seen: HashSet<char> = generate_key(10_000).chars().collect();
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn generator_produces_valid_short_keys() {
        let generator = RandomGenerator::new();
        let key = generator.generate(6);
        assert!(ShortKey::new(key.as_str()).is_ok());
    }
}
