//! Short code generation.
//!
//! Codes are drawn uniformly from an alphabet (62 alphanumerics by default)
//! using an injectable random source, so tests can pin the sequence.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;

/// Default alphabet: `[a-zA-Z0-9]`.
pub const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates random short codes.
///
/// Shared behind `&self`; the random source sits behind a mutex that is held
/// only for the duration of a single `generate` call.
pub struct CodeGenerator {
    alphabet: Vec<u8>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl CodeGenerator {
    /// Creates a generator over [`ALPHANUMERIC`] seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a deterministic generator, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator over [`ALPHANUMERIC`] using the given random source.
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            alphabet: ALPHANUMERIC.to_vec(),
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Replaces the alphabet.
    ///
    /// # Panics
    ///
    /// Panics if `alphabet` is empty.
    pub fn with_alphabet(mut self, alphabet: &[u8]) -> Self {
        assert!(!alphabet.is_empty(), "code alphabet must not be empty");
        self.alphabet = alphabet.to_vec();
        self
    }

    /// Produces a code of `length` independent uniform samples from the alphabet.
    pub fn generate(&self, length: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        (0..length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())] as char)
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_requested_length() {
        let generator = CodeGenerator::new();
        assert_eq!(generator.generate(8).len(), 8);
        assert_eq!(generator.generate(0).len(), 0);
        assert_eq!(generator.generate(32).len(), 32);
    }

    #[test]
    fn test_generate_alphanumeric_characters() {
        let generator = CodeGenerator::new();
        let code = generator.generate(64);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_produces_unique_codes() {
        let generator = CodeGenerator::new();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate(8)).collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = CodeGenerator::with_seed(42);
        let b = CodeGenerator::with_seed(42);

        for _ in 0..10 {
            assert_eq!(a.generate(8), b.generate(8));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = CodeGenerator::with_seed(1);
        let b = CodeGenerator::with_seed(2);

        let left: Vec<String> = (0..5).map(|_| a.generate(8)).collect();
        let right: Vec<String> = (0..5).map(|_| b.generate(8)).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn test_custom_alphabet() {
        let generator = CodeGenerator::with_seed(7).with_alphabet(b"x");
        assert_eq!(generator.generate(5), "xxxxx");
    }

    #[test]
    fn test_custom_alphabet_restricts_output() {
        let generator = CodeGenerator::with_seed(7).with_alphabet(b"ab");
        let code = generator.generate(100);
        assert!(code.chars().all(|c| c == 'a' || c == 'b'));
        assert!(code.contains('a') && code.contains('b'));
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_empty_alphabet_panics() {
        let _ = CodeGenerator::new().with_alphabet(b"");
    }
}
