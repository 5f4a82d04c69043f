//! Synthetic data sources for bulk generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::record::GeneratedPair;

/// Alphabet for random key/value suffixes
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random suffix length for generated keys
pub const KEY_SUFFIX_LEN: usize = 5;

/// Random suffix length for generated values
pub const VALUE_SUFFIX_LEN: usize = 10;

/// Produces the key/value pairs inserted by a bulk-generate call
///
/// An error returned from `generate` aborts the batch and rolls back
/// every row already inserted by it.
pub trait SyntheticSource {
    fn generate(&mut self, index: usize) -> Result<GeneratedPair>;
}

/// Default source: `key-{i}-{5 letters}` / `value-{i}-{10 letters}`
///
/// The embedded index keeps keys within one batch distinct; the random
/// suffix makes collisions with earlier batches unlikely.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic source (same seed, same pairs)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticSource for RandomSource {
    fn generate(&mut self, index: usize) -> Result<GeneratedPair> {
        let key = format!("key-{}-{}", index, self.random_string(KEY_SUFFIX_LEN));
        let value = format!("value-{}-{}", index, self.random_string(VALUE_SUFFIX_LEN));
        Ok(GeneratedPair { key, value })
    }
}
