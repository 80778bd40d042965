//! Key generators feeding the driver

use crate::error::{RaceError, RaceResult};
use crate::record::RecordKey;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of keys to look up
pub trait KeyGenerator: Send {
    /// Draw the next key
    fn next_key(&mut self) -> RecordKey;
}

/// Uniformly random picks from a set of known keys
pub struct RandomKeys {
    rng: StdRng,
    keys: Vec<RecordKey>,
}

impl RandomKeys {
    /// Create a generator over `keys`; a seed makes the sequence reproducible
    pub fn new(keys: Vec<RecordKey>, seed: Option<u64>) -> RaceResult<Self> {
        if keys.is_empty() {
            return Err(RaceError::KeysInvalid("no keys to draw from".to_string()));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { rng, keys })
    }
}

impl KeyGenerator for RandomKeys {
    fn next_key(&mut self) -> RecordKey {
        self.keys[self.rng.random_range(0..self.keys.len())]
    }
}

/// Cycles through a fixed list of keys
pub struct FixedKeys {
    keys: Vec<RecordKey>,
    next: usize,
}

impl FixedKeys {
    /// Create a generator over a non-empty key list
    pub fn new(keys: Vec<RecordKey>) -> RaceResult<Self> {
        if keys.is_empty() {
            return Err(RaceError::KeysInvalid("at least one key is required".to_string()));
        }
        Ok(Self { keys, next: 0 })
    }
}

impl KeyGenerator for FixedKeys {
    fn next_key(&mut self) -> RecordKey {
        let key = self.keys[self.next];
        self.next = (self.next + 1) % self.keys.len();
        key
    }
}
