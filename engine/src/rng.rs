//! Deterministic random number generation.
//!
//! `GameRng` is a SHA-256 hash chain: the caller's seed and the round
//! id are hashed into an initial state, and the state is rehashed
//! whenever more bytes are needed. The same `(seed, round_id)` pair
//! always reproduces the same draw sequence, which is what makes every
//! outcome replayable from its inputs. Bounded draws use rejection
//! sampling, so no range is biased.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Deterministic random number generator for one round.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create an RNG from a seed and a round id.
    pub fn new(seed: &[u8], round_id: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(round_id.to_be_bytes());
        Self {
            state: hasher.finalize().into(),
            index: 0,
        }
    }

    /// Create an RNG from OS entropy, for callers without their own
    /// seed source. Tests should use [`GameRng::new`] instead.
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::new(&seed, 0)
    }

    /// Get the next random byte, rehashing the state when the current
    /// block is spent.
    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            let mut hasher = Sha256::new();
            hasher.update(self.state);
            self.state = hasher.finalize().into();
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }

    /// Get a random u8 value.
    pub fn next_u8(&mut self) -> u8 {
        self.next_byte()
    }

    /// Get a random u64 value.
    pub fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        for byte in &mut bytes {
            *byte = self.next_byte();
        }
        u64::from_be_bytes(bytes)
    }

    /// Get a random f64 in `[0.0, 1.0)` with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Get a random value in `[0, max)` via rejection sampling.
    pub fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        let limit = u8::MAX - (u8::MAX % max);
        loop {
            let value = self.next_u8();
            if value < limit {
                return value % max;
            }
        }
    }

    /// Get a random value in `[0, max)` via rejection sampling.
    pub fn next_bounded_u64(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        let limit = u64::MAX - (u64::MAX % max);
        loop {
            let value = self.next_u64();
            if value < limit {
                return value % max;
            }
        }
    }

    /// Shuffle a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_bounded_u64((i + 1) as u64) as usize;
            slice.swap(i, j);
        }
    }

    /// Spin a European roulette wheel (0-36).
    pub fn spin_roulette(&mut self) -> u8 {
        self.next_bounded(37)
    }
}
