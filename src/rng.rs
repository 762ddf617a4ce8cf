//! Injectable randomness.
//!
//! Every engine call that consumes randomness takes a `&mut dyn RandomSource`.
//! Draws carry a short reason string; it is traced through `log` and, for a
//! [`ScriptedRng`], named in the panic when the script runs out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use uuid::{Builder, Uuid};

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self, reason: &str) -> f64;

    /// Uniform integer in `[low, high]`.
    fn int_inclusive(&mut self, low: u32, high: u32, reason: &str) -> u32;

    /// A fresh identity token for a newly created critter.
    fn identity(&mut self) -> Uuid;

    fn chance(&mut self, probability: f64, reason: &str) -> bool {
        self.unit(reason) < probability
    }

    fn coin_flip(&mut self, reason: &str) -> bool {
        self.unit(reason) < 0.5
    }

    /// Uniform index into a collection of `len` elements.
    fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let high = len.saturating_sub(1) as u32;
        self.int_inclusive(0, high, reason) as usize
    }

    /// Normal draw (Box-Muller over two unit draws).
    fn normal(&mut self, mean: f64, std_dev: f64, reason: &str) -> f64 {
        let radius_draw = 1.0 - self.unit(reason);
        let angle_draw = self.unit(reason);
        let z = (-2.0 * radius_draw.ln()).sqrt() * (2.0 * PI * angle_draw).cos();
        mean + std_dev * z
    }
}

/// Production source: a seeded `StdRng`, so a whole session replays from its
/// seed and the sequence of player actions.
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRng {
    fn unit(&mut self, reason: &str) -> f64 {
        let value: f64 = self.rng.random();
        log::trace!("[RNG] unit {:.4} for: {}", value, reason);
        value
    }

    fn int_inclusive(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        let value = if low >= high {
            low
        } else {
            self.rng.random_range(low..=high)
        };
        log::trace!("[RNG] int {} in [{}, {}] for: {}", value, low, high, reason);
        value
    }

    fn identity(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.random();
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Replays a fixed list of unit draws. Integer draws are derived from the next
/// unit value as `low + floor(u * (high - low + 1))`.
///
/// # Example
/// ```
/// use critter_adventure::rng::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(vec![0.0, 0.99]);
/// assert_eq!(rng.int_inclusive(1, 100, "accuracy"), 1);
/// assert_eq!(rng.int_inclusive(1, 100, "accuracy"), 100);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: Vec<f64>,
    index: usize,
    repeat_last: bool,
    identities: u128,
}

impl ScriptedRng {
    pub fn new(outcomes: Vec<f64>) -> Self {
        Self {
            outcomes,
            index: 0,
            repeat_last: false,
            identities: 0,
        }
    }

    /// Every draw returns `value`; never exhausts.
    pub fn constant(value: f64) -> Self {
        Self {
            outcomes: vec![value],
            index: 0,
            repeat_last: true,
            identities: 0,
        }
    }

    /// Draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len().saturating_sub(self.index)
    }

    fn next_value(&mut self, reason: &str) -> f64 {
        if self.repeat_last {
            self.index += 1;
            return self.outcomes[0];
        }
        if self.index >= self.outcomes.len() {
            panic!(
                "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];
        log::trace!("[RNG] Consumed {} for: {}", outcome, reason);
        self.index += 1;
        outcome
    }
}

impl RandomSource for ScriptedRng {
    fn unit(&mut self, reason: &str) -> f64 {
        self.next_value(reason)
    }

    fn int_inclusive(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        let draw = self.next_value(reason);
        if low >= high {
            return low;
        }
        let span = (high - low) as u64 + 1;
        let offset = ((draw * span as f64) as u64).min(span - 1);
        low + offset as u32
    }

    /// Sequential tokens; identity never consumes scripted draws.
    fn identity(&mut self) -> Uuid {
        self.identities += 1;
        Builder::from_random_bytes(self.identities.to_be_bytes()).into_uuid()
    }
}
