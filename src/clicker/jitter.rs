//! Random pre-click delay.
//!
//! A draw `d` is taken uniformly from `[-m, m]` and only positive draws
//! delay the click, so the realized delay is zero with probability
//! `(m + 1) / (2m + 1)` and otherwise uniform over `1..=m` milliseconds.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Source of uniform integer draws from `[-magnitude, magnitude]`.
pub trait JitterSource: Send {
    fn draw(&mut self, magnitude_ms: u32) -> i64;
}

pub struct RandomJitter {
    rng: SmallRng,
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomJitter {
    pub fn new() -> Self {
        let mut thread_rng = rand::rng();
        Self {
            rng: SmallRng::from_rng(&mut thread_rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for RandomJitter {
    fn draw(&mut self, magnitude_ms: u32) -> i64 {
        let magnitude = magnitude_ms as i64;
        self.rng.random_range(-magnitude..=magnitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterPolicy {
    pub enabled: bool,
    pub magnitude_ms: u32,
}

impl JitterPolicy {
    pub fn new(enabled: bool, magnitude_ms: u32) -> Self {
        Self {
            enabled,
            magnitude_ms,
        }
    }

    /// Folds a draw at zero.
    pub fn delay_for(draw: i64) -> Duration {
        if draw > 0 {
            Duration::from_millis(draw as u64)
        } else {
            Duration::ZERO
        }
    }

    pub fn next_delay(&self, source: &mut dyn JitterSource) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }

        Self::delay_for(source.draw(self.magnitude_ms))
    }
}
