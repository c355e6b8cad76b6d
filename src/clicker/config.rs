use crate::core::CursorPolicy;
use std::time::Duration;

pub const MIN_FREQUENCY_HZ: u32 = 1;
pub const MAX_FREQUENCY_HZ: u32 = 1000;
pub const MAX_JITTER_MS: u32 = 1000;

pub const DEFAULT_FREQUENCY_HZ: u32 = 10;
pub const DEFAULT_JITTER_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub frequency_hz: u32,
    pub jitter_enabled: bool,
    pub jitter_magnitude_ms: u32,
    pub cursor_policy: CursorPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            jitter_enabled: false,
            jitter_magnitude_ms: DEFAULT_JITTER_MS,
            cursor_policy: CursorPolicy::LivePosition,
        }
    }
}

impl EngineConfig {
    /// Copy with every field forced into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            frequency_hz: clamp_frequency(self.frequency_hz),
            jitter_magnitude_ms: clamp_jitter(self.jitter_magnitude_ms),
            ..self
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(interval_ms(self.frequency_hz))
    }
}

pub fn clamp_frequency(frequency_hz: u32) -> u32 {
    frequency_hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
}

pub fn clamp_jitter(magnitude_ms: u32) -> u32 {
    magnitude_ms.min(MAX_JITTER_MS)
}

/// Truncating `1000 / frequency`. The frequency is clamped first so the
/// result always lies in 1..=1000 and division by zero cannot happen.
pub fn interval_ms(frequency_hz: u32) -> u64 {
    1000 / clamp_frequency(frequency_hz) as u64
}
