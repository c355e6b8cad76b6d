pub mod config;
pub mod engine;
pub mod events;
pub mod jitter;

pub use config::{
    DEFAULT_FREQUENCY_HZ, DEFAULT_JITTER_MS, EngineConfig, MAX_FREQUENCY_HZ, MAX_JITTER_MS,
    MIN_FREQUENCY_HZ, clamp_frequency, clamp_jitter, interval_ms,
};
pub use engine::{CLICK_BACKLOG_LIMIT, ClickEngine};
pub use events::{ClickEvent, EngineEvent, STATUS_ACTIVE, STATUS_READY, StatusEvent};
pub use jitter::{JitterPolicy, JitterSource, RandomJitter};
