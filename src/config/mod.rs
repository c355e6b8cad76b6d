pub mod paths;
pub mod settings;

pub use settings::{PersistedSettings, SettingsStore};
