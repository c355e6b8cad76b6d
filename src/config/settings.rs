use crate::clicker::{
    DEFAULT_FREQUENCY_HZ, DEFAULT_JITTER_MS, EngineConfig, clamp_frequency, clamp_jitter,
};
use crate::config::paths;
use crate::core::{ClickerError, ClickerResult, CursorPolicy};
use crate::input::HotkeySlot;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// User preferences persisted between runs.
///
/// Every field is optional in the file. Names written by older builds in
/// PascalCase are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSettings {
    #[serde(alias = "Frequency")]
    pub frequency: i32,
    #[serde(alias = "HotkeyIndex")]
    pub hotkey_index: i32,
    #[serde(alias = "RandomDelay")]
    pub random_delay: bool,
    #[serde(alias = "RandomDelayValue")]
    pub random_delay_value: i32,
    #[serde(alias = "StayOnTop")]
    pub stay_on_top: bool,
    #[serde(alias = "CursorLock")]
    pub cursor_lock: bool,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY_HZ as i32,
            hotkey_index: HotkeySlot::DEFAULT.index() as i32,
            random_delay: false,
            random_delay_value: DEFAULT_JITTER_MS as i32,
            stay_on_top: false,
            cursor_lock: false,
        }
    }
}

impl PersistedSettings {
    /// Copy with every numeric field forced into its valid range.
    pub fn sanitized(self) -> Self {
        Self {
            frequency: clamp_frequency(self.frequency.max(0) as u32) as i32,
            hotkey_index: self.hotkey_index.clamp(0, HotkeySlot::COUNT as i32 - 1),
            random_delay_value: clamp_jitter(self.random_delay_value.max(0) as u32) as i32,
            ..self
        }
    }

    pub fn hotkey(&self) -> HotkeySlot {
        HotkeySlot::from_index_or_default(self.hotkey_index as i64)
    }

    pub fn set_hotkey(&mut self, slot: HotkeySlot) {
        self.hotkey_index = slot.index() as i32;
    }

    pub fn cursor_policy(&self) -> CursorPolicy {
        CursorPolicy::from_lock(self.cursor_lock)
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            frequency_hz: self.frequency.max(0) as u32,
            jitter_enabled: self.random_delay,
            jitter_magnitude_ms: self.random_delay_value.max(0) as u32,
            cursor_policy: self.cursor_policy(),
        }
        .clamped()
    }
}

/// Reads and writes [`PersistedSettings`] as JSON at a fixed path.
pub struct SettingsStore {
    settings_path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::new_with_path(paths::settings_path())
    }

    pub fn new_with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Never fails: a missing or unreadable file yields defaults.
    pub fn load(&self) -> PersistedSettings {
        match self.try_load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %self.settings_path.display(), error = %e, "using default settings");
                PersistedSettings::default()
            }
        }
    }

    pub fn try_load(&self) -> ClickerResult<PersistedSettings> {
        if !self.settings_path.exists() {
            debug!(path = %self.settings_path.display(), "no settings file");
            return Ok(PersistedSettings::default());
        }

        let mut file = OpenOptions::new().read(true).open(&self.settings_path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        drop(file);

        match serde_json::from_str::<PersistedSettings>(&contents) {
            Ok(settings) => {
                let settings = settings.sanitized();
                info!(
                    frequency = settings.frequency,
                    hotkey = %settings.hotkey(),
                    "settings loaded"
                );
                Ok(settings)
            }
            Err(e) => {
                warn!(error = %e, "settings file corrupted");
                self.backup_corrupted_file()?;
                Ok(PersistedSettings::default())
            }
        }
    }

    fn backup_corrupted_file(&self) -> ClickerResult<PathBuf> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let backup_path = self
            .settings_path
            .with_extension(format!("json.corrupt.{}", timestamp));

        std::fs::rename(&self.settings_path, &backup_path).map_err(|e| {
            ClickerError::Config(format!("Failed to backup corrupted settings: {}", e))
        })?;

        info!(backup = %backup_path.display(), "corrupted settings moved aside");
        Ok(backup_path)
    }

    /// Never fails: errors are logged and the in-memory settings stay
    /// authoritative.
    pub fn save(&self, settings: &PersistedSettings) {
        if let Err(e) = self.try_save(settings) {
            warn!(path = %self.settings_path.display(), error = %e, "failed to save settings");
        }
    }

    pub fn try_save(&self, settings: &PersistedSettings) -> ClickerResult<()> {
        if let Some(dir) = self.settings_path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            std::fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(settings)?;

        let temp_path = self.settings_path.with_extension("tmp");
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &self.settings_path)?;
        debug!(path = %self.settings_path.display(), "settings saved");
        Ok(())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
