use crate::clicker::{EngineEvent, STATUS_READY, clamp_frequency};
use crate::config::PersistedSettings;
use crate::input::HotkeySlot;

pub const APP_TITLE: &str = "AutoClicker Pro";
pub const APP_AUTHOR: &str = "LT";
pub const APP_LICENSE: &str = "MIT License";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything the dashboard shows. Owned by the UI thread; engine events are
/// folded in with [`DashboardState::apply`].
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub settings: PersistedSettings,
    pub status: String,
    pub active: bool,
    pub clicks: u64,
    pub notice: Option<String>,
    pub minimized: bool,
}

impl DashboardState {
    pub fn new(settings: PersistedSettings) -> Self {
        Self {
            settings,
            status: STATUS_READY.to_string(),
            active: false,
            clicks: 0,
            notice: None,
            minimized: false,
        }
    }

    /// Returns true when something visible changed.
    pub fn apply(&mut self, event: &EngineEvent) -> bool {
        match event {
            EngineEvent::Status(status) => {
                let changed = self.active != status.active || self.status != status.message;
                self.status.clone_from(&status.message);
                self.active = status.active;
                changed
            }
            EngineEvent::Click(click) => {
                let changed = self.clicks != click.total_clicks;
                self.clicks = click.total_clicks;
                changed
            }
        }
    }

    /// Steps the frequency, staying within range. Returns the new value.
    pub fn step_frequency(&mut self, delta: i32) -> u32 {
        let next = (self.settings.frequency as i64 + delta as i64).max(0) as u32;
        self.set_frequency(next)
    }

    pub fn set_frequency(&mut self, frequency_hz: u32) -> u32 {
        let frequency_hz = clamp_frequency(frequency_hz);
        self.settings.frequency = frequency_hz as i32;
        frequency_hz
    }

    pub fn hotkey(&self) -> HotkeySlot {
        self.settings.hotkey()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn frequency_label(&self) -> String {
        format!("{} Hz", self.settings.frequency)
    }

    pub fn delay_label(&self) -> String {
        if self.settings.random_delay {
            format!("On (0-{} ms)", self.settings.random_delay_value)
        } else {
            "Off".to_string()
        }
    }

    pub fn clicks_label(&self) -> String {
        format!("Clicks: {}", self.clicks)
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "On" } else { "Off" }
}

impl DashboardState {
    pub fn settings_rows(&self) -> [(&'static str, String); 5] {
        [
            ("Frequency", self.frequency_label()),
            ("Hotkey", self.hotkey().name()),
            ("Random delay", self.delay_label()),
            ("Cursor", self.settings.cursor_policy().to_string()),
            ("Stay on top", on_off(self.settings.stay_on_top).to_string()),
        ]
    }
}
