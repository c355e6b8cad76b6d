use crate::clicker::{ClickEngine, EngineEvent};
use crate::config::{PersistedSettings, SettingsStore};
use crate::core::{ClickerResult, CursorPolicy};
use crate::input::HotkeySlot;
use crate::menu::{DashboardState, MenuCommand};
use crate::window::ShellEvent;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use tracing::{info, warn};

/// What the platform layer has to do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Redraw,
    PromptFrequency,
    PromptDelay,
    PromptHotkey,
    SetTopmost(bool),
    MinimizeToTray,
    Restore,
    Quit,
}

/// Applies user intent to the engine, the dashboard state and the settings
/// file. Everything here runs on the UI thread.
pub struct AppController {
    engine: Arc<ClickEngine>,
    events: Receiver<EngineEvent>,
    store: SettingsStore,
    state: DashboardState,
}

impl AppController {
    pub fn new(
        engine: ClickEngine,
        events: Receiver<EngineEvent>,
        store: SettingsStore,
        settings: PersistedSettings,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            events,
            store,
            state: DashboardState::new(settings),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub fn engine(&self) -> &ClickEngine {
        &self.engine
    }

    /// A handle for threads that drive the engine directly.
    pub fn shared_engine(&self) -> Arc<ClickEngine> {
        Arc::clone(&self.engine)
    }

    pub fn settings(&self) -> &PersistedSettings {
        &self.state.settings
    }

    /// Folds pending engine notifications into the dashboard. Returns true
    /// when a redraw is needed.
    pub fn pump_engine_events(&mut self) -> bool {
        let mut changed = false;

        while let Ok(event) = self.events.try_recv() {
            changed |= self.state.apply(&event);
        }

        changed
    }

    pub fn handle_command(&mut self, command: MenuCommand) -> ClickerResult<AppAction> {
        let action = match command {
            MenuCommand::ToggleClicking => {
                self.engine.toggle()?;
                AppAction::Redraw
            }
            MenuCommand::AdjustFrequency(delta) => {
                let frequency_hz = self.state.step_frequency(delta);
                self.apply_frequency(frequency_hz)?
            }
            MenuCommand::EnterFrequency => AppAction::PromptFrequency,
            MenuCommand::SelectHotkey => AppAction::PromptHotkey,
            MenuCommand::ToggleRandomDelay => {
                let enabled = !self.state.settings.random_delay;
                self.state.settings.random_delay = enabled;
                self.apply_jitter()?
            }
            MenuCommand::EnterDelay => AppAction::PromptDelay,
            MenuCommand::ToggleCursorLock => {
                let locked = !self.state.settings.cursor_lock;
                self.state.settings.cursor_lock = locked;
                self.engine
                    .set_cursor_policy(CursorPolicy::from_lock(locked))?;
                self.persist();
                AppAction::Redraw
            }
            MenuCommand::ToggleStayOnTop => {
                let topmost = !self.state.settings.stay_on_top;
                self.state.settings.stay_on_top = topmost;
                self.persist();
                AppAction::SetTopmost(topmost)
            }
            MenuCommand::ResetCounter => {
                self.engine.reset_counter();
                AppAction::Redraw
            }
            MenuCommand::MinimizeToTray => AppAction::MinimizeToTray,
            MenuCommand::Exit => AppAction::Quit,
        };

        Ok(action)
    }

    pub fn handle_shell_event(&mut self, event: ShellEvent) -> ClickerResult<AppAction> {
        match event {
            // Normally consumed by the hotkey relay before it gets here.
            ShellEvent::HotkeyPressed => {
                self.engine.toggle()?;
                Ok(AppAction::Redraw)
            }
            ShellEvent::RestoreRequested => Ok(AppAction::Restore),
            ShellEvent::ExitRequested => Ok(AppAction::Quit),
        }
    }

    pub fn set_frequency(&mut self, frequency_hz: u32) -> ClickerResult<AppAction> {
        let frequency_hz = self.state.set_frequency(frequency_hz);
        self.apply_frequency(frequency_hz)
    }

    pub fn set_delay(&mut self, magnitude_ms: u32) -> ClickerResult<AppAction> {
        self.state.settings.random_delay_value = magnitude_ms as i32;
        self.state.settings = self.state.settings.clone().sanitized();
        self.apply_jitter()
    }

    /// Records the outcome of binding `slot` as the global hotkey. The slot
    /// is kept even on failure so the user sees and can change it.
    pub fn hotkey_registered(&mut self, slot: HotkeySlot, result: ClickerResult<()>) {
        self.state.settings.set_hotkey(slot);
        self.persist();

        match result {
            Ok(()) => self.state.clear_notice(),
            Err(e) => {
                warn!(hotkey = %slot, error = %e, "hotkey unavailable");
                self.state.set_notice(e.to_string());
            }
        }
    }

    pub fn persist(&self) {
        self.store.save(&self.state.settings);
    }

    /// Stops clicking, releases the cursor and joins the schedule.
    pub fn dispose_engine(&self) -> ClickerResult<()> {
        self.engine.dispose()
    }

    pub fn shutdown(&mut self) -> ClickerResult<()> {
        self.dispose_engine()?;
        self.persist();
        info!(clicks = self.engine.click_count(), "application shut down");
        Ok(())
    }

    fn apply_frequency(&mut self, frequency_hz: u32) -> ClickerResult<AppAction> {
        self.engine.set_frequency(frequency_hz)?;
        self.persist();
        Ok(AppAction::Redraw)
    }

    fn apply_jitter(&mut self) -> ClickerResult<AppAction> {
        let settings = &self.state.settings;
        self.engine
            .set_jitter(settings.random_delay, settings.random_delay_value.max(0) as u32)?;
        self.persist();
        Ok(AppAction::Redraw)
    }
}
