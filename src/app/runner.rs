use crate::app::{AppAction, AppController, HotkeyRelay};
use crate::clicker::ClickEngine;
use crate::config::{SettingsStore, paths};
use crate::core::ClickerResult;
use crate::input::Win32Injector;
use crate::menu::ConsoleMenu;
use crate::menu::screens::{DelayScreen, FrequencyScreen, HotkeyScreen};
use crate::window::{ConsoleWindow, ShellEvent, ShellThread, ensure_icon};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const INPUT_POLL: Duration = Duration::from_millis(50);

pub struct AutoClickerApp {
    controller: AppController,
    shell: ShellThread,
    relay: HotkeyRelay,
    shell_events: Receiver<ShellEvent>,
    console: Option<ConsoleWindow>,
}

impl AutoClickerApp {
    pub fn new() -> ClickerResult<Self> {
        let store = SettingsStore::new();
        let settings = store.load();

        let icon_path = paths::icon_path();
        if let Err(e) = ensure_icon(&icon_path) {
            warn!(error = %e, "icon unavailable, tray uses the stock icon");
        }

        let injector = Arc::new(Win32Injector::new());
        let (engine, engine_events) =
            ClickEngine::with_random_jitter(injector, settings.to_engine_config());

        let (shell, shell_events) = ShellThread::start(icon_path)?;

        let controller = AppController::new(engine, engine_events, store, settings);
        let (relay, shell_events) = HotkeyRelay::start(controller.shared_engine(), shell_events)?;

        Ok(Self {
            controller,
            shell,
            relay,
            shell_events,
            console: ConsoleWindow::attach(),
        })
    }

    pub fn run(&mut self) -> ClickerResult<()> {
        let slot = self.controller.settings().hotkey();
        self.controller
            .hotkey_registered(slot, self.shell.register_hotkey(slot));

        if self.controller.settings().stay_on_top {
            self.set_topmost(true);
        }

        info!(hotkey = %slot, "ready");

        let menu = ConsoleMenu::new()?;
        let result = self.event_loop(&menu);
        drop(menu);

        let shutdown = self.shutdown();
        result.and(shutdown)
    }

    fn event_loop(&mut self, menu: &ConsoleMenu) -> ClickerResult<()> {
        let mut redraw = true;

        loop {
            redraw |= self.controller.pump_engine_events();

            while let Ok(event) = self.shell_events.try_recv() {
                let action = self.controller.handle_shell_event(event)?;
                match self.perform(action)? {
                    Some(next) => redraw |= next,
                    None => return Ok(()),
                }
            }

            if redraw {
                menu.render(self.controller.state())?;
                redraw = false;
            }

            if let Some(command) = menu.poll_command(INPUT_POLL)? {
                let action = self.controller.handle_command(command)?;
                match self.perform(action)? {
                    Some(next) => redraw = next,
                    None => return Ok(()),
                }
            }
        }
    }

    /// `None` ends the event loop; otherwise whether to redraw.
    fn perform(&mut self, action: AppAction) -> ClickerResult<Option<bool>> {
        match action {
            AppAction::None => Ok(Some(false)),
            AppAction::Redraw => Ok(Some(true)),
            AppAction::PromptFrequency => {
                let current = self.controller.settings().frequency as u32;
                if let Some(frequency_hz) = FrequencyScreen::show(current)? {
                    self.controller.set_frequency(frequency_hz)?;
                }
                Ok(Some(true))
            }
            AppAction::PromptDelay => {
                let current = self.controller.settings().random_delay_value as u32;
                if let Some(magnitude_ms) = DelayScreen::show(current)? {
                    self.controller.set_delay(magnitude_ms)?;
                }
                Ok(Some(true))
            }
            AppAction::PromptHotkey => {
                let current = self.controller.settings().hotkey();
                if let Some(slot) = HotkeyScreen::show(current)? {
                    let result = self.shell.register_hotkey(slot);
                    self.controller.hotkey_registered(slot, result);
                }
                Ok(Some(true))
            }
            AppAction::SetTopmost(topmost) => {
                self.set_topmost(topmost);
                Ok(Some(true))
            }
            AppAction::MinimizeToTray => {
                self.shell.show_tray()?;
                if let Some(console) = &self.console {
                    console.hide();
                }
                self.controller.state_mut().minimized = true;
                Ok(Some(false))
            }
            AppAction::Restore => {
                if let Some(console) = &self.console {
                    console.restore();
                }
                self.shell.hide_tray()?;
                self.controller.state_mut().minimized = false;
                Ok(Some(true))
            }
            AppAction::Quit => Ok(None),
        }
    }

    fn set_topmost(&self, topmost: bool) {
        if let Some(console) = &self.console
            && let Err(e) = console.set_topmost(topmost)
        {
            warn!(error = %e, topmost, "failed to change stay-on-top");
        }
    }

    /// Engine first so the cursor is released, then the hotkey, tray and
    /// relay, then the final save.
    fn shutdown(&mut self) -> ClickerResult<()> {
        self.controller.dispose_engine()?;

        match self.shell.shutdown() {
            // The shell thread dropped its sender, so the relay drains and ends.
            Ok(()) => {
                if let Err(e) = self.relay.join() {
                    warn!(error = %e, "hotkey relay shutdown failed");
                }
            }
            Err(e) => warn!(error = %e, "shell shutdown failed"),
        }

        if let Some(console) = &self.console
            && self.controller.state().minimized
        {
            console.restore();
        }

        self.controller.shutdown()
    }
}
