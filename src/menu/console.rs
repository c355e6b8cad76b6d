use crate::core::ClickerResult;
use crate::menu::commands::KEY_LEGEND;
use crate::menu::screens::ScreenUtils;
use crate::menu::state::{APP_AUTHOR, APP_LICENSE, APP_TITLE, APP_VERSION, DashboardState};
use crate::menu::{Align, DoubleMenu, MenuCommand, SingleMenu};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, SetTitle};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, warn};

const SCREEN_WIDTH: usize = 52;

/// Full-screen console dashboard. Owns raw mode for its lifetime.
pub struct ConsoleMenu {
    raw_mode: bool,
}

impl ConsoleMenu {
    pub fn new() -> ClickerResult<Self> {
        execute!(io::stdout(), SetTitle(APP_TITLE), Hide)?;

        let raw_mode = match terminal::enable_raw_mode() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "raw mode unavailable, keys need Enter");
                false
            }
        };

        ScreenUtils::clear_console();
        Ok(Self { raw_mode })
    }

    pub fn render(&self, state: &DashboardState) -> ClickerResult<()> {
        let screen = Self::compose(state)?;

        ScreenUtils::home()?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(screen.replace('\n', "\r\n").as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Waits up to `timeout` for a key that maps to a command.
    pub fn poll_command(&self, timeout: Duration) -> ClickerResult<Option<MenuCommand>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                let command = MenuCommand::from_key(key);
                if let Some(command) = command {
                    debug!(?command, "key command");
                }
                Ok(command)
            }
            _ => Ok(None),
        }
    }

    /// The dashboard as text, one `\n` per line.
    pub fn compose(state: &DashboardState) -> io::Result<String> {
        let mut menu = DoubleMenu::new(SCREEN_WIDTH)
            .header(APP_TITLE, Align::Center)?
            .box_start("Settings")?;

        for (label, value) in state.settings_rows() {
            menu = menu.field(label, &value)?;
        }

        let mut menu = menu
            .box_end()?
            .box_start("Status")?
            .line(&format!(" {}", state.status), Align::Left)?
            .line(&format!(" {}", state.clicks_label()), Align::Left)?;

        if let Some(notice) = &state.notice {
            menu = menu.divider()?.line(&format!(" {}", notice), Align::Left)?;
        }

        let top = menu
            .box_end()?
            .box_start("Information")?
            .field("Author", APP_AUTHOR)?
            .field("License", APP_LICENSE)?
            .field("Version", APP_VERSION)?
            .box_end()?
            .into_string();

        let mut legend = SingleMenu::new(SCREEN_WIDTH).box_start("Keys")?;
        for pair in KEY_LEGEND.chunks(2) {
            let cells = pair
                .iter()
                .map(|(keys, action)| format!("{:<8}{:<16}", keys, action))
                .collect::<Vec<_>>()
                .join(" ");
            legend = legend.line(&format!(" {}", cells), Align::Left)?;
        }

        Ok(format!("{}{}", top, legend.box_end()?.into_string()))
    }
}

impl Drop for ConsoleMenu {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
        let _ = execute!(io::stdout(), Show);
        ScreenUtils::clear_console();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::{ClickEvent, EngineEvent, STATUS_ACTIVE, StatusEvent};
    use crate::config::PersistedSettings;

    #[test]
    fn test_compose_shows_panels() {
        let mut state = DashboardState::new(PersistedSettings::default());
        state.apply(&EngineEvent::Status(StatusEvent::active()));
        state.apply(&EngineEvent::Click(ClickEvent { total_clicks: 7 }));

        let screen = ConsoleMenu::compose(&state).unwrap();

        assert!(screen.contains(APP_TITLE));
        assert!(screen.contains("Settings"));
        assert!(screen.contains("10 Hz"));
        assert!(screen.contains("F9"));
        assert!(screen.contains(STATUS_ACTIVE));
        assert!(screen.contains("Clicks: 7"));
        assert!(screen.contains("Information"));
        assert!(screen.contains(APP_VERSION));
    }

    #[test]
    fn test_compose_lines_fit_width() {
        let mut state = DashboardState::new(PersistedSettings::default());
        state.set_notice("Failed to register hotkey F9: in use");

        let screen = ConsoleMenu::compose(&state).unwrap();

        for line in screen.lines() {
            assert_eq!(line.chars().count(), SCREEN_WIDTH, "{:?}", line);
        }
        assert!(screen.contains("Failed to register hotkey F9"));
    }
}
