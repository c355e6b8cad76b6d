use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use std::io::{self, Write};

pub struct ScreenUtils;

impl ScreenUtils {
    pub fn clear_console() {
        let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
    }

    pub fn home() -> io::Result<()> {
        execute!(io::stdout(), MoveTo(0, 0), Clear(ClearType::FromCursorDown))
    }

    pub fn read_input() -> io::Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input)
    }

    /// Line-mode prompt. Raw mode is suspended while the user types and
    /// restored afterwards if it was on.
    pub fn prompt(message: &str) -> io::Result<String> {
        let was_raw = terminal::is_raw_mode_enabled().unwrap_or(false);
        if was_raw {
            terminal::disable_raw_mode()?;
        }
        execute!(io::stdout(), Show)?;

        print!("{}", message);
        io::stdout().flush()?;
        let input = Self::read_input();

        execute!(io::stdout(), Hide)?;
        if was_raw {
            terminal::enable_raw_mode()?;
        }

        input
    }
}
