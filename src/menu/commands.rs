use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    ToggleClicking,
    AdjustFrequency(i32),
    EnterFrequency,
    SelectHotkey,
    ToggleRandomDelay,
    EnterDelay,
    ToggleCursorLock,
    ToggleStayOnTop,
    ResetCounter,
    MinimizeToTray,
    Exit,
}

impl MenuCommand {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Some(Self::Exit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(Self::Exit),
            KeyCode::Char(c) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            ' ' | 's' => Some(Self::ToggleClicking),
            '+' | '=' => Some(Self::AdjustFrequency(1)),
            '-' | '_' => Some(Self::AdjustFrequency(-1)),
            ']' => Some(Self::AdjustFrequency(10)),
            '[' => Some(Self::AdjustFrequency(-10)),
            'f' => Some(Self::EnterFrequency),
            'h' => Some(Self::SelectHotkey),
            'j' => Some(Self::ToggleRandomDelay),
            'd' => Some(Self::EnterDelay),
            'l' => Some(Self::ToggleCursorLock),
            't' => Some(Self::ToggleStayOnTop),
            'r' => Some(Self::ResetCounter),
            'm' => Some(Self::MinimizeToTray),
            'q' => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Key legend shown under the dashboard panels.
pub const KEY_LEGEND: [(&str, &str); 12] = [
    ("Space/S", "Start / stop"),
    ("+ / -", "Frequency +/-1"),
    ("] / [", "Frequency +/-10"),
    ("F", "Type frequency"),
    ("H", "Choose hotkey"),
    ("J", "Random delay"),
    ("D", "Type delay"),
    ("L", "Cursor lock"),
    ("T", "Stay on top"),
    ("R", "Reset counter"),
    ("M", "Minimize to tray"),
    ("Q/Esc", "Quit"),
];
