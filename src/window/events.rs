/// Notification from the tray/hotkey message thread to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    HotkeyPressed,
    RestoreRequested,
    ExitRequested,
}

/// Tray menu command identifiers.
pub const MENU_SHOW: usize = 1;
pub const MENU_EXIT: usize = 2;

pub fn menu_command(id: usize) -> Option<ShellEvent> {
    match id {
        MENU_SHOW => Some(ShellEvent::RestoreRequested),
        MENU_EXIT => Some(ShellEvent::ExitRequested),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_commands() {
        assert_eq!(menu_command(MENU_SHOW), Some(ShellEvent::RestoreRequested));
        assert_eq!(menu_command(MENU_EXIT), Some(ShellEvent::ExitRequested));
        assert_eq!(menu_command(0), None);
    }
}
