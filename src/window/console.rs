use crate::core::ClickerResult;
use tracing::{debug, warn};
use windows::Win32::Foundation::HWND;
use windows::Win32::System::Console::GetConsoleWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    HWND_NOTOPMOST, HWND_TOPMOST, SW_HIDE, SW_RESTORE, SWP_NOMOVE, SWP_NOSIZE, SetForegroundWindow,
    SetWindowPos, ShowWindow,
};

/// The console window hosting the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleWindow {
    hwnd: HWND,
}

impl ConsoleWindow {
    pub fn attach() -> Option<Self> {
        let hwnd = unsafe { GetConsoleWindow() };

        if hwnd.is_invalid() {
            warn!("process has no console window");
            None
        } else {
            Some(Self { hwnd })
        }
    }

    pub fn hide(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
        debug!("console hidden");
    }

    pub fn restore(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_RESTORE);
            let _ = SetForegroundWindow(self.hwnd);
        }
        debug!("console restored");
    }

    pub fn set_topmost(&self, topmost: bool) -> ClickerResult<()> {
        let insert_after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };

        unsafe {
            SetWindowPos(
                self.hwnd,
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE,
            )?;
        }

        debug!(topmost, "console z-order updated");
        Ok(())
    }
}
