use crate::core::{ClickerError, ClickerResult};
use std::ffi::c_void;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::PostMessageW;

/// The shell window as seen from other threads. The owning thread publishes
/// it once the window exists and retracts it before the window is destroyed;
/// everyone else may only post to it.
#[derive(Debug, Default)]
pub struct WindowHandle {
    hwnd: AtomicPtr<c_void>,
}

impl WindowHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, hwnd: HWND) {
        self.hwnd.store(hwnd.0, Ordering::Release);
    }

    pub fn retract(&self) {
        self.hwnd.store(ptr::null_mut(), Ordering::Release);
    }

    /// Queues `message` for the owning thread without waiting for it.
    pub fn post(&self, message: u32, wparam: WPARAM) -> ClickerResult<()> {
        let raw = self.hwnd.load(Ordering::Acquire);
        if raw.is_null() {
            return Err(ClickerError::platform("Shell window is not available"));
        }

        unsafe { PostMessageW(Some(HWND(raw)), message, wparam, LPARAM(0)) }?;
        Ok(())
    }
}
