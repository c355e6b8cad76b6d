use crate::core::{ClickerError, ClickerResult};
use std::fmt;

const VK_F1: u32 = 0x70;

/// One of the twelve function keys usable as the global toggle.
///
/// The index is what gets persisted (`0` is F1, `11` is F12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeySlot(u8);

impl HotkeySlot {
    pub const COUNT: u8 = 12;
    pub const DEFAULT: Self = Self(8);

    pub fn new(index: u8) -> ClickerResult<Self> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(ClickerError::InvalidInput(format!(
                "Hotkey index {} out of range 0..{}",
                index,
                Self::COUNT
            )))
        }
    }

    /// Out-of-range indices fall back to [`HotkeySlot::DEFAULT`].
    pub fn from_index_or_default(index: i64) -> Self {
        u8::try_from(index)
            .ok()
            .and_then(|index| Self::new(index).ok())
            .unwrap_or(Self::DEFAULT)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn vk_code(self) -> u32 {
        VK_F1 + self.0 as u32
    }

    pub fn name(self) -> String {
        format!("F{}", self.0 + 1)
    }

    /// Parses `"F1"`..`"F12"`, case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let number = text
            .strip_prefix('F')
            .or_else(|| text.strip_prefix('f'))?
            .parse::<u8>()
            .ok()?;

        number.checked_sub(1).and_then(|index| Self::new(index).ok())
    }
}

impl Default for HotkeySlot {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for HotkeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0 + 1)
    }
}

#[cfg(windows)]
pub use bridge::HotkeyBridge;

#[cfg(windows)]
mod bridge {
    use super::HotkeySlot;
    use crate::core::{ClickerError, ClickerResult};
    use tracing::{debug, info, warn};
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        MOD_NOREPEAT, RegisterHotKey, UnregisterHotKey,
    };

    /// System-wide hotkey binding on a window owned by the calling thread.
    ///
    /// Must be used from the thread that created `hwnd`; `WM_HOTKEY` is posted
    /// to that thread's queue with `wParam == id`.
    pub struct HotkeyBridge {
        hwnd: HWND,
        id: i32,
        registered: Option<HotkeySlot>,
    }

    impl HotkeyBridge {
        pub fn new(hwnd: HWND, id: i32) -> Self {
            Self {
                hwnd,
                id,
                registered: None,
            }
        }

        pub fn id(&self) -> i32 {
            self.id
        }

        pub fn registered(&self) -> Option<HotkeySlot> {
            self.registered
        }

        /// Replaces the current binding. On failure nothing stays registered.
        pub fn register(&mut self, slot: HotkeySlot) -> ClickerResult<()> {
            self.unregister();

            unsafe { RegisterHotKey(Some(self.hwnd), self.id, MOD_NOREPEAT, slot.vk_code()) }
                .map_err(|e| {
                    warn!(hotkey = %slot, error = %e, "hotkey registration failed");
                    ClickerError::hotkey(slot.name(), e.message())
                })?;

            self.registered = Some(slot);
            info!(hotkey = %slot, "hotkey registered");
            Ok(())
        }

        pub fn unregister(&mut self) {
            if let Some(slot) = self.registered.take() {
                match unsafe { UnregisterHotKey(Some(self.hwnd), self.id) } {
                    Ok(()) => debug!(hotkey = %slot, "hotkey unregistered"),
                    Err(e) => warn!(hotkey = %slot, error = %e, "failed to unregister hotkey"),
                }
            }
        }
    }

    impl Drop for HotkeyBridge {
        fn drop(&mut self) {
            self.unregister();
        }
    }
}
