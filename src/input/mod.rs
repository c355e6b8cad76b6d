pub mod hotkey;
pub mod injector;
#[cfg(windows)]
pub mod win32;

pub use hotkey::HotkeySlot;
#[cfg(windows)]
pub use hotkey::HotkeyBridge;
pub use injector::InputInjector;
#[cfg(windows)]
pub use win32::Win32Injector;
