#[cfg(windows)]
pub mod console;
pub mod events;
#[cfg(windows)]
pub mod handle;
pub mod icon;
#[cfg(windows)]
pub mod tray;

#[cfg(windows)]
pub use console::ConsoleWindow;
pub use events::ShellEvent;
#[cfg(windows)]
pub use handle::WindowHandle;
pub use icon::ensure_icon;
#[cfg(windows)]
pub use tray::ShellThread;
