pub mod controller;
pub mod relay;
#[cfg(windows)]
pub mod runner;

pub use controller::{AppAction, AppController};
pub use relay::HotkeyRelay;
#[cfg(windows)]
pub use runner::AutoClickerApp;
