pub mod app;
pub mod clicker;
pub mod config;
pub mod core;
pub mod input;
pub mod logging;
pub mod menu;
pub mod thread;
pub mod window;

pub use core::{ClickerError, ClickerResult, ClickerState, CursorPolicy, Point, Region};

pub use config::{PersistedSettings, SettingsStore};

pub use thread::{PeriodicTimer, PrecisionSleep, SyncSignal, WorkerState};

pub use clicker::{
    ClickEngine, ClickEvent, EngineConfig, EngineEvent, JitterPolicy, JitterSource, RandomJitter,
    StatusEvent,
};

pub use input::{HotkeySlot, InputInjector};

pub use window::ShellEvent;

pub use menu::{ConsoleMenu, DashboardState, MenuCommand};

pub use app::{AppAction, AppController, HotkeyRelay};

#[cfg(windows)]
pub use app::AutoClickerApp;
