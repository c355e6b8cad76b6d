pub mod commands;
pub mod console;
pub mod layout;
pub mod screens;
pub mod state;

pub use commands::MenuCommand;
pub use console::ConsoleMenu;
pub use layout::{Align, BoxDrawing, DoubleBox, DoubleMenu, LayoutEngine, SingleBox, SingleMenu};
pub use state::DashboardState;
