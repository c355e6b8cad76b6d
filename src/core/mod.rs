pub mod error;
pub mod types;

pub use error::{ClickerError, ClickerResult};
pub use types::{ClickerState, CursorPolicy, Point, Region};
