pub mod prompts;
pub mod utils;

pub use prompts::{DelayScreen, FrequencyScreen, HotkeyScreen};
pub use utils::ScreenUtils;
