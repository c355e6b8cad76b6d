use thiserror::Error;

pub type ClickerResult<T> = Result<T, ClickerError>;

#[derive(Error, Debug)]
pub enum ClickerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Synchronization error: {0}")]
    Sync(String),

    #[error("Thread error: {0}")]
    Thread(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Failed to register hotkey {key}: {reason}")]
    Hotkey { key: String, reason: String },

    #[error("Icon error: {0}")]
    Icon(String),

    #[error("User requested exit")]
    UserExit,
}

impl ClickerError {
    pub fn hotkey(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Hotkey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform(message.into())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClickerError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Sync(format!("Mutex poisoned: {}", err))
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for ClickerError {
    fn from(err: windows::core::Error) -> Self {
        Self::Platform(err.to_string())
    }
}
