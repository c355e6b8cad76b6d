use std::path::PathBuf;

pub const APP_DIR_NAME: &str = "AutoClicker";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const ICON_FILE_NAME: &str = "icon.ico";
pub const LOG_FILE_NAME: &str = "autoclicker.log";

/// Directory holding settings and the icon: next to the executable, or the
/// per-user config directory when that cannot be determined.
pub fn app_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(fallback_dir)
}

pub fn fallback_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

pub fn settings_path() -> PathBuf {
    app_dir().join(SETTINGS_FILE_NAME)
}

pub fn icon_path() -> PathBuf {
    app_dir().join(ICON_FILE_NAME)
}

pub fn log_dir() -> PathBuf {
    fallback_dir().join("logs")
}
