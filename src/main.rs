use autoclicker::{ClickerError, ClickerResult, logging};

#[cfg(windows)]
fn run() -> ClickerResult<()> {
    let mut app = autoclicker::AutoClickerApp::new()?;

    match app.run() {
        Ok(()) | Err(ClickerError::UserExit) => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(not(windows))]
fn run() -> ClickerResult<()> {
    Err(ClickerError::platform(
        "Input injection, global hotkeys and the tray icon require Windows",
    ))
}

fn main() {
    logging::setup();

    if let Err(e) = run() {
        tracing::error!(error = %e, "autoclicker exited with an error");
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}
