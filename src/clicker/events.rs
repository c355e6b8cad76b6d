pub const STATUS_ACTIVE: &str = "Status: Clicking Active (Use hotkey to stop)";
pub const STATUS_READY: &str = "Status: Ready (Use hotkey to start)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub message: String,
    pub active: bool,
}

impl StatusEvent {
    pub fn active() -> Self {
        Self {
            message: STATUS_ACTIVE.to_string(),
            active: true,
        }
    }

    pub fn ready() -> Self {
        Self {
            message: STATUS_READY.to_string(),
            active: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub total_clicks: u64,
}

/// Notification sent from the engine to whoever renders its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Status(StatusEvent),
    Click(ClickEvent),
}
