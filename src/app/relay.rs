use crate::clicker::ClickEngine;
use crate::core::{ClickerError, ClickerResult};
use crate::window::ShellEvent;
use crossbeam_channel::{Receiver, unbounded};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};
use tracing::{debug, warn};

const RELAY_THREAD_NAME: &str = "HotkeyRelay";

/// Toggles the engine on hotkey presses off the UI thread, so the hotkey
/// keeps working while the dashboard is blocked in a prompt. Every other
/// shell event is forwarded to the UI unchanged.
///
/// The thread ends when the shell side of `shell_events` is dropped.
pub struct HotkeyRelay {
    handle: Option<JoinHandle<()>>,
}

impl HotkeyRelay {
    pub fn start(
        engine: Arc<ClickEngine>,
        shell_events: Receiver<ShellEvent>,
    ) -> ClickerResult<(Self, Receiver<ShellEvent>)> {
        let (forward_tx, forward_rx) = unbounded();

        let handle = Builder::new()
            .name(RELAY_THREAD_NAME.to_string())
            .spawn(move || {
                for event in shell_events.iter() {
                    match event {
                        ShellEvent::HotkeyPressed => {
                            debug!("hotkey pressed");
                            if let Err(e) = engine.toggle() {
                                warn!(error = %e, "hotkey toggle failed");
                            }
                        }
                        other => {
                            if forward_tx.send(other).is_err() {
                                break;
                            }
                        }
                    }
                }
                debug!("hotkey relay stopped");
            })
            .map_err(|e| ClickerError::Thread(format!("Failed to spawn hotkey relay: {}", e)))?;

        Ok((
            Self {
                handle: Some(handle),
            },
            forward_rx,
        ))
    }

    /// Waits for the relay to finish. Only returns once the shell has
    /// dropped its sender.
    pub fn join(&mut self) -> ClickerResult<()> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|e| ClickerError::Thread(format!("Failed to join hotkey relay: {:?}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::{EngineConfig, RandomJitter};
    use crate::core::{Point, Region};
    use crate::input::InputInjector;
    use std::time::{Duration, Instant};

    struct NullInjector;

    impl InputInjector for NullInjector {
        fn cursor_position(&self) -> Point {
            Point::default()
        }

        fn set_cursor_position(&self, _position: Point) {}

        fn click(&self, _at: Point) {}

        fn confine_cursor(&self, _region: Option<Region>) {}
    }

    fn wait_until(condition: impl Fn() -> bool) -> bool {
        let started = Instant::now();
        while started.elapsed() < Duration::from_secs(1) {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        condition()
    }

    #[test]
    fn test_hotkey_toggles_without_ui_thread() {
        // The engine's own event receiver is never read, as during a prompt.
        let (engine, _engine_events) = ClickEngine::new(
            Arc::new(NullInjector),
            Box::new(RandomJitter::seeded(4)),
            EngineConfig::default(),
        );
        let engine = Arc::new(engine);
        let (shell_tx, shell_rx) = unbounded();
        let (mut relay, forwarded) = HotkeyRelay::start(Arc::clone(&engine), shell_rx).unwrap();

        shell_tx.send(ShellEvent::HotkeyPressed).unwrap();
        assert!(wait_until(|| engine.is_running()));

        shell_tx.send(ShellEvent::HotkeyPressed).unwrap();
        assert!(wait_until(|| !engine.is_running()));

        assert!(forwarded.try_recv().is_err());

        drop(shell_tx);
        relay.join().unwrap();
    }

    #[test]
    fn test_other_events_are_forwarded() {
        let (engine, _engine_events) = ClickEngine::new(
            Arc::new(NullInjector),
            Box::new(RandomJitter::seeded(5)),
            EngineConfig::default(),
        );
        let (shell_tx, shell_rx) = unbounded();
        let (mut relay, forwarded) = HotkeyRelay::start(Arc::new(engine), shell_rx).unwrap();

        shell_tx.send(ShellEvent::RestoreRequested).unwrap();
        shell_tx.send(ShellEvent::ExitRequested).unwrap();
        drop(shell_tx);
        relay.join().unwrap();

        let events: Vec<ShellEvent> = forwarded.try_iter().collect();
        assert_eq!(
            events,
            vec![ShellEvent::RestoreRequested, ShellEvent::ExitRequested]
        );
    }
}
