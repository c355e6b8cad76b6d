use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    Stopped = 0,
    Running = 1,
}

impl From<u8> for WorkerState {
    fn from(val: u8) -> Self {
        match val {
            1 => Self::Running,
            _ => Self::Stopped,
        }
    }
}

/// Run/stop flag with a condvar so a waiting thread wakes as soon as it is
/// told to stop.
#[derive(Debug)]
pub struct SyncSignal {
    state: AtomicU8,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl Default for SyncSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncSignal {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(WorkerState::Stopped as u8),
            condvar: Condvar::new(),
            mutex: Mutex::new(()),
        }
    }

    pub fn state(&self) -> WorkerState {
        WorkerState::from(self.state.load(Ordering::Acquire))
    }

    pub fn set_state(&self, new_state: WorkerState) {
        // Store under the mutex so a waiter between its check and its wait
        // cannot miss the notification.
        let _guard = self.lock();
        self.state.store(new_state as u8, Ordering::Release);
        self.condvar.notify_all();
    }

    pub fn start(&self) {
        self.set_state(WorkerState::Running);
    }

    pub fn stop(&self) {
        self.set_state(WorkerState::Stopped);
    }

    pub fn is_running(&self) -> bool {
        self.state() == WorkerState::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == WorkerState::Stopped
    }

    /// Blocks until `deadline` or until stopped. Returns `true` when stopped.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        let guard = self.lock();

        if self.is_stopped() {
            return true;
        }

        let now = Instant::now();
        if deadline <= now {
            return false;
        }

        let _ = self
            .condvar
            .wait_timeout_while(guard, deadline - now, |_| !self.is_stopped());

        self.is_stopped()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutex
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_signal_is_stopped() {
        let signal = SyncSignal::new();
        assert!(signal.is_stopped());

        signal.start();
        assert!(signal.is_running());
    }

    #[test]
    fn test_wait_until_returns_false_at_deadline() {
        let signal = SyncSignal::new();
        signal.start();

        let started = Instant::now();
        let stopped = signal.wait_until(started + Duration::from_millis(30));

        assert!(!stopped);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_stop_wakes_waiter() {
        let signal = Arc::new(SyncSignal::new());
        signal.start();

        let waiter = Arc::clone(&signal);
        let handle = thread::spawn(move || {
            let started = Instant::now();
            let stopped = waiter.wait_until(started + Duration::from_secs(10));
            (stopped, started.elapsed())
        });

        thread::sleep(Duration::from_millis(20));
        signal.stop();

        let (stopped, elapsed) = handle.join().unwrap();
        assert!(stopped);
        assert!(elapsed < Duration::from_secs(5));
    }
}
