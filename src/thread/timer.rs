use crate::core::{ClickerError, ClickerResult};
use crate::thread::{PrecisionSleep, SyncSignal};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// Waits shorter than this are handled entirely by `PrecisionSleep`; longer
/// ones park on the condvar first.
const COARSE_WAIT_THRESHOLD: Duration = Duration::from_millis(25);
const COARSE_WAIT_MARGIN: Duration = Duration::from_millis(16);

/// Fixed-interval schedule on a dedicated thread.
///
/// The first tick runs immediately. Later deadlines advance by `interval`
/// from the previous deadline; a tick that overruns its slot pushes the next
/// deadline to "now" instead of queueing catch-up ticks. Ticks never overlap.
pub struct PeriodicTimer {
    signal: Arc<SyncSignal>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl PeriodicTimer {
    pub fn start<F>(name: &str, interval: Duration, tick: F) -> ClickerResult<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if interval.is_zero() {
            return Err(ClickerError::InvalidInput(
                "Timer interval must be greater than zero".to_string(),
            ));
        }

        let signal = Arc::new(SyncSignal::new());
        signal.start();

        let loop_signal = Arc::clone(&signal);
        let handle = Builder::new()
            .name(name.to_string())
            .spawn(move || {
                Self::run_loop(interval, &loop_signal, tick);
            })
            .map_err(|e| ClickerError::Thread(format!("Failed to spawn thread {}: {}", name, e)))?;

        debug!(name, interval_ms = interval.as_millis() as u64, "timer started");

        Ok(Self {
            signal,
            handle: Some(handle),
            interval,
        })
    }

    fn run_loop<F: FnMut()>(interval: Duration, signal: &SyncSignal, mut tick: F) {
        let mut deadline = Instant::now();

        loop {
            if signal.is_stopped() {
                break;
            }

            tick();

            deadline += interval;
            let now = Instant::now();
            if deadline < now {
                deadline = now;
            }

            if Self::wait_for(deadline, signal) {
                break;
            }
        }
    }

    fn wait_for(deadline: Instant, signal: &SyncSignal) -> bool {
        let remaining = deadline.saturating_duration_since(Instant::now());

        if remaining > COARSE_WAIT_THRESHOLD && signal.wait_until(deadline - COARSE_WAIT_MARGIN) {
            return true;
        }

        PrecisionSleep::sleep_until(deadline, || signal.is_stopped())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.signal.is_running()
    }

    /// True once the timer thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|handle| handle.is_finished())
    }

    /// Requests the schedule to end. Does not wait for an in-flight tick.
    pub fn cancel(&self) {
        self.signal.stop();
    }

    /// Cancels and waits for the timer thread, including any in-flight tick.
    pub fn join(mut self) -> ClickerResult<()> {
        self.cancel();

        if let Some(handle) = self.handle.take() {
            let name = handle.thread().name().unwrap_or("timer").to_string();
            handle
                .join()
                .map_err(|e| ClickerError::Thread(format!("Failed to join {}: {:?}", name, e)))?;
        }

        Ok(())
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.cancel();

        if self.handle.take().is_some() {
            debug!("timer detached, thread exits after its in-flight tick");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::thread;

    #[test]
    fn test_zero_interval_rejected() {
        let result = PeriodicTimer::start("ZeroTimer", Duration::ZERO, || {});
        assert!(matches!(result, Err(ClickerError::InvalidInput(_))));
    }

    #[test]
    fn test_first_tick_is_immediate() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);

        let timer = PeriodicTimer::start("ImmediateTimer", Duration::from_secs(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        thread::sleep(Duration::from_millis(100));
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        timer.join().unwrap();
    }

    #[test]
    fn test_ticks_repeat_at_interval() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);

        let timer = PeriodicTimer::start("RepeatTimer", Duration::from_millis(20), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        thread::sleep(Duration::from_millis(250));
        timer.join().unwrap();

        let count = ticks.load(Ordering::SeqCst);
        assert!(count >= 5, "expected at least 5 ticks, got {}", count);
        assert!(count <= 20, "expected at most 20 ticks, got {}", count);
    }

    #[test]
    fn test_join_stops_ticking() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);

        let timer = PeriodicTimer::start("JoinTimer", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        thread::sleep(Duration::from_millis(30));
        timer.join().unwrap();

        let after_join = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ticks.load(Ordering::SeqCst), after_join);
    }

    #[test]
    fn test_cancelled_timer_finishes() {
        let timer = PeriodicTimer::start("FinishTimer", Duration::from_millis(10), || {}).unwrap();
        assert!(timer.is_running());
        assert!(!timer.is_finished());

        timer.cancel();
        let started = Instant::now();
        while !timer.is_finished() && started.elapsed() < Duration::from_secs(2) {
            thread::sleep(Duration::from_millis(5));
        }

        assert!(!timer.is_running());
        assert!(timer.is_finished());
        timer.join().unwrap();
    }

    #[test]
    fn test_cancel_interrupts_long_wait() {
        let timer = PeriodicTimer::start("LongTimer", Duration::from_secs(30), || {}).unwrap();
        thread::sleep(Duration::from_millis(20));

        let started = Instant::now();
        timer.join().unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
