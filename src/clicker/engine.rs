use crate::clicker::config::{clamp_frequency, clamp_jitter};
use crate::clicker::{
    ClickEvent, EngineConfig, EngineEvent, JitterPolicy, JitterSource, RandomJitter, StatusEvent,
};
use crate::core::{ClickerError, ClickerResult, ClickerState, CursorPolicy, Point, Region};
use crate::input::InputInjector;
use crate::thread::{PeriodicTimer, PrecisionSleep};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

const TIMER_THREAD_NAME: &str = "ClickEngineTimer";

/// Click notifications are dropped while this many events sit unread. The
/// next delivered one carries the current total, and `stop()` sends a final
/// total if any were dropped.
pub const CLICK_BACKLOG_LIMIT: usize = 64;

/// State shared between the engine handle and its timer thread.
struct EngineShared {
    state: AtomicU8,
    epoch: AtomicU64,
    click_count: AtomicU64,
    clicks_dropped: AtomicBool,
    config: Mutex<EngineConfig>,
    locked_position: Mutex<Option<Point>>,
    jitter: Mutex<Box<dyn JitterSource>>,
    tick_lock: Mutex<()>,
    injector: Arc<dyn InputInjector>,
    events: Sender<EngineEvent>,
}

impl EngineShared {
    fn state(&self) -> ClickerState {
        ClickerState::from(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ClickerState) {
        self.state.store(state as u8, Ordering::Release);
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.state() == ClickerState::Active && self.epoch.load(Ordering::Acquire) == epoch
    }

    fn emit(&self, event: EngineEvent) {
        // A closed receiver means the shell is gone; the engine keeps going.
        let _ = self.events.send(event);
    }

    fn emit_click(&self, total_clicks: u64) {
        if self.events.len() >= CLICK_BACKLOG_LIMIT {
            self.clicks_dropped.store(true, Ordering::Release);
            return;
        }
        self.emit(EngineEvent::Click(ClickEvent { total_clicks }));
    }

    /// Delivers the current total if earlier click notifications were
    /// dropped. Callers hold `tick_lock`.
    fn flush_dropped_clicks(&self) {
        if self.clicks_dropped.swap(false, Ordering::AcqRel) {
            let total_clicks = self.click_count.load(Ordering::Acquire);
            self.emit(EngineEvent::Click(ClickEvent { total_clicks }));
        }
    }

    fn config(&self) -> EngineConfig {
        *lock_or_recover(&self.config)
    }

    fn locked_position(&self) -> Option<Point> {
        *lock_or_recover(&self.locked_position)
    }

    fn perform_click(&self, epoch: u64) {
        if !self.is_current(epoch) {
            return;
        }

        let config = self.config();
        let locked = self.locked_position();
        let target = locked.unwrap_or_else(|| self.injector.cursor_position());

        let policy = JitterPolicy::new(config.jitter_enabled, config.jitter_magnitude_ms);
        let delay = {
            let mut source = lock_or_recover(&self.jitter);
            policy.next_delay(source.as_mut())
        };

        if !delay.is_zero() {
            PrecisionSleep::sleep(delay);
        }

        let _tick = lock_or_recover(&self.tick_lock);

        // stop() may have run while this tick slept.
        if !self.is_current(epoch) {
            return;
        }

        if let Some(position) = locked {
            self.injector.set_cursor_position(position);
        }

        self.injector.click(target);

        let total = self.click_count.fetch_add(1, Ordering::AcqRel) + 1;
        self.emit_click(total);
    }
}

/// Periodic left-click automation.
///
/// `Idle` until [`start`](Self::start); while `Active` a timer thread clicks
/// every `1000 / frequency` milliseconds, the first click immediately. Status
/// and click notifications are delivered on the receiver returned by
/// [`new`](Self::new) so the presentation thread can apply them itself.
pub struct ClickEngine {
    shared: Arc<EngineShared>,
    timer: Mutex<Option<PeriodicTimer>>,
    retired: Mutex<Vec<PeriodicTimer>>,
    disposed: AtomicBool,
}

impl ClickEngine {
    pub fn new(
        injector: Arc<dyn InputInjector>,
        jitter: Box<dyn JitterSource>,
        config: EngineConfig,
    ) -> (Self, Receiver<EngineEvent>) {
        let (events, receiver) = unbounded();

        let shared = EngineShared {
            state: AtomicU8::new(ClickerState::Idle as u8),
            epoch: AtomicU64::new(0),
            click_count: AtomicU64::new(0),
            clicks_dropped: AtomicBool::new(false),
            config: Mutex::new(config.clamped()),
            locked_position: Mutex::new(None),
            jitter: Mutex::new(jitter),
            tick_lock: Mutex::new(()),
            injector,
            events,
        };

        let engine = Self {
            shared: Arc::new(shared),
            timer: Mutex::new(None),
            retired: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        };

        (engine, receiver)
    }

    pub fn with_random_jitter(
        injector: Arc<dyn InputInjector>,
        config: EngineConfig,
    ) -> (Self, Receiver<EngineEvent>) {
        Self::new(injector, Box::new(RandomJitter::new()), config)
    }

    pub fn state(&self) -> ClickerState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClickerState::Active
    }

    pub fn click_count(&self) -> u64 {
        self.shared.click_count.load(Ordering::Acquire)
    }

    pub fn config(&self) -> EngineConfig {
        self.shared.config()
    }

    pub fn interval(&self) -> Duration {
        self.config().interval()
    }

    pub fn locked_position(&self) -> Option<Point> {
        self.shared.locked_position()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    pub fn start(&self) -> ClickerResult<()> {
        let mut timer = self.lock_timer()?;
        self.start_locked(&mut timer)
    }

    pub fn stop(&self) -> ClickerResult<()> {
        let mut timer = self.lock_timer()?;
        self.stop_locked(&mut timer)
    }

    pub fn toggle(&self) -> ClickerResult<()> {
        let mut timer = self.lock_timer()?;

        if self.is_running() {
            self.stop_locked(&mut timer)
        } else {
            self.start_locked(&mut timer)
        }
    }

    /// Updates the click rate. While active the schedule is torn down and
    /// rebuilt, so the next click comes one full new interval after the
    /// immediate restart tick.
    pub fn set_frequency(&self, frequency_hz: u32) -> ClickerResult<()> {
        let mut timer = self.lock_timer()?;

        let frequency_hz = clamp_frequency(frequency_hz);
        self.shared.config.lock()?.frequency_hz = frequency_hz;

        if self.is_running() {
            debug!(frequency_hz, "restarting schedule for new frequency");
            self.stop_locked(&mut timer)?;
            self.start_locked(&mut timer)?;
        }

        Ok(())
    }

    pub fn set_jitter(&self, enabled: bool, magnitude_ms: u32) -> ClickerResult<()> {
        let mut config = self.shared.config.lock()?;
        config.jitter_enabled = enabled;
        config.jitter_magnitude_ms = clamp_jitter(magnitude_ms);
        Ok(())
    }

    /// Takes effect at the next `start()`.
    pub fn set_cursor_policy(&self, policy: CursorPolicy) -> ClickerResult<()> {
        self.shared.config.lock()?.cursor_policy = policy;
        Ok(())
    }

    pub fn apply_config(&self, config: EngineConfig) -> ClickerResult<()> {
        let config = config.clamped();
        self.set_jitter(config.jitter_enabled, config.jitter_magnitude_ms)?;
        self.set_cursor_policy(config.cursor_policy)?;
        self.set_frequency(config.frequency_hz)
    }

    pub fn reset_counter(&self) {
        // Serialized with ticks so a late tick cannot report a pre-reset total.
        let _tick = lock_or_recover(&self.shared.tick_lock);
        self.shared.clicks_dropped.store(false, Ordering::Release);
        self.shared.click_count.store(0, Ordering::Release);
        self.shared
            .emit(EngineEvent::Click(ClickEvent { total_clicks: 0 }));
    }

    /// Stops automation, waits for every timer thread and leaves the engine
    /// unusable. Safe to call more than once.
    pub fn dispose(&self) -> ClickerResult<()> {
        let mut timer = self.lock_timer()?;
        self.stop_locked(&mut timer)?;

        if self.disposed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        self.release_cursor();

        let retired: Vec<PeriodicTimer> = self.retired.lock()?.drain(..).collect();
        for old in retired {
            old.join()?;
        }

        info!(clicks = self.click_count(), "click engine disposed");
        Ok(())
    }

    fn start_locked(&self, slot: &mut Option<PeriodicTimer>) -> ClickerResult<()> {
        if self.is_disposed() {
            return Err(ClickerError::InvalidInput(
                "Click engine has been disposed".to_string(),
            ));
        }

        if self.is_running() {
            return Ok(());
        }

        let config = self.config();
        let epoch = self.shared.epoch.fetch_add(1, Ordering::AcqRel) + 1;

        if config.cursor_policy.is_locked() {
            let position = self.shared.injector.cursor_position();
            *self.shared.locked_position.lock()? = Some(position);
            self.shared
                .injector
                .confine_cursor(Some(Region::pixel(position)));
            debug!(%position, "cursor locked");
        } else {
            *self.shared.locked_position.lock()? = None;
        }

        self.shared.set_state(ClickerState::Active);
        self.shared.emit(EngineEvent::Status(StatusEvent::active()));

        let shared = Arc::clone(&self.shared);
        let interval = config.interval();

        match PeriodicTimer::start(TIMER_THREAD_NAME, interval, move || {
            shared.perform_click(epoch)
        }) {
            Ok(timer) => {
                *slot = Some(timer);
                info!(
                    frequency_hz = config.frequency_hz,
                    interval_ms = interval.as_millis() as u64,
                    policy = %config.cursor_policy,
                    "clicking started"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to start click schedule");
                self.shared.set_state(ClickerState::Idle);
                self.release_cursor();
                self.shared.emit(EngineEvent::Status(StatusEvent::ready()));
                Err(e)
            }
        }
    }

    fn stop_locked(&self, slot: &mut Option<PeriodicTimer>) -> ClickerResult<()> {
        if !self.is_running() {
            return Ok(());
        }

        self.shared.set_state(ClickerState::Idle);

        let retired = match slot.take() {
            Some(timer) => {
                timer.cancel();
                self.retire(timer)
            }
            None => Ok(()),
        };

        // An injection already past its final check finishes before we go on.
        {
            let _tick = lock_or_recover(&self.shared.tick_lock);
            self.shared.flush_dropped_clicks();
        }

        self.release_cursor();
        self.shared.emit(EngineEvent::Status(StatusEvent::ready()));

        info!(clicks = self.click_count(), "clicking stopped");
        retired
    }

    fn release_cursor(&self) {
        let mut locked = lock_or_recover(&self.shared.locked_position);

        if locked.take().is_some() {
            self.shared.injector.confine_cursor(None);
            debug!("cursor released");
        }
    }

    fn retire(&self, timer: PeriodicTimer) -> ClickerResult<()> {
        let mut retired = self.retired.lock()?;
        let (finished, pending): (Vec<_>, Vec<_>) =
            retired.drain(..).partition(|old| old.is_finished());

        for old in finished {
            old.join()?;
        }

        *retired = pending;
        retired.push(timer);
        Ok(())
    }

    fn lock_timer(&self) -> ClickerResult<MutexGuard<'_, Option<PeriodicTimer>>> {
        self.timer
            .lock()
            .map_err(|e| ClickerError::Sync(format!("Failed to lock click schedule: {}", e)))
    }
}

impl Drop for ClickEngine {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            warn!(error = %e, "click engine shutdown failed");
        }
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
