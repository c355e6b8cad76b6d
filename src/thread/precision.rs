use std::thread;
use std::time::{Duration, Instant};

const THRESHOLD_SPIN_ONLY: Duration = Duration::from_micros(200);
const MAX_SLEEP_SLICE: Duration = Duration::from_millis(5);
const SLEEP_MARGIN: Duration = Duration::from_micros(1_500);

/// Millisecond-accurate waits. OS sleeps overshoot by a scheduler quantum,
/// so the wait sleeps in short slices and spins out the last stretch.
pub struct PrecisionSleep;

impl PrecisionSleep {
    pub fn sleep(duration: Duration) {
        if duration.is_zero() {
            return;
        }

        Self::sleep_until(Instant::now() + duration, || false);
    }

    /// Waits until `deadline`, polling `abort` between slices. Returns `true`
    /// when `abort` cut the wait short.
    pub fn sleep_until(deadline: Instant, abort: impl Fn() -> bool) -> bool {
        let mut check_counter = 0u32;

        loop {
            if abort() {
                return true;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }

            if remaining > SLEEP_MARGIN {
                thread::sleep((remaining - SLEEP_MARGIN).min(MAX_SLEEP_SLICE));
                continue;
            }

            if remaining > THRESHOLD_SPIN_ONLY {
                thread::yield_now();
                continue;
            }

            for _ in 0..16 {
                std::hint::spin_loop();
            }

            check_counter = check_counter.wrapping_add(1);
            if check_counter & 0xF == 0 {
                thread::yield_now();
            }
        }
    }
}
