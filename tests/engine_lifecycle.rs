use autoclicker::clicker::{CLICK_BACKLOG_LIMIT, STATUS_ACTIVE, STATUS_READY};
use autoclicker::{
    ClickEngine, ClickEvent, ClickerError, ClickerState, CursorPolicy, EngineConfig, EngineEvent,
    InputInjector, JitterSource, Point, Region,
};
use crossbeam_channel::Receiver;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Default)]
struct FakeInjector {
    cursor: Mutex<Point>,
    clicks: Mutex<Vec<Point>>,
    moves: Mutex<Vec<Point>>,
    confinements: Mutex<Vec<Option<Region>>>,
}

impl FakeInjector {
    fn at(x: i32, y: i32) -> Arc<Self> {
        let injector = Self::default();
        *injector.cursor.lock().unwrap() = Point::new(x, y);
        Arc::new(injector)
    }

    fn move_to(&self, x: i32, y: i32) {
        *self.cursor.lock().unwrap() = Point::new(x, y);
    }

    fn click_count(&self) -> usize {
        self.clicks.lock().unwrap().len()
    }

    fn clicks(&self) -> Vec<Point> {
        self.clicks.lock().unwrap().clone()
    }
}

impl InputInjector for FakeInjector {
    fn cursor_position(&self) -> Point {
        *self.cursor.lock().unwrap()
    }

    fn set_cursor_position(&self, position: Point) {
        self.moves.lock().unwrap().push(position);
        *self.cursor.lock().unwrap() = position;
    }

    fn click(&self, at: Point) {
        self.clicks.lock().unwrap().push(at);
    }

    fn confine_cursor(&self, region: Option<Region>) {
        self.confinements.lock().unwrap().push(region);
    }
}

/// Replays fixed draws, then zero.
struct ScriptedJitter(VecDeque<i64>);

impl ScriptedJitter {
    fn new(draws: &[i64]) -> Box<Self> {
        Box::new(Self(draws.iter().copied().collect()))
    }
}

impl JitterSource for ScriptedJitter {
    fn draw(&mut self, _magnitude_ms: u32) -> i64 {
        self.0.pop_front().unwrap_or(0)
    }
}

fn config(frequency_hz: u32) -> EngineConfig {
    EngineConfig {
        frequency_hz,
        ..Default::default()
    }
}

fn engine_with(
    injector: &Arc<FakeInjector>,
    config: EngineConfig,
) -> (ClickEngine, Receiver<EngineEvent>) {
    ClickEngine::new(injector.clone(), ScriptedJitter::new(&[]), config)
}

fn statuses(events: &Receiver<EngineEvent>) -> Vec<String> {
    events
        .try_iter()
        .filter_map(|event| match event {
            EngineEvent::Status(status) => Some(status.message),
            EngineEvent::Click(_) => None,
        })
        .collect()
}

fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let started = Instant::now();
    while started.elapsed() < timeout {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    condition()
}

#[test]
fn test_start_is_immediate_and_idempotent() {
    let injector = FakeInjector::at(10, 10);
    let (engine, events) = engine_with(&injector, config(1));

    engine.start().unwrap();
    engine.start().unwrap();

    assert_eq!(engine.state(), ClickerState::Active);
    assert!(wait_until(Duration::from_millis(500), || injector.click_count() == 1));

    thread::sleep(Duration::from_millis(50));
    assert_eq!(statuses(&events), vec![STATUS_ACTIVE.to_string()]);

    engine.stop().unwrap();
}

#[test]
fn test_stop_when_idle_is_silent() {
    let injector = FakeInjector::at(0, 0);
    let (engine, events) = engine_with(&injector, config(10));

    engine.stop().unwrap();

    assert_eq!(engine.state(), ClickerState::Idle);
    assert!(events.try_recv().is_err());
    assert!(injector.confinements.lock().unwrap().is_empty());
}

#[test]
fn test_no_click_after_stop_returns() {
    let injector = FakeInjector::at(1, 1);
    let (engine, events) = engine_with(&injector, config(1000));

    engine.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || injector.click_count() >= 5));
    engine.stop().unwrap();

    let stopped_at = injector.click_count();
    let drained: Vec<EngineEvent> = events.try_iter().collect();
    assert_eq!(
        drained.last(),
        Some(&EngineEvent::Status(autoclicker::StatusEvent::ready()))
    );

    thread::sleep(Duration::from_millis(100));
    assert_eq!(injector.click_count(), stopped_at);
    assert!(events.try_recv().is_err());
    assert_eq!(engine.click_count() as usize, stopped_at);
}

#[test]
fn test_click_events_count_up() {
    let injector = FakeInjector::at(3, 4);
    let (engine, events) = engine_with(&injector, config(200));

    engine.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || injector.click_count() >= 3));
    engine.stop().unwrap();

    let totals: Vec<u64> = events
        .try_iter()
        .filter_map(|event| match event {
            EngineEvent::Click(ClickEvent { total_clicks }) => Some(total_clicks),
            EngineEvent::Status(_) => None,
        })
        .collect();

    assert!(totals.len() >= 3);
    for (i, total) in totals.iter().enumerate() {
        assert_eq!(*total, i as u64 + 1);
    }
}

#[test]
fn test_count_persists_until_reset() {
    let injector = FakeInjector::at(0, 0);
    let (engine, events) = engine_with(&injector, config(1));

    engine.start().unwrap();
    assert!(wait_until(Duration::from_millis(500), || engine.click_count() == 1));
    engine.stop().unwrap();

    engine.start().unwrap();
    assert!(wait_until(Duration::from_millis(500), || engine.click_count() == 2));
    engine.stop().unwrap();

    let _ = events.try_iter().count();
    engine.reset_counter();

    assert_eq!(engine.click_count(), 0);
    assert_eq!(
        events.try_recv().unwrap(),
        EngineEvent::Click(ClickEvent { total_clicks: 0 })
    );
}

#[test]
fn test_reset_while_active_counts_from_zero() {
    let injector = FakeInjector::at(0, 0);
    let (engine, events) = engine_with(&injector, config(100));

    engine.start().unwrap();
    assert!(wait_until(Duration::from_secs(1), || engine.click_count() >= 3));

    engine.reset_counter();
    assert!(engine.is_running());
    assert!(wait_until(Duration::from_secs(1), || injector.click_count() >= 6));
    engine.stop().unwrap();

    let totals: Vec<u64> = events
        .try_iter()
        .filter_map(|event| match event {
            EngineEvent::Click(click) => Some(click.total_clicks),
            EngineEvent::Status(_) => None,
        })
        .collect();

    let reset_at = totals
        .iter()
        .position(|total| *total == 0)
        .expect("reset event");
    assert!(totals[reset_at + 1..].contains(&1));
}

#[test]
fn test_set_frequency_restarts_schedule() {
    let injector = FakeInjector::at(0, 0);
    let (engine, events) = engine_with(&injector, config(1));

    engine.start().unwrap();
    assert!(wait_until(Duration::from_millis(500), || injector.click_count() == 1));

    let restarted = Instant::now();
    engine.set_frequency(2).unwrap();

    assert!(engine.is_running());
    assert_eq!(engine.interval(), Duration::from_millis(500));
    assert!(wait_until(Duration::from_millis(300), || injector.click_count() == 2));

    thread::sleep(Duration::from_millis(400).saturating_sub(restarted.elapsed()));
    assert_eq!(injector.click_count(), 2);

    let by_second_tick = Duration::from_millis(700).saturating_sub(restarted.elapsed());
    assert!(wait_until(by_second_tick, || injector.click_count() == 3));

    assert_eq!(
        statuses(&events),
        vec![
            STATUS_ACTIVE.to_string(),
            STATUS_READY.to_string(),
            STATUS_ACTIVE.to_string()
        ]
    );

    engine.stop().unwrap();
}

#[test]
fn test_set_frequency_while_idle_stays_idle() {
    let injector = FakeInjector::at(0, 0);
    let (engine, events) = engine_with(&injector, config(10));

    engine.set_frequency(5000).unwrap();

    assert_eq!(engine.config().frequency_hz, 1000);
    assert_eq!(engine.interval(), Duration::from_millis(1));
    assert!(!engine.is_running());
    assert!(events.try_recv().is_err());

    thread::sleep(Duration::from_millis(30));
    assert_eq!(injector.click_count(), 0);
}

#[test]
fn test_live_position_follows_cursor() {
    let injector = FakeInjector::at(5, 5);
    let (engine, _events) = engine_with(&injector, config(50));

    engine.start().unwrap();
    assert!(wait_until(Duration::from_millis(500), || injector.click_count() >= 1));

    injector.move_to(300, 400);
    assert!(wait_until(Duration::from_millis(500), || {
        injector.clicks().last() == Some(&Point::new(300, 400))
    }));
    engine.stop().unwrap();

    assert_eq!(injector.clicks()[0], Point::new(5, 5));
    assert!(injector.moves.lock().unwrap().is_empty());
    assert!(injector.confinements.lock().unwrap().is_empty());
}

#[test]
fn test_locked_position_pins_cursor() {
    let injector = FakeInjector::at(100, 200);
    let locked = EngineConfig {
        cursor_policy: CursorPolicy::LockedPosition,
        ..config(50)
    };
    let (engine, _events) = engine_with(&injector, locked);

    engine.start().unwrap();
    assert_eq!(engine.locked_position(), Some(Point::new(100, 200)));
    assert_eq!(
        injector.confinements.lock().unwrap().as_slice(),
        &[Some(Region::pixel(Point::new(100, 200)))]
    );

    injector.move_to(1, 1);
    assert!(wait_until(Duration::from_millis(500), || injector.click_count() >= 3));
    engine.stop().unwrap();

    assert!(
        injector
            .clicks()
            .iter()
            .all(|click| *click == Point::new(100, 200))
    );
    assert!(
        injector
            .moves
            .lock()
            .unwrap()
            .iter()
            .all(|position| *position == Point::new(100, 200))
    );
    assert_eq!(injector.confinements.lock().unwrap().last(), Some(&None));
    assert_eq!(engine.locked_position(), None);
}

#[test]
fn test_locked_position_recaptured_on_restart() {
    let injector = FakeInjector::at(10, 10);
    let (engine, _events) = engine_with(&injector, config(10));
    engine
        .set_cursor_policy(CursorPolicy::LockedPosition)
        .unwrap();

    engine.start().unwrap();
    engine.stop().unwrap();

    injector.move_to(20, 30);
    engine.start().unwrap();
    assert_eq!(engine.locked_position(), Some(Point::new(20, 30)));
    engine.stop().unwrap();
}

#[test]
fn test_stop_during_jitter_delay_discards_click() {
    let injector = FakeInjector::at(0, 0);
    let jittery = EngineConfig {
        jitter_enabled: true,
        jitter_magnitude_ms: 1000,
        ..config(1)
    };
    let (engine, _events) = ClickEngine::new(injector.clone(), ScriptedJitter::new(&[300]), jittery);

    engine.start().unwrap();
    thread::sleep(Duration::from_millis(30));

    let started = Instant::now();
    engine.stop().unwrap();
    assert!(started.elapsed() < Duration::from_millis(200));

    thread::sleep(Duration::from_millis(400));
    assert_eq!(injector.click_count(), 0);
    assert_eq!(engine.click_count(), 0);
}

#[test]
fn test_negative_draws_do_not_delay() {
    let injector = FakeInjector::at(0, 0);
    let jittery = EngineConfig {
        jitter_enabled: true,
        jitter_magnitude_ms: 1000,
        ..config(1)
    };
    let (engine, _events) =
        ClickEngine::new(injector.clone(), ScriptedJitter::new(&[-900]), jittery);

    engine.start().unwrap();
    assert!(wait_until(Duration::from_millis(100), || injector.click_count() == 1));
    engine.stop().unwrap();
}

#[test]
fn test_toggle_alternates() {
    let injector = FakeInjector::at(0, 0);
    let (engine, events) = engine_with(&injector, config(10));

    engine.toggle().unwrap();
    assert!(engine.is_running());
    engine.toggle().unwrap();
    assert!(!engine.is_running());

    assert_eq!(
        statuses(&events),
        vec![STATUS_ACTIVE.to_string(), STATUS_READY.to_string()]
    );
}

#[test]
fn test_dispose_is_final() {
    let injector = FakeInjector::at(0, 0);
    let locked = EngineConfig {
        cursor_policy: CursorPolicy::LockedPosition,
        ..config(100)
    };
    let (engine, _events) = engine_with(&injector, locked);

    engine.start().unwrap();
    engine.set_frequency(200).unwrap();
    engine.dispose().unwrap();
    engine.dispose().unwrap();

    assert!(!engine.is_running());
    assert_eq!(injector.confinements.lock().unwrap().last(), Some(&None));
    assert!(matches!(engine.start(), Err(ClickerError::InvalidInput(_))));

    let clicks = injector.click_count();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(injector.click_count(), clicks);
}

#[test]
fn test_unread_click_events_stay_bounded() {
    let injector = FakeInjector::at(0, 0);
    let (engine, events) = engine_with(&injector, config(1000));

    engine.start().unwrap();
    assert!(wait_until(Duration::from_secs(2), || {
        injector.click_count() > CLICK_BACKLOG_LIMIT * 3
    }));
    engine.stop().unwrap();

    let queued: Vec<EngineEvent> = events.try_iter().collect();
    assert!(queued.len() <= CLICK_BACKLOG_LIMIT + 2, "{} queued", queued.len());

    let last_total = queued.iter().rev().find_map(|event| match event {
        EngineEvent::Click(click) => Some(click.total_clicks),
        EngineEvent::Status(_) => None,
    });
    assert_eq!(last_total, Some(engine.click_count()));
    assert_eq!(
        queued.last(),
        Some(&EngineEvent::Status(autoclicker::StatusEvent::ready()))
    );
}
