//! Countdown
//!
//! Time remaining until the event. The value is always recomputed from the
//! fixed target and the clock, never accumulated tick by tick, so a late or
//! skipped tick cannot make the display drift.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// How often the display refreshes
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeRemaining {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn is_finished(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn get(&self, unit: TimeUnit) -> u64 {
        match unit {
            TimeUnit::Days => self.days,
            TimeUnit::Hours => self.hours,
            TimeUnit::Minutes => self.minutes,
            TimeUnit::Seconds => self.seconds,
        }
    }

    /// Whether `unit` shows a different value than in `previous`
    pub fn changed(&self, previous: &TimeRemaining, unit: TimeUnit) -> bool {
        self.get(unit) != previous.get(unit)
    }

    pub fn total_millis(&self) -> i64 {
        self.days as i64 * MS_PER_DAY
            + self.hours as i64 * MS_PER_HOUR
            + self.minutes as i64 * MS_PER_MINUTE
            + self.seconds as i64 * MS_PER_SECOND
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Days => "Días",
            TimeUnit::Hours => "Horas",
            TimeUnit::Minutes => "Minutos",
            TimeUnit::Seconds => "Segundos",
        }
    }
}

/// Time left from `now` until `target`, clamped at zero
pub fn compute(now: DateTime<Utc>, target: DateTime<Utc>) -> TimeRemaining {
    let diff = (target - now).num_milliseconds();
    if diff <= 0 {
        return TimeRemaining::ZERO;
    }
    TimeRemaining {
        days: (diff / MS_PER_DAY) as u64,
        hours: ((diff / MS_PER_HOUR) % 24) as u64,
        minutes: ((diff / MS_PER_MINUTE) % 60) as u64,
        seconds: ((diff / MS_PER_SECOND) % 60) as u64,
    }
}

// ========================
// Clock
// ========================

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock (`Date.now()` in the browser)
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

// ========================
// Tick Source
// ========================

/// Keeps a recurring callback alive; dropping or cancelling stops it
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Recurring scheduler
pub trait TickSource {
    fn every(&self, period: Duration, on_tick: Box<dyn FnMut()>) -> TickHandle;
}

struct ManualTimer {
    active: Rc<Cell<bool>>,
    on_tick: Box<dyn FnMut()>,
}

/// Tick source driven by hand, for virtual time
#[derive(Clone, Default)]
pub struct ManualTicks {
    timers: Rc<RefCell<Vec<ManualTimer>>>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live timer once
    pub fn fire(&self) {
        // Taken out so callbacks never run while the list is borrowed
        let mut timers = std::mem::take(&mut *self.timers.borrow_mut());
        timers.retain(|t| t.active.get());
        for timer in timers.iter_mut() {
            (timer.on_tick)();
        }
        let mut slot = self.timers.borrow_mut();
        timers.append(&mut slot);
        *slot = timers;
    }

    pub fn active_count(&self) -> usize {
        self.timers.borrow().iter().filter(|t| t.active.get()).count()
    }
}

impl TickSource for ManualTicks {
    fn every(&self, _period: Duration, on_tick: Box<dyn FnMut()>) -> TickHandle {
        let active = Rc::new(Cell::new(true));
        self.timers.borrow_mut().push(ManualTimer {
            active: Rc::clone(&active),
            on_tick,
        });
        TickHandle::new(move || active.set(false))
    }
}

// ========================
// Countdown
// ========================

pub struct Countdown {
    target: DateTime<Utc>,
    clock: Rc<dyn Clock>,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>, clock: Rc<dyn Clock>) -> Self {
        Self { target, clock }
    }

    pub fn remaining(&self) -> TimeRemaining {
        compute(self.clock.now(), self.target)
    }

    /// Recompute once per tick and hand each value to `on_update`.
    ///
    /// The returned handle must live as long as the display does.
    pub fn start(
        &self,
        ticks: &dyn TickSource,
        mut on_update: impl FnMut(TimeRemaining) + 'static,
    ) -> TickHandle {
        let target = self.target;
        let clock = Rc::clone(&self.clock);
        log::debug!("countdown started, target {}", target);
        ticks.every(
            TICK_PERIOD,
            Box::new(move || on_update(compute(clock.now(), target))),
        )
    }
}
