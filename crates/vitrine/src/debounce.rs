//! Debounced input.
//!
//! [`Debouncer`] holds one value that is current and at most one pending
//! value with a deadline. Time is passed in by the caller, so the debouncer
//! never sleeps or spawns: the host polls it on its own schedule (a UI tick,
//! a test's [`ManualClock`]).

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Delays a changing value until it has been stable for `interval`.
///
/// ```
/// use std::time::{Duration, Instant};
/// use vitrine::Debouncer;
///
/// let start = Instant::now();
/// let mut search = Debouncer::new(String::new(), Duration::from_millis(300));
///
/// search.push("py".to_string(), start);
/// search.push("python".to_string(), start + Duration::from_millis(100));
/// assert_eq!(search.poll(start + Duration::from_millis(350)), None);
/// assert_eq!(
///     search.poll(start + Duration::from_millis(400)),
///     Some("python".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    current: T,
    pending: Option<Pending<T>>,
    interval: Duration,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// The initial value is current immediately.
    pub fn new(initial: T, interval: Duration) -> Self {
        Debouncer {
            current: initial,
            pending: None,
            interval,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records a new source value observed at `now`.
    ///
    /// Any earlier pending value is discarded and the wait restarts.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.interval,
        });
    }

    /// Emits the pending value once its deadline has passed.
    ///
    /// Returns `None` while waiting, and when the settled value equals the
    /// current one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {}
            _ => return None,
        }
        self.take_pending()
    }

    /// Emits the pending value without waiting.
    pub fn flush(&mut self) -> Option<T> {
        self.take_pending()
    }

    /// Drops the pending value; it will never be emitted.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Sets the current value directly, dropping anything pending.
    pub fn replace(&mut self, value: T) {
        self.pending = None;
        self.current = value;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    fn take_pending(&mut self) -> Option<T> {
        let pending = self.pending.take()?;
        if pending.value == self.current {
            return None;
        }
        self.current = pending.value.clone();
        Some(pending.value)
    }
}
