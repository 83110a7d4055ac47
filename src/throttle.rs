use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// source of wall-clock time for the throttle gate
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// the real clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// pure decision: may an event be emitted at `now`?
pub fn can_emit_at(last_emitted_at: Option<DateTime<Utc>>, delay: Duration, now: DateTime<Utc>) -> bool {
    let Some(last) = last_emitted_at else {
        return true;
    };
    if delay.is_zero() {
        return true;
    }
    let delay = TimeDelta::from_std(delay).unwrap_or(TimeDelta::MAX);
    now.signed_duration_since(last) >= delay
}

/// time based rate limiter for progress notifications
#[derive(Clone)]
pub struct ThrottleGate {
    delay: Duration,
    clock: Arc<dyn Clock>,
}

impl ThrottleGate {
    pub fn new(delay: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { delay, clock }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// checks the gate against the current time
    pub fn can_emit(&self, last_emitted_at: Option<DateTime<Utc>>) -> bool {
        can_emit_at(last_emitted_at, self.delay, self.clock.now())
    }

    /// reads the clock once and returns the reading if the gate is open,
    /// so the caller records exactly the time the decision was made at
    pub fn admit(&self, last_emitted_at: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        can_emit_at(last_emitted_at, self.delay, now).then_some(now)
    }
}
