use std::fmt::Debug;

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Source of "now" for every time-of-day derivation.
pub trait Clock: Send + Sync + Debug {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Offset from UTC in seconds; anything chrono rejects (beyond ±24h) becomes UTC.
#[must_use]
pub fn fixed_offset(utc_offset_seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| Utc.fix())
}

/// Wall-clock time at a location with the given UTC offset.
#[must_use]
pub fn local_time(now: DateTime<Utc>, utc_offset_seconds: i32) -> DateTime<FixedOffset> {
    now.with_timezone(&fixed_offset(utc_offset_seconds))
}
