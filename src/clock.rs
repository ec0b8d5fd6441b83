//! Calendar helpers: the clock used to pick "today's" prompt and the
//! `YYYY-MM-DD` date format shared by storage and authoring.

use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};
use tracing::warn;

/// Wire format of prompt dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant, in the local offset when it can be determined.
    fn now(&self) -> OffsetDateTime;

    /// Current calendar date.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Clock backed by the host's system time, shifted to the local offset
/// captured when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// Capture the local UTC offset, falling back to UTC when it cannot be
    /// determined.
    ///
    /// Call before spawning threads: on some platforms the offset is only
    /// readable while the process is single-threaded.
    pub fn detect() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or_else(|err| {
            warn!(error = %err, "local offset unavailable; using UTC");
            UtcOffset::UTC
        });
        Self { offset }
    }

    /// Clock reporting times at a fixed `offset`.
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value.trim(), DATE_FORMAT)
}

#[cfg(test)]
pub(crate) use self::fixed::FixedClock;

#[cfg(test)]
mod fixed {
    use std::sync::Mutex;

    use time::OffsetDateTime;

    use super::Clock;

    /// Clock frozen at a settable instant.
    pub(crate) struct FixedClock(Mutex<OffsetDateTime>);

    impl FixedClock {
        pub(crate) fn at(now: OffsetDateTime) -> Self {
            Self(Mutex::new(now))
        }

        pub(crate) fn set(&self, now: OffsetDateTime) {
            *self.0.lock().unwrap() = now;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> OffsetDateTime {
            *self.0.lock().unwrap()
        }
    }
}
