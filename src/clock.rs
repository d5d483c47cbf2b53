//! Where "now" comes from, and which calendar month it falls in.

use std::{fmt::Debug, sync::Arc};

use time::{Date, OffsetDateTime};
use time_tz::Tz;

use crate::{month_window::MonthWindow, timezone::local_date};

/// A source of the current time.
pub trait Clock: Debug {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;
}

/// The clock the request handlers read, shared through the app state.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// The calendar of a timezone, read at the time given by a [Clock].
#[derive(Clone, Copy)]
pub struct LocalCalendar<C = SystemClock> {
    clock: C,
    timezone: &'static Tz,
}

impl<C: Clock> LocalCalendar<C> {
    /// Create a calendar for `timezone` that reads the time from `clock`.
    pub fn new(clock: C, timezone: &'static Tz) -> Self {
        Self { clock, timezone }
    }

    /// The timezone whose calendar days are used.
    pub fn timezone(&self) -> &'static Tz {
        self.timezone
    }

    /// The local date right now.
    pub fn today(&self) -> Date {
        local_date(self.timezone, self.clock.now())
    }

    /// The month containing [Self::today].
    pub fn this_month(&self) -> MonthWindow {
        MonthWindow::containing(self.today())
    }

    /// The month before [Self::this_month].
    pub fn last_month(&self) -> MonthWindow {
        self.this_month().previous()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::{date, datetime};

    use crate::timezone::get_timezone;

    use super::{FixedClock, LocalCalendar, SharedClock};

    #[test]
    fn this_and_last_month() {
        let calendar = LocalCalendar::new(
            FixedClock(datetime!(2024-03-15 12:00 UTC)),
            get_timezone("Etc/UTC").unwrap(),
        );

        assert_eq!(calendar.this_month().start(), date!(2024 - 03 - 01));
        assert_eq!(calendar.last_month().start(), date!(2024 - 02 - 01));
        assert_eq!(calendar.last_month().end(), date!(2024 - 03 - 01));
    }

    #[test]
    fn shared_clock_reads_inner_clock() {
        let clock: SharedClock = Arc::new(FixedClock(datetime!(2024-01-10 08:00 UTC)));
        let calendar = LocalCalendar::new(clock, get_timezone("Etc/UTC").unwrap());

        assert_eq!(calendar.last_month().start(), date!(2023 - 12 - 01));
    }

    #[test]
    fn month_follows_local_date_not_utc_date() {
        // Already the 1st of April in Auckland.
        let calendar = LocalCalendar::new(
            FixedClock(datetime!(2024-03-31 12:00 UTC)),
            get_timezone("Pacific/Auckland").unwrap(),
        );

        assert_eq!(calendar.today(), date!(2024 - 04 - 01));
        assert_eq!(calendar.this_month().start(), date!(2024 - 04 - 01));
    }
}
