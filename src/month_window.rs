//! Calendar month windows used to bound expense queries.

use time::{Date, Month, OffsetDateTime};
use time_tz::Tz;

use crate::timezone::local_midnight_utc;

/// A half-open interval covering one calendar month, `[start, end)`.
///
/// `start` is the first day of the month and `end` is the first day of the
/// following month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    start: Date,
    end: Date,
}

impl MonthWindow {
    /// The month that `date` falls in.
    pub fn containing(date: Date) -> Self {
        let start = first_day_of_month(date.year(), date.month());

        Self {
            start,
            end: first_day_of_next_month(start),
        }
    }

    /// The month before this one, rolling back into the previous year from January.
    pub fn previous(&self) -> Self {
        let (year, month) = match self.start.month() {
            Month::January => (self.start.year() - 1, Month::December),
            month => (self.start.year(), month.previous()),
        };

        Self {
            start: first_day_of_month(year, month),
            end: self.start,
        }
    }

    /// The month after this one.
    pub fn next(&self) -> Self {
        Self {
            start: self.end,
            end: first_day_of_next_month(self.end),
        }
    }

    /// The first day of the month.
    pub fn start(&self) -> Date {
        self.start
    }

    /// The first day of the following month, excluded from the window.
    pub fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` is inside the window.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }

    /// The UTC instants of local midnight at [Self::start] and [Self::end] in `timezone`.
    pub fn to_utc_bounds(&self, timezone: &Tz) -> (OffsetDateTime, OffsetDateTime) {
        (
            local_midnight_utc(timezone, self.start),
            local_midnight_utc(timezone, self.end),
        )
    }
}

fn first_day_of_month(year: i32, month: Month) -> Date {
    // Only fails before the first representable year.
    Date::from_calendar_date(year, month, 1).unwrap_or(Date::MIN)
}

fn first_day_of_next_month(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        month => (date.year(), month.next()),
    };

    // Saturates in the last representable month so the window never inverts.
    Date::from_calendar_date(year, month, 1).unwrap_or(Date::MAX)
}

#[cfg(test)]
mod tests {
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::timezone::{get_timezone, local_date};

    use super::MonthWindow;

    #[test]
    fn window_for_mid_month_date() {
        let window = MonthWindow::containing(date!(2024 - 03 - 15));

        assert_eq!(window.start(), date!(2024 - 03 - 01));
        assert_eq!(window.end(), date!(2024 - 04 - 01));
    }

    #[test]
    fn previous_month_of_march() {
        let window = MonthWindow::containing(date!(2024 - 03 - 15)).previous();

        assert_eq!(window.start(), date!(2024 - 02 - 01));
        assert_eq!(window.end(), date!(2024 - 03 - 01));
    }

    #[test]
    fn previous_month_of_january_rolls_back_a_year() {
        let window = MonthWindow::containing(date!(2024 - 01 - 10)).previous();

        assert_eq!(window.start(), date!(2023 - 12 - 01));
        assert_eq!(window.end(), date!(2024 - 01 - 01));
    }

    #[test]
    fn december_ends_in_next_year() {
        let window = MonthWindow::containing(date!(2024 - 12 - 20));

        assert_eq!(window.end(), date!(2025 - 01 - 01));
        assert_eq!(window.next().start(), date!(2025 - 01 - 01));
        assert_eq!(window.next().end(), date!(2025 - 02 - 01));
    }

    #[test]
    fn leap_february() {
        let window = MonthWindow::containing(date!(2024 - 02 - 29));

        assert_eq!(window.start(), date!(2024 - 02 - 01));
        assert_eq!(window.end(), date!(2024 - 03 - 01));
    }

    #[test]
    fn first_and_last_day_of_month_are_contained() {
        let window = MonthWindow::containing(date!(2024 - 04 - 30));

        assert!(window.contains(date!(2024 - 04 - 01)));
        assert!(window.contains(date!(2024 - 04 - 30)));
        assert!(!window.contains(date!(2024 - 03 - 31)));
        assert!(!window.contains(date!(2024 - 05 - 01)));
    }

    #[test]
    fn last_representable_month_ends_at_last_day() {
        let window = MonthWindow::containing(Date::MAX);

        assert_eq!(window.end(), Date::MAX);
        assert!(window.start() < window.end());
    }

    #[test]
    fn utc_bounds_in_utc() {
        let tz = get_timezone("Etc/UTC").unwrap();
        let window = MonthWindow::containing(date!(2024 - 03 - 15));

        let (lower, upper) = window.to_utc_bounds(tz);

        assert_eq!(lower, datetime!(2024-03-01 00:00 UTC));
        assert_eq!(upper, datetime!(2024-04-01 00:00 UTC));
    }

    #[test]
    fn utc_bounds_follow_local_midnight() {
        let tz = get_timezone("Pacific/Auckland").unwrap();
        let window = MonthWindow::containing(date!(2024 - 03 - 15));

        let (lower, upper) = window.to_utc_bounds(tz);

        assert_eq!(lower, datetime!(2024-02-29 11:00 UTC));
        // Daylight saving ends on the 7th of April, after this window.
        assert_eq!(upper, datetime!(2024-03-31 11:00 UTC));
    }

    #[test]
    fn utc_bounds_start_after_skipped_midnight() {
        let tz = get_timezone("America/Asuncion").unwrap();
        let window = MonthWindow::containing(date!(2023 - 09 - 15));

        let (_, upper) = window.to_utc_bounds(tz);

        assert_eq!(upper, datetime!(2023-10-01 04:00 UTC));
        assert_eq!(
            local_date(tz, upper - time::Duration::SECOND),
            date!(2023 - 09 - 30)
        );
    }
}
