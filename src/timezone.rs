//! Resolving the configured canonical timezone into UTC offsets.

use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// Look up a canonical timezone name, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if the name is not a known timezone.
pub fn get_timezone(canonical_timezone: &str) -> Result<&'static Tz, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))
}

/// The offset from UTC that `timezone` observes at the instant `at`.
pub fn get_local_offset(timezone: &Tz, at: OffsetDateTime) -> UtcOffset {
    timezone.get_offset_utc(&at).to_utc()
}

/// The calendar date in `timezone` at the instant `now`.
pub fn local_date(timezone: &Tz, now: OffsetDateTime) -> Date {
    now.to_offset(get_local_offset(timezone, now)).date()
}

/// The UTC instant at which `date` starts in `timezone`.
///
/// This is normally local midnight. The offset is looked up twice: once
/// guessing that midnight is at UTC midnight and again at the instant that
/// guess produced. When a daylight saving transition skips midnight, the day
/// starts at the transition instead, the first instant whose local date is
/// `date`.
pub fn local_midnight_utc(timezone: &Tz, date: Date) -> OffsetDateTime {
    let midnight = PrimitiveDateTime::new(date, Time::MIDNIGHT);

    let first_guess = midnight.assume_offset(get_local_offset(timezone, midnight.assume_utc()));
    let candidate = midnight.assume_offset(get_local_offset(timezone, first_guess));

    if local_date(timezone, candidate) >= date {
        return candidate.to_offset(UtcOffset::UTC);
    }

    first_instant_on(timezone, date, candidate).to_offset(UtcOffset::UTC)
}

/// Search forward from `before`, an instant on the local day before `date`,
/// for the first whole second whose local date is `date`.
fn first_instant_on(timezone: &Tz, date: Date, before: OffsetDateTime) -> OffsetDateTime {
    let mut lower = 0;
    let mut upper = MAX_GAP_SECONDS;

    while upper - lower > 1 {
        let middle = lower + (upper - lower) / 2;

        if local_date(timezone, before + Duration::seconds(middle)) < date {
            lower = middle;
        } else {
            upper = middle;
        }
    }

    before + Duration::seconds(upper)
}

/// No timezone has skipped more than half a day of local time.
const MAX_GAP_SECONDS: i64 = 12 * 60 * 60;
