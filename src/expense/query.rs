//! A filter builder for reads of the `expense` table.

use std::fmt::Display;

use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use time_tz::Tz;

use crate::{month_window::MonthWindow, user::UserID};

/// The columns a query reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Only `price`, enough for summing.
    Price,
    /// `price` and `created_at`, for listing entries.
    PriceAndCreatedAt,
}

impl Selection {
    /// The comma separated column list, e.g. "price, created_at".
    pub fn columns(&self) -> &'static str {
        match self {
            Selection::Price => "price",
            Selection::PriceAndCreatedAt => "price, created_at",
        }
    }

    /// Whether `created_at` is read.
    pub fn includes_created_at(&self) -> bool {
        matches!(self, Selection::PriceAndCreatedAt)
    }
}

/// A read of the `expense` table with optional equality and range filters.
///
/// Filters that are not set do not restrict the result.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseQuery {
    selection: Selection,
    user_id: Option<UserID>,
    created_at_gte: Option<OffsetDateTime>,
    created_at_lt: Option<OffsetDateTime>,
}

impl ExpenseQuery {
    /// Start a query reading the columns in `selection`.
    pub fn select(selection: Selection) -> Self {
        Self {
            selection,
            user_id: None,
            created_at_gte: None,
            created_at_lt: None,
        }
    }

    /// Read `selection` for the rows of `user_id` created inside `window`,
    /// where the window's days are calendar days in `timezone`.
    pub fn for_window(
        selection: Selection,
        user_id: UserID,
        window: MonthWindow,
        timezone: &Tz,
    ) -> Self {
        let (lower, upper) = window.to_utc_bounds(timezone);

        Self::select(selection)
            .eq_user_id(user_id)
            .gte_created_at(lower)
            .lt_created_at(upper)
    }

    /// Only rows owned by `user_id`.
    pub fn eq_user_id(mut self, user_id: UserID) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Only rows created at or after `lower`.
    pub fn gte_created_at(mut self, lower: OffsetDateTime) -> Self {
        self.created_at_gte = Some(lower.to_offset(UtcOffset::UTC));
        self
    }

    /// Only rows created strictly before `upper`.
    pub fn lt_created_at(mut self, upper: OffsetDateTime) -> Self {
        self.created_at_lt = Some(upper.to_offset(UtcOffset::UTC));
        self
    }

    /// The columns to read.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The owner filter.
    pub fn user_id(&self) -> Option<UserID> {
        self.user_id
    }

    /// The inclusive lower bound on `created_at`, in UTC.
    pub fn created_at_gte(&self) -> Option<OffsetDateTime> {
        self.created_at_gte
    }

    /// The exclusive upper bound on `created_at`, in UTC.
    pub fn created_at_lt(&self) -> Option<OffsetDateTime> {
        self.created_at_lt
    }
}

/// Formats the query as a REST filter string, e.g.
/// "select=price&user_id=eq.1&created_at=gte.2024-03-01T00:00:00Z".
impl Display for ExpenseQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "select={}", self.selection.columns().replace(' ', ""))?;

        if let Some(user_id) = self.user_id {
            write!(f, "&user_id=eq.{user_id}")?;
        }

        for (operator, bound) in [("gte", self.created_at_gte), ("lt", self.created_at_lt)] {
            if let Some(bound) = bound {
                let bound = bound.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
                write!(f, "&created_at={operator}.{bound}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{month_window::MonthWindow, timezone::get_timezone, user::UserID};

    use super::{ExpenseQuery, Selection};

    #[test]
    fn window_query_filters_user_and_month() {
        let tz = get_timezone("Etc/UTC").unwrap();
        let window = MonthWindow::containing(date!(2024 - 03 - 15));

        let query = ExpenseQuery::for_window(Selection::Price, UserID::new(7), window, tz);

        assert_eq!(query.selection(), Selection::Price);
        assert_eq!(query.user_id(), Some(UserID::new(7)));
        assert_eq!(query.created_at_gte(), Some(datetime!(2024-03-01 00:00 UTC)));
        assert_eq!(query.created_at_lt(), Some(datetime!(2024-04-01 00:00 UTC)));
    }

    #[test]
    fn bounds_are_normalised_to_utc() {
        let query = ExpenseQuery::select(Selection::Price)
            .gte_created_at(datetime!(2024-03-01 00:00 +13:00));

        assert_eq!(query.created_at_gte(), Some(datetime!(2024-02-29 11:00 UTC)));
    }

    #[test]
    fn display_renders_filter_string() {
        let query = ExpenseQuery::select(Selection::PriceAndCreatedAt)
            .eq_user_id(UserID::new(1))
            .gte_created_at(datetime!(2024-03-01 00:00 UTC))
            .lt_created_at(datetime!(2024-04-01 00:00 UTC));

        assert_eq!(
            query.to_string(),
            "select=price,created_at&user_id=eq.1\
            &created_at=gte.2024-03-01T00:00:00Z&created_at=lt.2024-04-01T00:00:00Z"
        );
    }

    #[test]
    fn display_omits_unset_filters() {
        let query = ExpenseQuery::select(Selection::Price);

        assert_eq!(query.to_string(), "select=price");
    }
}
