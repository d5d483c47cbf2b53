//! Reads the current user's expense entries for a calendar month.

use crate::{
    clock::{Clock, LocalCalendar},
    expense::{ExpenseBackend, ExpenseQuery, ExpenseRow, QueryError, Selection},
    month_window::MonthWindow,
    user::CurrentUser,
};

/// The result of a fetch: `None` when nobody is signed in, otherwise the
/// backend's answer as is.
pub type FetchResult = Option<Result<Vec<ExpenseRow>, QueryError>>;

/// Fetches `price` and `created_at` of the current user's expenses by month.
pub struct EntryFetcher<B, U, C> {
    backend: B,
    user: U,
    calendar: LocalCalendar<C>,
}

impl<B, U, C> EntryFetcher<B, U, C>
where
    B: ExpenseBackend,
    U: CurrentUser,
    C: Clock,
{
    /// Create a fetcher that reads from `backend` on behalf of `user`.
    pub fn new(backend: B, user: U, calendar: LocalCalendar<C>) -> Self {
        Self {
            backend,
            user,
            calendar,
        }
    }

    /// Entries from the first day of this month up to the first day of next month.
    pub async fn fetch_entries_this_month(&self) -> FetchResult {
        self.fetch_entries_in(self.calendar.this_month()).await
    }

    /// Entries from the first day of last month up to the first day of this month.
    pub async fn fetch_entries_last_month(&self) -> FetchResult {
        self.fetch_entries_in(self.calendar.last_month()).await
    }

    async fn fetch_entries_in(&self, window: MonthWindow) -> FetchResult {
        let user_id = self.user.current_user()?;

        let query = ExpenseQuery::for_window(
            Selection::PriceAndCreatedAt,
            user_id,
            window,
            self.calendar.timezone(),
        );
        tracing::debug!("Fetching entries with query {query}");

        Some(self.backend.select_expenses(&query).await)
    }
}
