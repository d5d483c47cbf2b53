//! The running total of what the current user has spent this month.

use crate::{
    clock::{Clock, LocalCalendar},
    expense::{ExpenseBackend, ExpenseQuery, Selection, total_price},
    user::CurrentUser,
};

/// A cached sum of the current user's expenses for this calendar month.
///
/// The total starts at zero and is only replaced wholesale by a successful
/// [MonthlySpend::refresh]. Between refreshes it may be stale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlySpend {
    spent: f64,
}

impl MonthlySpend {
    /// Create a total of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached total.
    pub fn spent(&self) -> f64 {
        self.spent
    }

    /// Add `amount` to the cached total without asking the backend.
    pub fn add_spent(&mut self, amount: f64) {
        self.spent += amount;
    }

    /// Replace the total with the sum of the current user's expenses this month.
    ///
    /// Does nothing when nobody is signed in. If the backend read fails the
    /// error is logged and the previous total is kept.
    pub async fn refresh<B, U, C>(&mut self, backend: &B, user: &U, calendar: &LocalCalendar<C>)
    where
        B: ExpenseBackend,
        U: CurrentUser,
        C: Clock,
    {
        let Some(user_id) = user.current_user() else {
            return;
        };

        let query = ExpenseQuery::for_window(
            Selection::Price,
            user_id,
            calendar.this_month(),
            calendar.timezone(),
        );
        tracing::debug!("Refreshing monthly spend with query {query}");

        match backend.select_expenses(&query).await {
            Ok(rows) => self.spent = total_price(&rows),
            Err(error) => tracing::error!("Error fetching expenses: {error}"),
        }
    }
}
