//! Route handlers that return a month of expense entries as JSON.

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    clock::{LocalCalendar, SharedClock},
    entries::{EntryFetcher, FetchResult},
    expense::SqliteExpenseBackend,
    session::SessionUser,
    timezone::get_timezone,
};

/// The state needed by the entry endpoints.
#[derive(Debug, Clone)]
pub struct EntriesState {
    /// The backend holding the expense table.
    pub expense_backend: SqliteExpenseBackend,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// Where the current time is read from.
    pub clock: SharedClock,
}

impl FromRef<AppState> for EntriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_backend: state.expense_backend.clone(),
            local_timezone: state.local_timezone.clone(),
            clock: state.clock.clone(),
        }
    }
}

impl EntriesState {
    fn fetcher(
        self,
        user: SessionUser,
    ) -> Result<EntryFetcher<SqliteExpenseBackend, SessionUser, SharedClock>, Error> {
        let timezone = get_timezone(&self.local_timezone)?;

        Ok(EntryFetcher::new(
            self.expense_backend,
            user,
            LocalCalendar::new(self.clock, timezone),
        ))
    }
}

/// Get the signed in user's entries for this month.
pub async fn get_entries_this_month(
    State(state): State<EntriesState>,
    user: SessionUser,
) -> Result<Response, Error> {
    let fetcher = state.fetcher(user)?;

    Ok(into_entries_response(fetcher.fetch_entries_this_month().await))
}

/// Get the signed in user's entries for last month.
pub async fn get_entries_last_month(
    State(state): State<EntriesState>,
    user: SessionUser,
) -> Result<Response, Error> {
    let fetcher = state.fetcher(user)?;

    Ok(into_entries_response(fetcher.fetch_entries_last_month().await))
}

/// No user is 204 No Content, rows are a JSON array and a failed read is a
/// 502 with the backend's error message.
fn into_entries_response(result: FetchResult) -> Response {
    match result {
        None => StatusCode::NO_CONTENT.into_response(),
        Some(Ok(rows)) => Json(rows).into_response(),
        Some(Err(error)) => Error::Query(error).into_response(),
    }
}
