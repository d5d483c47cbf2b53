//! Route handlers for reading, adding to and refreshing the monthly total.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::{SpendingByUser, UserSpending},
    clock::{LocalCalendar, SharedClock},
    expense::SqliteExpenseBackend,
    session::SessionUser,
    timezone::get_timezone,
    user::{CurrentUser, UserID},
};

/// The state needed by the monthly total endpoints.
#[derive(Debug, Clone)]
pub struct SpentState {
    /// The backend holding the expense table.
    pub expense_backend: SqliteExpenseBackend,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// Cached monthly totals, one per signed in user.
    pub spending: SpendingByUser,
    /// Where the current time is read from.
    pub clock: SharedClock,
}

impl FromRef<AppState> for SpentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_backend: state.expense_backend.clone(),
            local_timezone: state.local_timezone.clone(),
            spending: state.spending.clone(),
            clock: state.clock.clone(),
        }
    }
}

/// The body of every monthly total response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpentResponse {
    /// The cached total for this month.
    pub spent: f64,
}

/// The body of a request to add to the monthly total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddSpentRequest {
    /// The amount to add. May be negative.
    pub amount: f64,
}

/// The total for `user_id`, created at zero on first use.
async fn spending_for(spending: &SpendingByUser, user_id: UserID) -> UserSpending {
    spending.lock().await.entry(user_id).or_default().clone()
}

/// Get the cached total for the signed in user, zero if there is none yet.
pub async fn get_spent(State(state): State<SpentState>, user: SessionUser) -> Json<SpentResponse> {
    let user_spending = match user.current_user() {
        Some(user_id) => state.spending.lock().await.get(&user_id).cloned(),
        None => None,
    };

    let spent = match user_spending {
        Some(user_spending) => user_spending.lock().await.spent(),
        None => 0.0,
    };

    Json(SpentResponse { spent })
}

/// Add an amount to the signed in user's cached total.
///
/// Anonymous requests have no total to add to and are rejected. So are
/// amounts that would overflow the total, which is left unchanged.
pub async fn add_spent(
    State(state): State<SpentState>,
    user: SessionUser,
    Json(request): Json<AddSpentRequest>,
) -> Result<Json<SpentResponse>, Error> {
    let user_id = user.current_user().ok_or(Error::NotAuthenticated)?;

    let user_spending = spending_for(&state.spending, user_id).await;
    let mut total = user_spending.lock().await;

    if !(total.spent() + request.amount).is_finite() {
        return Err(Error::TotalOutOfRange(request.amount));
    }

    total.add_spent(request.amount);

    Ok(Json(SpentResponse {
        spent: total.spent(),
    }))
}

/// Recompute the signed in user's total for this month and return it.
///
/// Without a signed in user nothing is queried and the total is zero. A failed
/// backend read is logged and the previous total is returned. Only this
/// user's total is locked while the backend is read.
pub async fn refresh_spent(
    State(state): State<SpentState>,
    user: SessionUser,
) -> Result<Json<SpentResponse>, Error> {
    let Some(user_id) = user.current_user() else {
        return Ok(Json(SpentResponse { spent: 0.0 }));
    };

    let timezone = get_timezone(&state.local_timezone)?;
    let calendar = LocalCalendar::new(state.clock, timezone);

    let user_spending = spending_for(&state.spending, user_id).await;
    let mut total = user_spending.lock().await;
    total
        .refresh(&state.expense_backend, &user, &calendar)
        .await;

    Ok(Json(SpentResponse {
        spent: total.spent(),
    }))
}
