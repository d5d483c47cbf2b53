//! Expense Tracker keeps a running total of what a user has spent this month
//! and serves their expense entries month by month.
//!
//! The expenses live in a hosted `expense` table that this library only reads
//! through the [ExpenseBackend] trait. The library also provides a JSON API
//! over that table, see [build_router].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod clock;
mod db;
mod endpoints;
mod entries;
mod expense;
mod logging;
mod month_window;
mod not_found;
mod routing;
mod session;
mod spent;
mod timezone;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use clock::{Clock, FixedClock, LocalCalendar, SharedClock, SystemClock};
pub use db::initialize as initialize_db;
pub use entries::{EntryFetcher, FetchResult};
pub use expense::{
    ExpenseBackend, ExpenseQuery, ExpenseRow, QueryError, Selection, SqliteExpenseBackend,
    create_expense, total_price,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month_window::MonthWindow;
pub use routing::build_router;
pub use session::{SessionError, SessionUser, Token};
pub use spent::MonthlySpend;
pub use timezone::get_timezone;
pub use user::{CurrentUser, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request needs a signed in user and there is none.
    #[error("no user is signed in")]
    NotAuthenticated,

    /// Adding the amount would take the monthly total past the largest finite float.
    #[error("adding {0} would make the monthly total too large to represent")]
    TotalOutOfRange(f64),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A read of the expense table failed.
    ///
    /// The message is passed on to the client, which decides how to show it.
    #[error("{0}")]
    Query(#[from] QueryError),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::NotAuthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, "not found".to_owned()),
            Error::TotalOutOfRange(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Query(ref error) => {
                tracing::error!("Error fetching expenses: {error}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            Error::InvalidTimezoneError(ref timezone) => {
                tracing::error!("Could not get local timezone \"{timezone}\"");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                )
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
