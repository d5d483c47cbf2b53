//! Implements a struct that holds the state of the REST server.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};

use crate::{
    Error,
    clock::{SharedClock, SystemClock},
    db::initialize,
    expense::SqliteExpenseBackend,
    spent::MonthlySpend,
    timezone::get_timezone,
    user::UserID,
};

/// One user's monthly total, locked separately from every other user's.
pub type UserSpending = Arc<tokio::sync::Mutex<MonthlySpend>>;

/// The monthly totals of the users that have used the API since the server started.
///
/// The map lock is only held to look up or insert a user's entry.
pub type SpendingByUser = Arc<tokio::sync::Mutex<HashMap<UserID, UserSpending>>>;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key used to decrypt the private session cookie.
    pub cookie_key: Key,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The backend holding the expense table.
    pub expense_backend: SqliteExpenseBackend,

    /// Cached monthly totals, one per signed in user.
    pub spending: SpendingByUser,

    /// Where the handlers read the current time from.
    pub clock: SharedClock,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the expense table.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the timezone is unknown.
    pub fn new(
        db_connection: Connection,
        cookie_secret: &str,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        get_timezone(local_timezone)?;
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            local_timezone: local_timezone.to_owned(),
            expense_backend: SqliteExpenseBackend::new(connection),
            spending: Arc::new(tokio::sync::Mutex::new(HashMap::new())),
            clock: Arc::new(SystemClock),
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
