#![allow(missing_docs)]

pub(crate) mod backend;
pub(crate) mod session;

use std::sync::Arc;

pub(crate) use backend::RecordingBackend;
pub(crate) use session::session_cookie;

use axum_test::TestServer;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{AppState, build_router, clock::FixedClock};

/// App state backed by an empty in-memory database, in UTC.
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, "42", "Etc/UTC").expect("Could not create app state")
}

/// Like [get_test_app_state], but the handlers see `now` as the current time.
pub(crate) fn get_test_app_state_at(now: OffsetDateTime) -> AppState {
    AppState {
        clock: Arc::new(FixedClock(now)),
        ..get_test_app_state()
    }
}

pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}
