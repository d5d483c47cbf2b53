//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    endpoints,
    entries::{get_entries_last_month, get_entries_this_month},
    not_found::get_404_not_found,
    spent::{add_spent, get_spent, refresh_spent},
};

/// Return a router with all the app's routes.
///
/// Every route works out the signed in user from the session cookie itself,
/// anonymous requests get the empty answer for that route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::SPENT, get(get_spent).post(add_spent))
        .route(endpoints::SPENT_REFRESH, post(refresh_spent))
        .route(endpoints::ENTRIES_THIS_MONTH, get(get_entries_this_month))
        .route(endpoints::ENTRIES_LAST_MONTH, get(get_entries_last_month))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints,
        test_utils::{get_test_app_state, get_test_server},
    };

    #[tokio::test]
    async fn coffee_is_a_teapot() {
        let server = get_test_server(get_test_app_state());

        server
            .get(endpoints::COFFEE)
            .await
            .assert_status(StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server(get_test_app_state());

        let response = server.get("/api/nope").await;

        response.assert_status_not_found();
        response.assert_json(&serde_json::json!({ "error": "not found" }));
    }
}
