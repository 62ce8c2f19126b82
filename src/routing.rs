//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    auth::{auth_guard, get_log_out, post_log_in},
    dashboard::get_dashboard_report,
    endpoints,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out));

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD, get(get_dashboard_report))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

/// The JSON 404 response for routes that do not exist.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "the requested resource could not be found" })),
    )
        .into_response()
}

#[cfg(test)]
mod route_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState, PasswordHash, ValidatedPassword,
        auth::COOKIE_TOKEN,
        transaction::{Transaction, TransactionType, create_transaction},
        user::create_user,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn, "wow what a secret").unwrap();

        {
            let connection = state.db_connection.lock().unwrap();
            // Use the minimum hashing cost to keep the test fast.
            let password_hash =
                PasswordHash::new(ValidatedPassword::new_unchecked("hunter2"), 4).unwrap();
            let user = create_user(password_hash, &connection).unwrap();

            create_transaction(
                Transaction::build(1000, date!(2024 - 06 - 03), TransactionType::Deposit, user.id)
                    .description("Salary"),
                &connection,
            )
            .unwrap();
            create_transaction(
                Transaction::build(200, date!(2024 - 06 - 10), TransactionType::Investment, user.id)
                    .description("Index fund"),
                &connection,
            )
            .unwrap();
            create_transaction(
                Transaction::build(300, date!(2024 - 06 - 21), TransactionType::Expense, user.id)
                    .description("Groceries")
                    .category("Food"),
                &connection,
            )
            .unwrap();
        }

        TestServer::new(build_router(state))
    }

    async fn log_in(server: &TestServer) -> axum_test::TestResponse {
        let response = server
            .post("/api/log_in")
            .json(&serde_json::json!({ "user_id": 1, "password": "hunter2" }))
            .await;

        response.assert_status_ok();
        response
    }

    #[tokio::test]
    async fn dashboard_requires_authentication() {
        let server = get_test_server();

        let response = server.get("/api/dashboard").add_query_param("month", "06").await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn dashboard_reports_month_after_log_in() {
        let server = get_test_server();
        let cookie = log_in(&server).await.cookie(COOKIE_TOKEN);

        let response = server
            .get("/api/dashboard")
            .add_query_param("month", "06")
            .add_cookie(cookie)
            .await;

        response.assert_status_ok();
        let json: serde_json::Value = response.json();
        assert_eq!(json["balance"], 500);
        assert_eq!(json["depositsTotal"], 1000);
        assert_eq!(json["investmentsTotal"], 200);
        assert_eq!(json["expensesTotal"], 300);
        assert_eq!(json["typePercentages"]["DEPOSIT"], 67);
        assert_eq!(json["typePercentages"]["INVESTMENT"], 13);
        assert_eq!(json["typePercentages"]["EXPENSE"], 20);
        assert_eq!(json["expensesPerCategory"][0]["category"], "Food");
        assert_eq!(json["expensesPerCategory"][0]["percentageOfTotal"], 100);
        assert_eq!(json["lastTransactions"].as_array().unwrap().len(), 3);
        assert_eq!(json["lastTransactions"][0]["description"], "Groceries");
    }

    #[tokio::test]
    async fn dashboard_rejects_invalid_month() {
        let server = get_test_server();
        let cookie = log_in(&server).await.cookie(COOKIE_TOKEN);

        let response = server
            .get("/api/dashboard")
            .add_query_param("month", "13")
            .add_cookie(cookie)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn log_out_clears_the_session_cookie() {
        let server = get_test_server();
        let cookie = log_in(&server).await.cookie(COOKIE_TOKEN);

        let response = server.get("/api/log_out").add_cookie(cookie).await;

        response.assert_status(axum::http::StatusCode::NO_CONTENT);
        // The cleared cookie is told to expire immediately on the client.
        let cleared = response.cookie(COOKIE_TOKEN);
        assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/doesnotexist").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn get_coffee() {
        let server = get_test_server();

        let response = server.get("/api/coffee").await;

        response.assert_status(axum::http::StatusCode::IM_A_TEAPOT);
    }
}
