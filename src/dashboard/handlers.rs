//! HTTP handler for the dashboard report endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{AppState, Error, dashboard::report::build_report, user::UserID};

use super::report::Report;

/// The state needed for serving the dashboard report.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string for a dashboard report request.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// The month number to report on, e.g. "6" or "06".
    pub month: String,
}

/// Parse a month number from a query-string value.
///
/// # Errors
/// Returns [Error::InvalidMonth] unless `raw` is a number between 1 and 12.
fn parse_month(raw: &str) -> Result<Month, Error> {
    raw.parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(|| Error::InvalidMonth(raw.to_owned()))
}

/// Serve the user's dashboard report for the requested month.
///
/// The user ID is taken from the request extension inserted by the auth
/// middleware, so this handler must only be mounted behind it.
///
/// # Errors
/// Returns an error response if:
/// - the month query parameter is not a number between 1 and 12,
/// - or any of the report queries fail.
pub async fn get_dashboard_report(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>, Error> {
    let month = parse_month(&query.month)?;

    // Hold the lock for all of the report's reads so the report is drawn from
    // one snapshot of the data.
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let report = build_report(user_id, month, &connection)?;

    Ok(Json(report))
}
