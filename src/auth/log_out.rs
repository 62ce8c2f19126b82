//! This file defines the log-out endpoint.

use axum::http::StatusCode;
use axum_extra::extract::PrivateCookieJar;

use crate::auth::invalidate_auth_cookie;

/// Handler for log-out requests.
///
/// Invalidates the session cookie. Logging out without being logged in is not
/// an error, the cookie is cleared either way.
pub async fn get_log_out(jar: PrivateCookieJar) -> (PrivateCookieJar, StatusCode) {
    (invalidate_auth_cookie(jar), StatusCode::NO_CONTENT)
}
