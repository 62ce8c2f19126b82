//! This file defines the log-in endpoint.
//! The rest of the auth module handles the lower level token and cookie logic.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error,
    auth::{DEFAULT_COOKIE_DURATION, set_auth_cookie},
    user::{UserID, get_user_by_id},
};

/// The credentials sent by the client to log in.
#[derive(Debug, Deserialize)]
pub struct LogInData {
    /// The ID of the user logging in.
    pub user_id: i64,
    /// The user's password in plain text.
    pub password: String,
}

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl LoginState {
    /// Create the log-in state with the default cookie duration.
    pub fn new(cookie_key: Key, db_connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            cookie_key,
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection,
        }
    }
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in the auth cookie is set and the logged-in user ID is
/// echoed back. The client must present the cookie on subsequent requests.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The user ID is unknown or the password is not correct (both reported as
///   [Error::InvalidCredentials] so the response does not reveal which).
/// - An internal error occurred when verifying the password.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Json(log_in_data): Json<LogInData>,
) -> Result<(PrivateCookieJar, Json<serde_json::Value>), Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_by_id(UserID::new(log_in_data.user_id), &connection).map_err(
            |error| match error {
                Error::NotFound => Error::InvalidCredentials,
                error => error,
            },
        )?
    };

    let is_password_valid = user
        .password_hash
        .verify(&log_in_data.password)
        .map_err(|error| {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            Error::HashingError(error.to_string())
        })?;

    if !is_password_valid {
        return Err(Error::InvalidCredentials);
    }

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration)?;
    tracing::info!("user {} logged in", user.id);

    Ok((
        jar,
        Json(serde_json::json!({ "userId": user.id.as_i64() })),
    ))
}
