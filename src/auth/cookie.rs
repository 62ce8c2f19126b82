//! Defines functions for handling user authentication with cookies.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::token::Token, user::UserID};

/// The name of the cookie holding the session token.
pub const COOKIE_TOKEN: &str = "token";

/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(30);

/// Add an auth cookie to the cookie jar, indicating that a user is logged in and authenticated.
///
/// Sets the initial expiry of the session to `duration` from the current time.
/// You can use [DEFAULT_COOKIE_DURATION] for the default duration.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if the session token cannot be
/// serialized.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = Token {
        user_id,
        expires_at: OffsetDateTime::now_utc() + duration,
    };

    Ok(jar.add(build_token_cookie(token)?))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the session token from the auth cookie in `jar`.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if the auth cookie is not in the cookie jar.
/// - [Error::InvalidCredentials] if the cookie does not hold a token or the
///   token has expired.
pub fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;

    let token: Token =
        serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::InvalidCredentials)?;

    if token.expires_at <= OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    Ok(token)
}

/// Set the expiry of the auth cookie in `jar` to the latest of UTC now
/// plus `duration` and the token's current expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::CookieMissing] if the auth cookie is not in the cookie jar.
/// - [Error::InvalidCredentials] if the cookie holds an invalid or expired token.
/// - [Error::JSONSerializationError] if the extended token cannot be serialized.
pub fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar)?;

    let expires_at = max(token.expires_at, OffsetDateTime::now_utc() + duration);

    Ok(jar.add(build_token_cookie(Token { expires_at, ..token })?))
}

fn build_token_cookie(token: Token) -> Result<Cookie<'static>, Error> {
    let value =
        serde_json::to_string(&token).map_err(|e| Error::JSONSerializationError(e.to_string()))?;

    Ok(Cookie::build((COOKIE_TOKEN, value))
        .expires(token.expires_at)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build())
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{Error, user::UserID};

    use super::{
        COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, extend_auth_cookie_duration_if_needed,
        get_token_from_cookies, invalidate_auth_cookie, set_auth_cookie,
    };

    fn get_test_jar() -> PrivateCookieJar {
        let hash = Sha512::digest("nafstenoas");
        PrivateCookieJar::new(Key::from(&hash))
    }

    #[test]
    fn set_and_get_token_round_trip() {
        let jar = get_test_jar();
        let user_id = UserID::new(7);

        let jar = set_auth_cookie(jar, user_id, DEFAULT_COOKIE_DURATION).unwrap();
        let token = get_token_from_cookies(&jar).unwrap();

        assert_eq!(token.user_id, user_id);
        assert!(token.expires_at > OffsetDateTime::now_utc());
    }

    #[test]
    fn get_token_fails_on_empty_jar() {
        let jar = get_test_jar();

        assert_eq!(get_token_from_cookies(&jar), Err(Error::CookieMissing));
    }

    #[test]
    fn get_token_fails_on_expired_token() {
        let jar = get_test_jar();

        let jar = set_auth_cookie(jar, UserID::new(7), Duration::minutes(-5)).unwrap();

        assert_eq!(
            get_token_from_cookies(&jar),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn get_token_fails_on_invalidated_cookie() {
        let jar = get_test_jar();

        let jar = set_auth_cookie(jar, UserID::new(7), DEFAULT_COOKIE_DURATION).unwrap();
        let jar = invalidate_auth_cookie(jar);

        assert_eq!(
            get_token_from_cookies(&jar),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn extend_pushes_expiry_forward() {
        let jar = get_test_jar();
        let jar = set_auth_cookie(jar, UserID::new(7), Duration::minutes(1)).unwrap();
        let short_expiry = get_token_from_cookies(&jar).unwrap().expires_at;

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::minutes(30)).unwrap();
        let extended_expiry = get_token_from_cookies(&jar).unwrap().expires_at;

        assert!(extended_expiry > short_expiry);
    }

    #[test]
    fn extend_never_shortens_expiry() {
        let jar = get_test_jar();
        let jar = set_auth_cookie(jar, UserID::new(7), Duration::hours(2)).unwrap();
        let long_expiry = get_token_from_cookies(&jar).unwrap().expires_at;

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::minutes(5)).unwrap();
        let expiry = get_token_from_cookies(&jar).unwrap().expires_at;

        assert_eq!(expiry, long_expiry);
    }

    #[test]
    fn auth_cookie_is_scoped_to_the_session() {
        let jar = get_test_jar();

        let jar = set_auth_cookie(jar, UserID::new(7), DEFAULT_COOKIE_DURATION).unwrap();
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
    }
}
