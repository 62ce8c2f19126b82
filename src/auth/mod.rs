//! Cookie-based session authentication.
//!
//! A successful log-in seals a session token in an encrypted private cookie. The
//! [auth_guard] middleware resolves the caller's user ID from that cookie, or
//! rejects the request before any handler runs.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod token;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::post_log_in;
pub use log_out::get_log_out;
pub use middleware::auth_guard;

#[cfg(test)]
pub use cookie::COOKIE_TOKEN;
