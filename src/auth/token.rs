//! Defines the session token that is sealed inside the auth cookie.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::user::UserID;

/// A token for authorization and authentication.
///
/// The token is stored as JSON in an encrypted private cookie. The expiry is
/// serialized as a unix timestamp so that it round-trips exactly.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Token {
    /// The ID of the logged-in user.
    pub user_id: UserID,
    /// When the session stops being valid.
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}
