//! Identity claims carried inside session tokens.

use serde::{Deserialize, Serialize};

/// The minimal verified facts about a caller: the account id and the
/// email the token was issued for.
///
/// Both fields are required and strictly typed on decode; a token whose
/// `id` is not an integer or that lacks `email` never produces a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub id: i64,
    pub email: String,
}

impl IdentityClaims {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
