//! DTOs for the accounts adapter.

use time::OffsetDateTime;

/// Columns supplied at registration; `id` is assigned by the store.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub number: i64,
    pub created_at: OffsetDateTime,
}
