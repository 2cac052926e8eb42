//! Session resolution: token -> verified claims -> live account.
//!
//! Read-only. Every failure after token verification collapses to a plain
//! `Unauthorized` so callers cannot probe which ids exist.

use sea_orm::ConnectionTrait;

use crate::auth::jwt::TokenCodec;
use crate::domain::AccountStatus;
use crate::error::AppError;
use crate::logging::security;
use crate::repos::accounts::{self, Account};

pub async fn resolve_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tokens: &TokenCodec,
    token: Option<&str>,
) -> Result<Account, AppError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        security::session_rejected("missing_token", None);
        return Err(AppError::unauthorized_missing_token());
    };

    let claims = tokens.verify(token).map_err(|e| {
        security::session_rejected("verification_failed", None);
        AppError::from(e)
    })?;

    let account = match accounts::find_by_id(conn, claims.id).await {
        Ok(account) => account,
        Err(e) => {
            let reason = if e.is_not_found() {
                "account_not_found"
            } else {
                "account_lookup_failed"
            };
            security::session_rejected(reason, Some(claims.id));
            return Err(AppError::unauthorized());
        }
    };

    if account.email != claims.email {
        security::session_rejected("email_mismatch", Some(account.id));
        return Err(AppError::unauthorized());
    }

    if account.status != AccountStatus::Active {
        security::session_rejected("account_deleted", Some(account.id));
        return Err(AppError::unauthorized());
    }

    Ok(account)
}
