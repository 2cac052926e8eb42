//! Registration, credential checks and the account lifecycle.

use rand::Rng;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::password::CredentialVerifier;
use crate::domain::{account_lifecycle, validation, AccountStatus, LifecycleEvent};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::accounts::{self, Account, NewAccount};

/// Upper bound (exclusive) for generated account numbers.
const ACCOUNT_NUMBER_RANGE: i64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    verifier: &CredentialVerifier,
    input: Registration,
) -> Result<Account, AppError> {
    let first_name = validation::required("first_name", &input.first_name)?;
    let last_name = validation::required("last_name", &input.last_name)?;
    let email = validation::normalize_email(&input.email)?;
    if input.password.is_empty() {
        return Err(DomainError::validation_other("password is required").into());
    }

    match accounts::find_by_email(conn, &email).await {
        Ok(_) => {
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            )
            .into())
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let password_hash = verifier.hash(&input.password).map_err(|e| {
        warn!(error = %e, "Password hashing failed");
        AppError::internal("Failed to process password")
    })?;

    let number = rand::rng().random_range(0..ACCOUNT_NUMBER_RANGE);

    // The unique index still decides a race between two registrations.
    let account = accounts::create(
        conn,
        NewAccount {
            first_name,
            last_name,
            email,
            password_hash,
            number,
            created_at: OffsetDateTime::now_utc(),
        },
    )
    .await?;

    info!(
        account_id = account.id,
        email = %Redacted(&account.email),
        "Account registered"
    );
    Ok(account)
}

/// Resolve an account from presented credentials, whatever its status.
///
/// Unknown email, wrong password and an unreadable stored hash are
/// indistinguishable to the caller.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    verifier: &CredentialVerifier,
    email: &str,
    password: &str,
) -> Result<Account, AppError> {
    let email = email.trim().to_lowercase();

    let account = match accounts::find_by_email(conn, &email).await {
        Ok(account) => account,
        Err(e) if e.is_not_found() => {
            verifier.verify_dummy(password);
            security::login_failed("unknown_email", &email);
            return Err(AppError::invalid_credentials());
        }
        Err(e) => return Err(e.into()),
    };

    match verifier.verify(password, &account.password_hash) {
        Ok(true) => Ok(account),
        Ok(false) => {
            security::login_failed("password_mismatch", &email);
            Err(AppError::invalid_credentials())
        }
        Err(e) => {
            warn!(account_id = account.id, error = %e, "Stored password hash unusable");
            security::login_failed("malformed_hash", &email);
            Err(AppError::invalid_credentials())
        }
    }
}

/// Credential check for sign-in; deleted accounts are refused.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    verifier: &CredentialVerifier,
    email: &str,
    password: &str,
) -> Result<Account, AppError> {
    let account = authenticate(conn, verifier, email, password).await?;
    if account.status != AccountStatus::Active {
        security::login_failed("account_deleted", &account.email);
        return Err(DomainError::forbidden(
            ForbiddenKind::AccountDeleted,
            "Account has been deleted",
        )
        .into());
    }
    debug!(account_id = account.id, "Login succeeded");
    Ok(account)
}

pub async fn get_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Account, AppError> {
    Ok(accounts::find_by_id(conn, id).await?)
}

pub async fn list_accounts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Account>, AppError> {
    Ok(accounts::list(conn).await?)
}

/// Soft-delete `id` on behalf of `identity_id`. Only self-deletion is allowed.
///
/// An already deleted target is reported as such to any caller, ahead of the
/// ownership check; its status is readable through `GET /account/{id}` anyway.
pub async fn delete_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity_id: i64,
    id: i64,
) -> Result<Account, AppError> {
    let target = accounts::find_by_id(conn, id).await?;
    account_lifecycle::transition(target.status, LifecycleEvent::Delete)?;
    if target.id != identity_id {
        return Err(AppError::forbidden(
            ErrorCode::NotOwner,
            "Accounts can only delete themselves",
        ));
    }
    let account = accounts::soft_delete(conn, target.id).await?;
    security::account_status_changed(account.id, account.status.as_str());
    Ok(account)
}

/// Bring a deleted account back after re-checking its credentials.
pub async fn restore_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    verifier: &CredentialVerifier,
    email: &str,
    password: &str,
) -> Result<Account, AppError> {
    let account = authenticate(conn, verifier, email, password).await?;
    let restored = accounts::restore(conn, account.id).await?;
    security::account_status_changed(restored.id, restored.status.as_str());
    Ok(restored)
}
