//! Account store (generic over ConnectionTrait).
//!
//! Lookups by id 0 or by an empty email resolve to `NotFound` without
//! issuing a query.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::accounts_sea as accounts_adapter;
use crate::domain::account_lifecycle::{self, AccountStatus, LifecycleEvent};
use crate::entities::accounts::{self, DbAccountStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Account domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub status: AccountStatus,
    pub number: i64,
    pub balance: i64,
    pub created_at: OffsetDateTime,
}

/// Fields for a new account; status and balance are fixed by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub number: i64,
    pub created_at: OffsetDateTime,
}

fn not_found(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Account, format!("Account {id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Account, DomainError> {
    if id == 0 {
        return Err(not_found(id));
    }
    accounts_adapter::find_by_id(conn, id)
        .await?
        .map(Account::from)
        .ok_or_else(|| not_found(id))
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Account, DomainError> {
    let not_found = || DomainError::not_found(NotFoundKind::Account, "Account not found");
    if email.is_empty() {
        return Err(not_found());
    }
    accounts_adapter::find_by_email(conn, email)
        .await?
        .map(Account::from)
        .ok_or_else(not_found)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Account>, DomainError> {
    let rows = accounts_adapter::list_all(conn).await?;
    Ok(rows.into_iter().map(Account::from).collect())
}

/// Insert and return the persisted row, including its assigned id.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewAccount,
) -> Result<Account, DomainError> {
    let model = accounts_adapter::create(
        conn,
        accounts_adapter::AccountCreate {
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            password_hash: new.password_hash,
            number: new.number,
            created_at: new.created_at,
        },
    )
    .await?;
    Ok(Account::from(model))
}

/// Active -> Deleted. A second call reports `AccountAlreadyDeleted`.
pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Account, DomainError> {
    apply(conn, id, LifecycleEvent::Delete).await
}

/// Deleted -> Active. Restoring an active account reports `AccountNotDeleted`.
pub async fn restore<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Account, DomainError> {
    apply(conn, id, LifecycleEvent::Restore).await
}

async fn apply<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    event: LifecycleEvent,
) -> Result<Account, DomainError> {
    let current = find_by_id(conn, id).await?;
    let next = account_lifecycle::transition(current.status, event)?;

    let changed = accounts_adapter::set_status_if(
        conn,
        id,
        DbAccountStatus::from(current.status),
        DbAccountStatus::from(next),
    )
    .await?;

    if changed == 0 {
        // Lost a race with another transition; judge against what is stored now.
        let latest = find_by_id(conn, id).await?;
        account_lifecycle::transition(latest.status, event)?;
        return Err(DomainError::conflict(
            ConflictKind::Other("StatusChanged".into()),
            "Account status changed concurrently",
        ));
    }

    Ok(Account {
        status: next,
        ..current
    })
}

// Conversions between SeaORM models and domain models

impl From<DbAccountStatus> for AccountStatus {
    fn from(value: DbAccountStatus) -> Self {
        match value {
            DbAccountStatus::Active => AccountStatus::Active,
            DbAccountStatus::Deleted => AccountStatus::Deleted,
        }
    }
}

impl From<AccountStatus> for DbAccountStatus {
    fn from(value: AccountStatus) -> Self {
        match value {
            AccountStatus::Active => DbAccountStatus::Active,
            AccountStatus::Deleted => DbAccountStatus::Deleted,
        }
    }
}

impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            password_hash: model.password_hash,
            status: model.status.into(),
            number: model.number,
            balance: model.balance,
            created_at: model.created_at,
        }
    }
}
