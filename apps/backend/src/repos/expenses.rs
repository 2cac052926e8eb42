//! Expense store (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::expenses_sea as expenses_adapter;
use crate::entities::expenses;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Expense domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub purpose: String,
    pub category: String,
    pub value: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Caller-editable fields. The owner never comes from here.
#[derive(Debug, Clone)]
pub struct ExpenseFields {
    pub name: String,
    pub purpose: String,
    pub category: String,
    pub value: f64,
    pub created_at: OffsetDateTime,
}

fn not_found(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Expense, format!("Expense {id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Expense, DomainError> {
    if id == 0 {
        return Err(not_found(id));
    }
    expenses_adapter::find_by_id(conn, id)
        .await?
        .map(Expense::from)
        .ok_or_else(|| not_found(id))
}

pub async fn list_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
) -> Result<Vec<Expense>, DomainError> {
    let rows = expenses_adapter::list_by_owner(conn, owner_id).await?;
    Ok(rows.into_iter().map(Expense::from).collect())
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    fields: ExpenseFields,
    now: OffsetDateTime,
) -> Result<Expense, DomainError> {
    let model = expenses_adapter::create(
        conn,
        expenses_adapter::ExpenseCreate {
            user_id: owner_id,
            expense_name: fields.name,
            expense_purpose: fields.purpose,
            expense_category: fields.category,
            expense_value: fields.value,
            created_at: fields.created_at,
            updated_at: now,
        },
    )
    .await?;
    Ok(Expense::from(model))
}

/// Replace the editable fields of an expense held by `owner_id`.
///
/// Zero affected rows means the row vanished or changed hands between the
/// caller's ownership check and this write; both report `NotFound`.
pub async fn update_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    id: i64,
    fields: ExpenseFields,
    now: OffsetDateTime,
) -> Result<Expense, DomainError> {
    let changed = expenses_adapter::update_owned(
        conn,
        owner_id,
        id,
        expenses_adapter::ExpenseUpdate {
            expense_name: fields.name,
            expense_purpose: fields.purpose,
            expense_category: fields.category,
            expense_value: fields.value,
            created_at: fields.created_at,
            updated_at: now,
        },
    )
    .await?;
    if changed == 0 {
        return Err(not_found(id));
    }
    find_by_id(conn, id).await
}

pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    id: i64,
) -> Result<(), DomainError> {
    let changed = expenses_adapter::delete_owned(conn, owner_id, id).await?;
    if changed == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

impl From<expenses::Model> for Expense {
    fn from(model: expenses::Model) -> Self {
        Self {
            id: model.id,
            owner_id: model.user_id,
            name: model.expense_name,
            purpose: model.expense_purpose,
            category: model.expense_category,
            value: model.expense_value,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
