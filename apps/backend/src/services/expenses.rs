//! Expense operations scoped to the authenticated account.
//!
//! Every function takes the owner from the resolved session identity. Update
//! and delete load the row, check ownership, then write with an owner filter.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::debug;

use crate::domain::{ownership, validation};
use crate::error::AppError;
use crate::repos::expenses::{self, Expense, ExpenseFields};

/// Client-supplied expense fields before validation.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub name: String,
    pub purpose: String,
    pub category: String,
    pub value: f64,
    pub created_at: Option<OffsetDateTime>,
}

fn validate(input: ExpenseInput, now: OffsetDateTime) -> Result<ExpenseFields, AppError> {
    Ok(ExpenseFields {
        name: validation::required("expense_name", &input.name)?,
        purpose: input.purpose.trim().to_string(),
        category: input.category.trim().to_string(),
        value: validation::finite_amount("expense_value", input.value)?,
        created_at: input.created_at.unwrap_or(now),
    })
}

pub async fn create_expense<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity_id: i64,
    input: ExpenseInput,
) -> Result<Expense, AppError> {
    let now = OffsetDateTime::now_utc();
    let fields = validate(input, now)?;
    let expense = expenses::create(conn, identity_id, fields, now).await?;
    debug!(expense_id = expense.id, owner_id = identity_id, "Expense created");
    Ok(expense)
}

pub async fn list_expenses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity_id: i64,
) -> Result<Vec<Expense>, AppError> {
    Ok(expenses::list_by_owner(conn, identity_id).await?)
}

pub async fn update_expense<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity_id: i64,
    id: i64,
    input: ExpenseInput,
) -> Result<Expense, AppError> {
    let existing = expenses::find_by_id(conn, id).await?;
    ownership::ensure_owner(existing.owner_id, identity_id)?;

    let now = OffsetDateTime::now_utc();
    let fields = validate(input, now)?;
    Ok(expenses::update_owned(conn, identity_id, id, fields, now).await?)
}

pub async fn delete_expense<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity_id: i64,
    id: i64,
) -> Result<(), AppError> {
    let existing = expenses::find_by_id(conn, id).await?;
    ownership::ensure_owner(existing.owner_id, identity_id)?;
    expenses::delete_owned(conn, identity_id, id).await?;
    debug!(expense_id = id, owner_id = identity_id, "Expense deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use time::macros::datetime;

    use super::*;
    use crate::entities::expenses as expense_entity;
    use crate::errors::ErrorCode;

    fn input() -> ExpenseInput {
        ExpenseInput {
            name: "Rent".into(),
            purpose: "Flat".into(),
            category: "Housing".into(),
            value: 900.0,
            created_at: None,
        }
    }

    #[test]
    fn created_at_defaults_to_now() {
        let now = datetime!(2025-03-01 12:00 UTC);
        let fields = validate(input(), now).unwrap();
        assert_eq!(fields.created_at, now);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut bad = input();
        bad.name = "  ".into();
        let err = validate(bad, OffsetDateTime::now_utc()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn foreign_expense_is_not_written() {
        let row = expense_entity::Model {
            id: 3,
            user_id: 2,
            expense_name: "Theirs".into(),
            expense_purpose: String::new(),
            expense_category: String::new(),
            expense_value: 1.0,
            created_at: datetime!(2025-01-01 0:00 UTC),
            updated_at: datetime!(2025-01-01 0:00 UTC),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let err = delete_expense(&db, 1, 3).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotOwner);

        // Only the ownership lookup ran.
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
