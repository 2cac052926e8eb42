//! SeaORM adapter for the expense table.
//!
//! Mutations are always filtered by owner as well as id.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::expenses;

pub mod dto;

pub use dto::{ExpenseCreate, ExpenseUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<expenses::Model>, sea_orm::DbErr> {
    expenses::Entity::find_by_id(id).one(conn).await
}

pub async fn list_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
) -> Result<Vec<expenses::Model>, sea_orm::DbErr> {
    expenses::Entity::find()
        .filter(expenses::Column::UserId.eq(owner_id))
        .order_by_asc(expenses::Column::Id)
        .all(conn)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ExpenseCreate,
) -> Result<expenses::Model, sea_orm::DbErr> {
    expenses::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        expense_name: Set(dto.expense_name),
        expense_purpose: Set(dto.expense_purpose),
        expense_category: Set(dto.expense_category),
        expense_value: Set(dto.expense_value),
        created_at: Set(dto.created_at),
        updated_at: Set(dto.updated_at),
    }
    .insert(conn)
    .await
}

/// Returns rows affected; 0 when `id` does not exist or belongs to someone else.
pub async fn update_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    id: i64,
    dto: ExpenseUpdate,
) -> Result<u64, sea_orm::DbErr> {
    let result = expenses::Entity::update_many()
        .col_expr(expenses::Column::ExpenseName, Expr::value(dto.expense_name))
        .col_expr(
            expenses::Column::ExpensePurpose,
            Expr::value(dto.expense_purpose),
        )
        .col_expr(
            expenses::Column::ExpenseCategory,
            Expr::value(dto.expense_category),
        )
        .col_expr(expenses::Column::ExpenseValue, Expr::value(dto.expense_value))
        .col_expr(expenses::Column::CreatedAt, Expr::value(dto.created_at))
        .col_expr(expenses::Column::UpdatedAt, Expr::value(dto.updated_at))
        .filter(expenses::Column::Id.eq(id))
        .filter(expenses::Column::UserId.eq(owner_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Returns rows affected; 0 when `id` does not exist or belongs to someone else.
pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: i64,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = expenses::Entity::delete_many()
        .filter(expenses::Column::Id.eq(id))
        .filter(expenses::Column::UserId.eq(owner_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
