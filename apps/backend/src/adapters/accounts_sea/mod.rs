//! SeaORM adapter for the account table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::accounts::{self, DbAccountStatus};

pub mod dto;

pub use dto::AccountCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find()
        .filter(accounts::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find()
        .order_by_asc(accounts::Column::Id)
        .all(conn)
        .await
}

/// New accounts always start `Active` with a zero balance.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AccountCreate,
) -> Result<accounts::Model, sea_orm::DbErr> {
    accounts::ActiveModel {
        id: NotSet,
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        status: Set(DbAccountStatus::Active),
        number: Set(dto.number),
        balance: Set(0),
        created_at: Set(dto.created_at),
    }
    .insert(conn)
    .await
}

/// Compare-and-set on `status`. Returns the number of rows changed, so a
/// concurrent transition shows up as 0 instead of being overwritten.
pub async fn set_status_if<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected: DbAccountStatus,
    next: DbAccountStatus,
) -> Result<u64, sea_orm::DbErr> {
    let result = accounts::Entity::update_many()
        .col_expr(accounts::Column::Status, Expr::value(next.to_value()))
        .filter(accounts::Column::Id.eq(id))
        .filter(accounts::Column::Status.eq(expected.to_value()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
