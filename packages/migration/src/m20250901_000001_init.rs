use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Account {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Status,
    Number,
    Balance,
    CreatedAt,
}

#[derive(Iden)]
enum Expense {
    Table,
    Id,
    UserId,
    ExpenseName,
    ExpensePurpose,
    ExpenseCategory,
    ExpenseValue,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // account
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Account::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Account::LastName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Account::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Account::PasswordHash).text().not_null())
                    // "Active" | "Deleted"; kept as text so both backends share one schema
                    .col(
                        ColumnDef::new(Account::Status)
                            .string_len(16)
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(Account::Number).big_integer().not_null())
                    .col(
                        ColumnDef::new(Account::Balance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Account::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // expense
        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expense::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Expense::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Expense::ExpenseName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Expense::ExpensePurpose)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expense::ExpenseCategory)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expense::ExpenseValue).double().not_null())
                    .col(
                        ColumnDef::new(Expense::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expense::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_user_id")
                            .from(Expense::Table, Expense::UserId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_expense_user_id")
                    .table(Expense::Table)
                    .col(Expense::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expense::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
