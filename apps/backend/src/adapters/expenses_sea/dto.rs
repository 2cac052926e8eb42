//! DTOs for the expenses adapter.

use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct ExpenseCreate {
    pub user_id: i64,
    pub expense_name: String,
    pub expense_purpose: String,
    pub expense_category: String,
    pub expense_value: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Full replacement of the mutable columns.
#[derive(Debug, Clone)]
pub struct ExpenseUpdate {
    pub expense_name: String,
    pub expense_purpose: String,
    pub expense_category: String,
    pub expense_value: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
