use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentAccount, ResourceId, ValidatedJson};
use crate::repos::expenses::Expense;
use crate::services::expenses::{self as expense_service, ExpenseInput};
use crate::state::app_state::AppState;

/// Body for create and full-replace update.
///
/// Unknown fields are ignored, so a client-sent `user_id` or `owner_id`
/// has no effect; the owner is always the session's account.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    pub expense_name: String,
    #[serde(default)]
    pub expense_purpose: String,
    #[serde(default)]
    pub expense_category: String,
    pub expense_value: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<ExpenseRequest> for ExpenseInput {
    fn from(req: ExpenseRequest) -> Self {
        Self {
            name: req.expense_name,
            purpose: req.expense_purpose,
            category: req.expense_category,
            value: req.expense_value,
            created_at: req.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseView {
    pub id: i64,
    pub user_id: i64,
    pub expense_name: String,
    pub expense_purpose: String,
    pub expense_category: String,
    pub expense_value: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Expense> for ExpenseView {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            user_id: expense.owner_id,
            expense_name: expense.name,
            expense_purpose: expense.purpose,
            expense_category: expense.category,
            expense_value: expense.value,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

async fn create_expense(
    current: CurrentAccount,
    body: ValidatedJson<ExpenseRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let expense =
        expense_service::create_expense(db, current.id, body.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(ExpenseView::from(expense)))
}

async fn list_expenses(
    current: CurrentAccount,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let expenses: Vec<ExpenseView> = expense_service::list_expenses(db, current.id)
        .await?
        .into_iter()
        .map(ExpenseView::from)
        .collect();
    Ok(HttpResponse::Ok().json(expenses))
}

async fn update_expense(
    current: CurrentAccount,
    id: ResourceId,
    body: ValidatedJson<ExpenseRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let expense =
        expense_service::update_expense(db, current.id, id.get(), body.into_inner().into())
            .await?;
    Ok(HttpResponse::Ok().json(ExpenseView::from(expense)))
}

async fn delete_expense(
    current: CurrentAccount,
    id: ResourceId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    expense_service::delete_expense(db, current.id, id.get()).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": id.get() })))
}

/// `/expense` and `/expense/{id}`; mounted behind the session gate.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_expenses))
            .route(web::post().to(create_expense)),
    )
    .service(
        web::resource("/{id}")
            .route(web::post().to(update_expense))
            .route(web::put().to(update_expense))
            .route(web::delete().to(delete_expense)),
    );
}
