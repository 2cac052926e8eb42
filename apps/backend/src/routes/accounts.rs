use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;
use time::OffsetDateTime;

use crate::auth::session_cookie::clear_session_cookie;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentAccount, ResourceId};
use crate::repos::accounts::Account;
use crate::services::accounts as account_service;
use crate::state::app_state::AppState;

/// Public shape of an account. The password hash never leaves the service.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: &'static str,
    pub number: i64,
    pub balance: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            status: account.status.as_str(),
            number: account.number,
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}

pub async fn me(
    current: CurrentAccount,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let account = account_service::get_account(db, current.id).await?;
    Ok(HttpResponse::Ok().json(AccountView::from(account)))
}

pub async fn list_accounts(
    _current: CurrentAccount,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let accounts: Vec<AccountView> = account_service::list_accounts(db)
        .await?
        .into_iter()
        .map(AccountView::from)
        .collect();
    Ok(HttpResponse::Ok().json(accounts))
}

async fn get_account(
    _current: CurrentAccount,
    id: ResourceId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let account = account_service::get_account(db, id.get()).await?;
    Ok(HttpResponse::Ok().json(AccountView::from(account)))
}

/// Soft-delete the caller's own account and end the session.
async fn delete_account(
    current: CurrentAccount,
    id: ResourceId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let account = account_service::delete_account(db, current.id, id.get()).await?;
    Ok(HttpResponse::Ok()
        .cookie(clear_session_cookie(&app_state.security))
        .json(json!({ "deleted": account.id })))
}

/// `/account/{id}`; mounted behind the session gate.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_account))
            .route(web::delete().to(delete_account)),
    );
}
