use std::time::SystemTime;

use actix_web::{web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::auth::claims::IdentityClaims;
use crate::auth::session_cookie::{clear_session_cookie, session_cookie};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::routes::accounts::AccountView;
use crate::services::accounts::{self as account_service, Registration};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Render `err` and drop whatever session cookie the client holds.
fn clearing_session(err: AppError, security: &SecurityConfig) -> HttpResponse {
    let mut response = err.error_response();
    if let Err(e) = response.add_cookie(&clear_session_cookie(security)) {
        warn!(error = %e, "Failed to attach session removal cookie");
    }
    response
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();

    let account = account_service::register(
        db,
        &app_state.credentials,
        Registration {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
        },
    )
    .await?;

    Ok(HttpResponse::Accepted().json(AccountView::from(account)))
}

async fn login(
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    let outcome =
        account_service::login(db, &app_state.credentials, &body.email, &body.password).await;
    let account = match outcome {
        Ok(account) => account,
        Err(err) => return Ok(clearing_session(err, &app_state.security)),
    };

    let claims = IdentityClaims::new(account.id, account.email.clone());
    let token = app_state.tokens.issue(&claims, SystemTime::now())?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, &app_state.security))
        .json(LoginResponse {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
        }))
}

/// Stateless: there is nothing to revoke server-side.
async fn logout(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .cookie(clear_session_cookie(&app_state.security))
        .json(json!({ "logged_out": true })))
}

/// Restore a deleted account; authenticated by credentials, not by session.
async fn restore(
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let account =
        account_service::restore_account(db, &app_state.credentials, &body.email, &body.password)
            .await?;
    Ok(HttpResponse::Ok().json(AccountView::from(account)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/account/restore", web::post().to(restore));
}
