//! Session gate for protected scopes.
//!
//! Reads the session token (the `token` cookie, or `Authorization: Bearer`
//! when no cookie is sent), resolves it to a live account and stores a
//! [`CurrentAccount`] in request extensions. Rejections are rendered here as
//! Problem Details and the wrapped service is never called.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::Span;

use crate::auth::session_cookie::SESSION_COOKIE;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::current_account::CurrentAccount;
use crate::services::session::resolve_session;
use crate::state::app_state::AppState;

pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let admitted = admit(&req).await;
            match admitted {
                Ok(account) => {
                    Span::current().record("account_id", account.id);
                    req.extensions_mut().insert(account);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

async fn admit(req: &ServiceRequest) -> Result<CurrentAccount, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("AppState not available"))?;
    let db = require_db(&state)?;

    let token = session_token(req);
    let account = resolve_session(db, &state.tokens, token.as_deref()).await?;

    Ok(CurrentAccount {
        id: account.id,
        email: account.email,
    })
}

/// Cookie first, then a well-formed bearer header. Anything else is absent.
fn session_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }
    bearer_token(req.headers().get(header::AUTHORIZATION))
}

fn bearer_token(value: Option<&HeaderValue>) -> Option<String> {
    let raw = value?.to_str().ok()?;
    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &'static str) -> HeaderValue {
        HeaderValue::from_static(raw)
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(
            bearer_token(Some(&header("Bearer abc.def.ghi"))).as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(bearer_token(Some(&header("bearer abc"))).as_deref(), Some("abc"));
        assert_eq!(bearer_token(Some(&header("Basic abc"))), None);
        assert_eq!(bearer_token(Some(&header("Bearer"))), None);
        assert_eq!(bearer_token(Some(&header("Bearer a b"))), None);
        assert_eq!(bearer_token(None), None);
    }
}
