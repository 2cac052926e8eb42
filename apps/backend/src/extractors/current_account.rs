use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::error::AppError;

/// The account admitted by the session gate for this request.
///
/// Only the gate inserts this into request extensions. A handler mounted
/// outside a gated scope gets 401 rather than an anonymous caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentAccount {
    pub id: i64,
    pub email: String,
}

impl FromRequest for CurrentAccount {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentAccount>()
                .cloned()
                .ok_or_else(AppError::unauthorized),
        )
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;
    use crate::errors::ErrorCode;

    #[actix_web::test]
    async fn absent_without_gate() {
        let req = TestRequest::default().to_http_request();
        let err = CurrentAccount::extract(&req).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[actix_web::test]
    async fn present_after_gate() {
        let req = TestRequest::default().to_http_request();
        let account = CurrentAccount {
            id: 7,
            email: "a@x.com".into(),
        };
        req.extensions_mut().insert(account.clone());
        assert_eq!(CurrentAccount::extract(&req).await.unwrap(), account);
    }
}
