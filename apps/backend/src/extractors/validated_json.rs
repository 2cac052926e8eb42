use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// JSON body extractor whose failures render as Problem Details.
///
/// Unparseable bodies are 400 `BAD_REQUEST`; well-formed JSON with missing
/// or mistyped fields is 400 `VALIDATION_ERROR`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(
                        trace_id = %trace_ctx::trace_id(),
                        error = %e,
                        "Failed to read request body"
                    );
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    // serde messages can echo field values back
                    debug!(
                        trace_id = %trace_ctx::trace_id(),
                        error = %Redacted(&e.to_string()),
                        body_size = body.len(),
                        "Rejected JSON body"
                    );
                    json_error(&e)
                })
        })
    }
}

fn json_error(error: &serde_json::Error) -> AppError {
    match error.classify() {
        Category::Data => AppError::invalid(
            ErrorCode::ValidationError,
            "Missing or mistyped fields in request body",
        ),
        Category::Syntax => AppError::bad_request(
            ErrorCode::BadRequest,
            format!("Invalid JSON at line {}", error.line()),
        ),
        Category::Eof => {
            AppError::bad_request(ErrorCode::BadRequest, "Invalid JSON: unexpected end of input")
        }
        Category::Io => AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body"),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Login {
        email: String,
        password: String,
    }

    fn error_for(raw: &str) -> AppError {
        json_error(&serde_json::from_str::<Login>(raw).unwrap_err())
    }

    #[test]
    fn syntax_errors_are_bad_request() {
        assert_eq!(error_for(r#"{"email": }"#).code(), ErrorCode::BadRequest);
        assert_eq!(error_for(r#"{"email": "a""#).code(), ErrorCode::BadRequest);
    }

    #[test]
    fn shape_errors_are_validation_errors() {
        let err = error_for(r#"{"email": 5, "password": "x"}"#);
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let err = error_for(r#"{"email": "a@x.com"}"#);
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.status().as_u16(), 400);
    }
}
