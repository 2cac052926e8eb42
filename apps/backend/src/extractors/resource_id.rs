use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Numeric `{id}` path segment.
///
/// Non-numeric or negative values are 400 `INVALID_ID`. Zero is let through
/// so the store layer reports it as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl ResourceId {
    pub fn get(self) -> i64 {
        self.0
    }
}

fn parse(raw: Option<&str>) -> Result<ResourceId, AppError> {
    let raw = raw.ok_or_else(|| AppError::bad_request(ErrorCode::InvalidId, "Missing id"))?;
    let id = raw
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidId, format!("Invalid id: {raw}")))?;
    if id < 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidId,
            format!("Id must not be negative, got: {id}"),
        ));
    }
    Ok(ResourceId(id))
}

impl FromRequest for ResourceId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse(req.match_info().get("id")))
    }
}
