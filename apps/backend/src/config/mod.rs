//! Process configuration read once at startup.
//!
//! Only `main` (and tests) call into this module; everything below the
//! binary receives plain values.

pub mod db;
pub mod server;

use std::env;

use crate::error::AppError;

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

/// Optional variable parsed with `FromStr`; unset or empty yields `default`.
pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has an invalid value"))
        }),
        _ => Ok(default),
    }
}
