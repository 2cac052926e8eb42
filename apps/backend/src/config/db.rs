use std::env;

use super::must_var;
use crate::error::AppError;

/// Resolve the Postgres connection URL.
///
/// `DATABASE_URL` wins when set; otherwise the URL is assembled from
/// `POSTGRES_HOST` (default `localhost`), `POSTGRES_PORT` (default `5432`),
/// `POSTGRES_USER`, `POSTGRES_PASSWORD` and `POSTGRES_DB`.
pub fn db_url() -> Result<String, AppError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;
    let db_name = must_var("POSTGRES_DB")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::db_url;
    use crate::errors::ErrorCode;

    const VARS: &[&str] = &[
        "DATABASE_URL",
        "POSTGRES_HOST",
        "POSTGRES_PORT",
        "POSTGRES_USER",
        "POSTGRES_PASSWORD",
        "POSTGRES_DB",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn assembles_url_from_postgres_vars() {
        clear_env();
        env::set_var("POSTGRES_USER", "bank");
        env::set_var("POSTGRES_PASSWORD", "pw");
        env::set_var("POSTGRES_DB", "pocketbank");

        assert_eq!(
            db_url().unwrap(),
            "postgresql://bank:pw@localhost:5432/pocketbank"
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn database_url_takes_precedence() {
        clear_env();
        env::set_var("DATABASE_URL", "postgresql://x:y@db:6543/other");
        env::set_var("POSTGRES_USER", "ignored");

        assert_eq!(db_url().unwrap(), "postgresql://x:y@db:6543/other");
        clear_env();
    }

    #[test]
    #[serial]
    fn missing_credentials_is_config_error() {
        clear_env();
        let err = db_url().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
        assert!(err.detail().contains("POSTGRES_USER"));
    }
}
