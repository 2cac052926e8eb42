use std::env;

use super::parse_var;
use crate::error::AppError;

const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];

/// Bind address and browser-facing settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var("BACKEND_PORT", 3000u16)?;
        let cors_allowed_origins =
            parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }
}

/// Comma-separated origins; empty, `null` and non-http(s) entries are
/// dropped. Falls back to the local dev front end when nothing is left.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::{parse_origins, ServerConfig};
    use crate::errors::ErrorCode;

    #[test]
    fn parse_origins_filters_junk() {
        let parsed = parse_origins(" https://app.example.com/ , null, ftp://x, ,http://localhost:5173");
        assert_eq!(
            parsed,
            vec!["https://app.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn parse_origins_falls_back_to_dev_front_end() {
        assert_eq!(
            parse_origins(""),
            vec!["http://localhost:5173", "http://127.0.0.1:5173"]
        );
    }

    #[test]
    #[serial]
    fn invalid_port_is_config_error() {
        env::set_var("BACKEND_PORT", "not-a-port");
        let err = ServerConfig::from_env().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
        env::remove_var("BACKEND_PORT");
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        env::remove_var("BACKEND_HOST");
        env::remove_var("BACKEND_PORT");
        env::remove_var("CORS_ALLOWED_ORIGINS");
        let cfg = ServerConfig::from_env().unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.cors_allowed_origins.len(), 2);
    }
}
