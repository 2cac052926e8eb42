use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::config::{must_var, parse_var};
use crate::error::AppError;

/// Thirty days, matching the session cookie lifetime.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Ten years; keeps `iat + ttl` and the cookie Max-Age well inside `i64`.
pub const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Flags for the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSettings {
    /// Emit `Secure` and `SameSite=None` for a front end on another origin.
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self { secure: true }
    }
}

/// Configuration for session token security
#[derive(Clone)]
pub struct SecurityConfig {
    /// Shared secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Pinned signing algorithm (HS256)
    pub algorithm: Algorithm,
    /// Token expiry and cookie Max-Age
    pub session_ttl: Duration,
    pub cookie: CookieSettings,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("session_ttl", &self.session_ttl)
            .field("cookie", &self.cookie)
            .finish()
    }
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secret and default lifetimes
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            session_ttl: DEFAULT_SESSION_TTL,
            cookie: CookieSettings::default(),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_cookie(mut self, cookie: CookieSettings) -> Self {
        self.cookie = cookie;
        self
    }

    /// Read `JWT_SECRET` (required), `SESSION_TTL_SECS` and `COOKIE_SECURE`.
    ///
    /// A missing or empty secret is a configuration error; there is no
    /// fallback secret.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = must_var("JWT_SECRET")?;
        let ttl_secs = parse_var("SESSION_TTL_SECS", DEFAULT_SESSION_TTL.as_secs())?;
        if ttl_secs == 0 || ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(AppError::config(format!(
                "SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}"
            )));
        }
        let secure = parse_var("COOKIE_SECURE", true)?;

        Ok(Self::new(secret.into_bytes())
            .with_session_ttl(Duration::from_secs(ttl_secs))
            .with_cookie(CookieSettings { secure }))
    }

    /// Random secret per call; tests never share signing keys by accident.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::time::Duration;

    use serial_test::serial;

    use super::{SecurityConfig, DEFAULT_SESSION_TTL};
    use crate::errors::ErrorCode;

    fn clear_env() {
        env::remove_var("JWT_SECRET");
        env::remove_var("SESSION_TTL_SECS");
        env::remove_var("COOKIE_SECURE");
    }

    #[test]
    #[serial]
    fn missing_secret_is_config_error() {
        clear_env();
        let err = SecurityConfig::from_env().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[test]
    #[serial]
    fn empty_secret_is_config_error() {
        clear_env();
        env::set_var("JWT_SECRET", "   ");
        let err = SecurityConfig::from_env().unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
        clear_env();
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        env::set_var("JWT_SECRET", "s3cret");
        env::set_var("SESSION_TTL_SECS", "1600");
        env::set_var("COOKIE_SECURE", "false");

        let cfg = SecurityConfig::from_env().unwrap();
        assert_eq!(cfg.jwt_secret, b"s3cret");
        assert_eq!(cfg.session_ttl, Duration::from_secs(1600));
        assert!(!cfg.cookie.secure);
        clear_env();
    }

    #[test]
    #[serial]
    fn defaults_to_thirty_days_and_secure_cookie() {
        clear_env();
        env::set_var("JWT_SECRET", "s3cret");
        let cfg = SecurityConfig::from_env().unwrap();
        assert_eq!(cfg.session_ttl, DEFAULT_SESSION_TTL);
        assert!(cfg.cookie.secure);
        clear_env();
    }

    #[test]
    #[serial]
    fn out_of_range_ttl_is_config_error() {
        for raw in ["0", "18446744073709551615", "9223372036854775808", "315360001"] {
            clear_env();
            env::set_var("JWT_SECRET", "s3cret");
            env::set_var("SESSION_TTL_SECS", raw);
            let err = SecurityConfig::from_env().unwrap_err();
            assert_eq!(err.code(), ErrorCode::ConfigError, "ttl {raw}");
        }
        clear_env();
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", SecurityConfig::new("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }
}
