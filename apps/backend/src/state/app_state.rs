use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::jwt::TokenCodec;
use crate::auth::password::CredentialVerifier;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<Arc<DatabaseConnection>>,
    /// Security configuration including token and cookie settings
    pub security: SecurityConfig,
    /// Token codec built from `security`
    pub tokens: TokenCodec,
    pub credentials: CredentialVerifier,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        let tokens = TokenCodec::new(&security);
        Self {
            db: Some(Arc::new(db)),
            security,
            tokens,
            credentials: CredentialVerifier::new(),
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        let tokens = TokenCodec::new(&security);
        Self {
            db: None,
            security,
            tokens,
            credentials: CredentialVerifier::new(),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }
}
