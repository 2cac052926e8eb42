//! Harness shared by unit and integration tests.
//!
//! Stage 1 builds an `AppState` over a fresh in-memory SQLite database with
//! migrations applied; stage 2 (`app_builder`) turns it into an initialized
//! Actix test service.

pub mod app_builder;

pub use app_builder::{create_test_app, create_test_app_builder};

use crate::error::AppError;
use crate::infra::db::DbKind;
use crate::infra::state::build_state;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Secret used by [`test_security`]; long enough for HS256.
pub const TEST_JWT_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET)
}

/// Isolated state: every call gets its own in-memory database.
pub async fn test_state() -> Result<AppState, AppError> {
    test_state_with(test_security()).await
}

pub async fn test_state_with(security: SecurityConfig) -> Result<AppState, AppError> {
    build_state(security)
        .with_db(DbKind::SqliteMemory)
        .build()
        .await
}
