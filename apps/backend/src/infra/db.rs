use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{debug, info};

use crate::config::db::db_url;
use crate::error::AppError;

/// Which backend to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// URL from `DATABASE_URL` / `POSTGRES_*`
    Postgres,
    /// Private in-memory SQLite database; one pooled connection so every
    /// query sees the same schema and rows.
    SqliteMemory,
}

/// Open a pool for `kind`. Does NOT run migrations.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let mut opt = match kind {
        DbKind::Postgres => {
            let mut opt = ConnectOptions::new(db_url()?);
            opt.min_connections(1).max_connections(10);
            opt
        }
        DbKind::SqliteMemory => {
            let mut opt = ConnectOptions::new("sqlite::memory:");
            opt.min_connections(1)
                .max_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
            opt
        }
    };
    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    debug!(?kind, "db=connect");
    Ok(Database::connect(opt).await?)
}

/// Connect and bring the schema up to date. Single entry point used by
/// `main` and by test state construction.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(?kind, "db=ready");
    Ok(conn)
}
