use clap::Parser;
use migration::sea_orm::Database;
use migration::{migrate, MigrationCommand};

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Pocketbank database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Full connection URL; falls back to POSTGRES_* variables when absent
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

fn postgres_url_from_env() -> Result<String, String> {
    let must = |name: &str| {
        std::env::var(name)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("missing env var {name}"))
    };
    let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let user = must("POSTGRES_USER")?;
    let password = must("POSTGRES_PASSWORD")?;
    let db = must("POSTGRES_DB")?;
    Ok(format!("postgresql://{user}:{password}@{host}:{port}/{db}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match args.database_url {
        Some(url) => url,
        None => match postgres_url_from_env() {
            Ok(url) => url,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        },
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
