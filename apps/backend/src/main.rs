use actix_web::{web, App, HttpServer};
use pocketbank::config::server::ServerConfig;
use pocketbank::infra::db::DbKind;
use pocketbank::infra::state::build_state;
use pocketbank::middleware::cors::cors_middleware;
use pocketbank::middleware::request_trace::RequestTrace;
use pocketbank::middleware::structured_logger::StructuredLogger;
use pocketbank::middleware::trace_span::TraceSpan;
use pocketbank::routes;
use pocketbank::state::security_config::SecurityConfig;
use pocketbank::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: docker-compose env_file or docker run --env-file
    // - Local dev: source env files manually (e.g., set -a; . ./.env; set +a)
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            error!(error = %e, "Invalid security configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state(security_config)
        .with_db(DbKind::Postgres)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, "Starting Pocketbank backend");

    let data = web::Data::new(app_state);
    let origins = server.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
