use actix_web::web;

use crate::middleware::session_gate::SessionGate;

pub mod accounts;
pub mod auth;
pub mod expenses;
pub mod health;

/// Register every route. Used by `main` and by integration tests.
///
/// Public routes go first so `/account/restore` is matched before the gated
/// `/account` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Public: /, /health, /register, /login, /logout, /account/restore
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes);

    // Everything below requires a live session.
    cfg.service(
        web::resource("/me")
            .wrap(SessionGate)
            .route(web::get().to(accounts::me)),
    )
    .service(
        web::resource("/accounts")
            .wrap(SessionGate)
            .route(web::get().to(accounts::list_accounts)),
    )
    .service(
        web::scope("/account")
            .wrap(SessionGate)
            .configure(accounts::configure_routes),
    )
    .service(
        web::scope("/expense")
            .wrap(SessionGate)
            .configure(expenses::configure_routes),
    );
}
