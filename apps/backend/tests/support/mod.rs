#![allow(dead_code)]

//! Helpers shared by the integration test binaries.

use std::time::SystemTime;

use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error as ActixError};
use backend_test_support::unique_helpers::unique_email;
use pocketbank::test_support::{create_test_app, test_state};
use pocketbank::{AppState, IdentityClaims};
use serde_json::{json, Value};

pub const PASSWORD: &str = "correct horse battery staple";

#[ctor::ctor]
fn init_logging() {
    backend_test_support::test_logging::init();
}

/// Fresh in-memory database with migrations applied.
pub async fn state() -> AppState {
    test_state().await.expect("build sqlite test state")
}

pub async fn app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    create_test_app(state).await
}

pub struct Registered {
    pub id: i64,
    pub email: String,
}

pub async fn register<S>(app: &S, prefix: &str) -> Registered
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
{
    let email = unique_email(prefix);
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "first_name": "Test",
            "last_name": prefix,
            "email": email,
            "password": PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 202, "registration failed");
    let body: Value = test::read_body_json(resp).await;
    Registered {
        id: body["id"].as_i64().expect("id in registration response"),
        email,
    }
}

/// Log in and return the session cookie.
pub async fn login<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login failed");
    resp.response()
        .cookies()
        .find(|c| c.name() == "token")
        .map(|c| c.into_owned())
        .expect("session cookie on login")
}

/// Register a fresh account and sign it in.
pub async fn signed_in<S>(app: &S, prefix: &str) -> (Registered, Cookie<'static>)
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
{
    let account = register(app, prefix).await;
    let cookie = login(app, &account.email).await;
    (account, cookie)
}

/// Sign a token directly with the state's codec.
pub fn token_for(state: &AppState, id: i64, email: &str) -> String {
    state
        .tokens
        .issue(&IdentityClaims::new(id, email), SystemTime::now())
        .expect("issue token")
}
