mod support;

use std::time::{Duration, SystemTime};

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_details;
use pocketbank::test_support::test_security;
use pocketbank::{cors_middleware, routes, IdentityClaims, SecurityConfig, TokenCodec};
use serde_json::Value;

#[actix_web::test]
async fn missing_token_is_rejected() {
    let app = support::app(support::state().await).await;

    let req = test::TestRequest::get().uri("/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_MISSING_TOKEN", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn malformed_authorization_without_cookie_counts_as_missing() {
    let app = support::app(support::state().await).await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", "Token abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_MISSING_TOKEN", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn garbage_cookie_is_rejected() {
    let app = support::app(support::state().await).await;

    let req = test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new("token", "not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_INVALID_TOKEN", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn token_from_another_secret_is_rejected() {
    let app = support::app(support::state().await).await;
    let account = support::register(&app, "other-secret").await;

    let foreign = TokenCodec::new(&SecurityConfig::new("some-other-secret"))
        .issue(&IdentityClaims::new(account.id, &account.email), SystemTime::now())
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new("token", foreign))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_INVALID_TOKEN", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn expired_token_is_rejected() {
    let app = support::app(support::state().await).await;
    let account = support::register(&app, "expired").await;

    let short = TokenCodec::new(&test_security().with_session_ttl(Duration::from_secs(60)));
    let token = short
        .issue(
            &IdentityClaims::new(account.id, &account.email),
            SystemTime::now() - Duration::from_secs(20 * 60),
        )
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new("token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED_EXPIRED_TOKEN", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn stale_email_is_rejected() {
    let state = support::state().await;
    let app = support::app(state.clone()).await;
    let account = support::register(&app, "stale").await;

    // Valid signature and id, but the account's email is different now.
    let token = support::token_for(&state, account.id, "a@x.com");

    let req = test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new("token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn unknown_account_is_rejected_like_stale() {
    let state = support::state().await;
    let app = support::app(state.clone()).await;

    let token = support::token_for(&state, 424_242, "ghost@example.test");
    let req = test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new("token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn deleted_account_cookie_is_rejected() {
    let app = support::app(support::state().await).await;
    let (account, cookie) = support::signed_in(&app, "deleted").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/account/{}", account.id))
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The browser would have dropped it; a replayed copy must still fail.
    let req = test::TestRequest::get().uri("/me").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED", StatusCode::UNAUTHORIZED).await;
}

#[actix_web::test]
async fn cookie_session_is_admitted() {
    let app = support::app(support::state().await).await;
    let (account, cookie) = support::signed_in(&app, "admitted").await;

    let req = test::TestRequest::get().uri("/me").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], account.id);
    assert_eq!(body["email"], account.email.as_str());
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn bearer_header_is_accepted_without_cookie() {
    let state = support::state().await;
    let app = support::app(state.clone()).await;
    let account = support::register(&app, "bearer").await;
    let token = support::token_for(&state, account.id, &account.email);

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn cookie_wins_over_bearer() {
    let state = support::state().await;
    let app = support::app(state.clone()).await;
    let (_, cookie) = support::signed_in(&app, "cookie-first").await;

    let req = test::TestRequest::get()
        .uri("/me")
        .cookie(cookie)
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn public_routes_skip_the_gate() {
    let app = support::app(support::state().await).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .cookie(Cookie::new("token", "not.a.token"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn preflight_never_reaches_the_gate() {
    let state = support::state().await;
    let origins = vec!["http://localhost:5173".to_string()];
    let app = test::init_service(
        App::new()
            .wrap(cors_middleware(&origins))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/expense")
        .insert_header(("Origin", "http://localhost:5173"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}
