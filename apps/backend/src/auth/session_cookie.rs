//! The `token` cookie that carries the session to browsers.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};

use crate::state::security_config::SecurityConfig;

pub const SESSION_COOKIE: &str = "token";

fn base(value: String, security: &SecurityConfig) -> Cookie<'static> {
    let same_site = if security.cookie.secure {
        SameSite::None
    } else {
        SameSite::Lax
    };
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(security.cookie.secure)
        .same_site(same_site)
        .finish()
}

/// Session cookie living exactly as long as the token inside it.
pub fn session_cookie(token: String, security: &SecurityConfig) -> Cookie<'static> {
    let mut cookie = base(token, security);
    let secs = i64::try_from(security.session_ttl.as_secs()).unwrap_or(i64::MAX);
    cookie.set_max_age(CookieDuration::seconds(secs));
    cookie
}

/// Same name, path and flags as [`session_cookie`], empty and already expired.
pub fn clear_session_cookie(security: &SecurityConfig) -> Cookie<'static> {
    let mut cookie = base(String::new(), security);
    cookie.make_removal();
    cookie
}
