//! Integration tests for sign-in, the OAuth callback, sign-out and the
//! session endpoint.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{
    body_json, get, get_authed, location, send, set_cookies, FakeCatalog, GOOD_CODE,
};

fn app() -> axum::Router {
    common::build_test_app(Arc::new(FakeCatalog::new()))
}

/// Pull `name=value` for cookie `name` out of a response's `Set-Cookie` headers.
fn cookie_pair(cookies: &[String], name: &str) -> String {
    cookies
        .iter()
        .find(|c| c.starts_with(&format!("{name}=")))
        .unwrap_or_else(|| panic!("missing Set-Cookie for {name}"))
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Test: sign-in start sets state and callback cookies and redirects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sign_in_redirects_to_provider_with_state() {
    let response = get(app(), "/api/auth/signin/google?callbackUrl=/movie/550").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookies = set_cookies(&response);
    let state = cookie_pair(&cookies, "jafflix.oauth-state");
    let state_value = state.split_once('=').unwrap().1;

    let target = location(&response);
    assert!(target.starts_with("https://accounts.example.com/auth"));
    assert!(target.contains(&format!("state={state_value}")));
    assert!(target.contains("redirect_uri=http://localhost:3000/api/auth/callback/google"));

    assert_eq!(
        cookie_pair(&cookies, "jafflix.callback-url"),
        "jafflix.callback-url=http://localhost:3000/movie/550"
    );
}

#[tokio::test]
async fn foreign_callback_url_is_replaced_by_base() {
    let response = get(
        app(),
        "/api/auth/signin/google?callbackUrl=https://evil.example.com/",
    )
    .await;

    let cookies = set_cookies(&response);
    assert_eq!(
        cookie_pair(&cookies, "jafflix.callback-url"),
        "jafflix.callback-url=http://localhost:3000"
    );
}

// ---------------------------------------------------------------------------
// Test: full callback issues a session that the gateway resolves
// ---------------------------------------------------------------------------

#[tokio::test]
async fn callback_issues_session_and_lands_on_callback_url() {
    let cookie = "jafflix.oauth-state=abc123; jafflix.callback-url=http://localhost:3000/movie/550";
    let response = send(
        app(),
        Method::GET,
        &format!("/api/auth/callback/google?code={GOOD_CODE}&state=abc123"),
        Some(cookie),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "http://localhost:3000/movie/550");

    let cookies = set_cookies(&response);
    let session = cookie_pair(&cookies, "jafflix.session-token");
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("jafflix.oauth-state=;") && c.contains("Max-Age=0")));

    // The new cookie resolves to the provider's user.
    let response = send(app(), Method::GET, "/api/auth/session", Some(&session)).await;
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], "google-108");
    assert_eq!(json["user"]["email"], "test@example.com");
    assert!(json["expires"].is_string());
}

#[tokio::test]
async fn callback_with_wrong_state_is_rejected() {
    let response = send(
        app(),
        Method::GET,
        &format!("/api/auth/callback/google?code={GOOD_CODE}&state=attacker"),
        Some("jafflix.oauth-state=abc123"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/signin?error=OAuthCallback");
    assert!(!set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("jafflix.session-token=")));
}

#[tokio::test]
async fn callback_with_failed_exchange_is_rejected() {
    let response = send(
        app(),
        Method::GET,
        "/api/auth/callback/google?code=bad-code&state=abc123",
        Some("jafflix.oauth-state=abc123"),
    )
    .await;

    assert_eq!(location(&response), "/auth/signin?error=OAuthCallback");
}

#[tokio::test]
async fn provider_denial_maps_to_access_denied() {
    let response = get(app(), "/api/auth/callback/google?error=access_denied").await;

    assert_eq!(location(&response), "/auth/signin?error=AccessDenied");
}

// ---------------------------------------------------------------------------
// Test: session endpoint and sign-out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_is_null_when_signed_out() {
    let response = get(app(), "/api/auth/session").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::Value::Null);
}

#[tokio::test]
async fn session_reports_signed_in_user() {
    let json = body_json(get_authed(app(), "/api/auth/session").await).await;

    assert_eq!(json["user"]["name"], "Test User");
}

#[tokio::test]
async fn session_resolution_failure_is_auth_error() {
    let mut config = common::test_config();
    config.session.secret = String::new();
    let app = common::build_test_app_with(config, Arc::new(FakeCatalog::new()));

    let response = get(app, "/api/auth/session").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn sign_out_clears_cookie_and_redirects_to_sign_in() {
    let cookie = common::session_cookie();
    let response = send(app(), Method::POST, "/api/auth/signout", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/signin");
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("jafflix.session-token=;") && c.contains("Max-Age=0")));
}
