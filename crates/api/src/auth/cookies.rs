//! Minimal cookie plumbing: read one value from the `Cookie` header and build
//! `Set-Cookie` values.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use percent_encoding::{AsciiSet, CONTROLS};

/// Session token cookie.
pub const SESSION_COOKIE: &str = "jafflix.session-token";
/// CSRF state for an in-flight OAuth sign-in.
pub const STATE_COOKIE: &str = "jafflix.oauth-state";
/// Where to land after a successful sign-in.
pub const CALLBACK_COOKIE: &str = "jafflix.callback-url";

/// Lifetime of the short-lived sign-in cookies, in seconds.
pub const FLOW_COOKIE_MAX_AGE_SECS: i64 = 10 * 60;

/// Return the value of cookie `name`, if the request carries it.
///
/// Multiple `Cookie` headers are searched in order; the first match wins.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for an HTTP-only, path-wide cookie.
pub fn set_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes cookie `name`.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    set_cookie(name, "", 0, secure)
}

/// Bytes a cookie value may not carry raw (RFC 6265 `cookie-octet`). Meant
/// for URLs that are already percent-encoded, so `%` is left alone.
pub const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\');
