//! Post-sign-in / sign-out redirect resolution.

use reqwest::Url;

/// Resolve a requested redirect against the application base URL.
///
/// Relative paths are joined onto the base. Absolute URLs are honoured only
/// when they share the base's origin. Everything else lands on the base.
pub fn resolve_redirect(requested: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');

    if requested.starts_with('/') && !requested.starts_with("//") {
        return match Url::parse(&format!("{base}{requested}")) {
            Ok(url) => url.to_string(),
            Err(_) => base.to_string(),
        };
    }

    match (Url::parse(requested), Url::parse(base)) {
        (Ok(target), Ok(base_parsed)) if target.origin() == base_parsed.origin() => {
            target.to_string()
        }
        _ => base.to_string(),
    }
}
