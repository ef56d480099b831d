use axum::response::Html;

use super::layout::document;

pub const AUTH_ERROR_HEADING: &str = "Authentication error";

pub fn not_found_page() -> Html<String> {
    document(
        "Not found",
        None,
        r#"<section class="not-found"><h1>Page not found</h1><a href="/">Back to home</a></section>"#,
    )
}

/// Rendered when the session could not be resolved at all. Not a redirect:
/// the visitor may well be signed in.
pub fn auth_error_page() -> Html<String> {
    let body = format!(
        r#"<section class="auth-error"><h1>{AUTH_ERROR_HEADING}</h1>
<p>We could not verify your session. Please try again later.</p>
<a href="/">Retry</a> <a href="/auth/signin">Sign in</a></section>"#
    );
    document(AUTH_ERROR_HEADING, None, &body)
}
