//! Sign-in page.

use axum::response::Html;
use jafflix_core::suggestion::QUERY_VALUE;
use percent_encoding::utf8_percent_encode;

use super::escape;
use super::layout::{document, APP_NAME};

/// Human-readable text for a provider error code passed as `?error=`.
pub fn sign_in_error_message(code: &str) -> &'static str {
    match code {
        "AccessDenied" => "Access was denied. Please try again.",
        "OAuthCallback" | "OAuthSignin" => "Could not sign in with Google. Please try again.",
        "SessionRequired" => "Please sign in to continue.",
        _ => "Sign in failed. Please try again.",
    }
}

pub fn sign_in_page(error: Option<&str>, callback_url: Option<&str>) -> Html<String> {
    let alert = error
        .map(|code| {
            format!(
                r#"<p class="error" role="alert">{}</p>"#,
                escape(sign_in_error_message(code))
            )
        })
        .unwrap_or_default();

    let href = match callback_url {
        Some(cb) => format!(
            "/api/auth/signin/google?callbackUrl={}",
            utf8_percent_encode(cb, QUERY_VALUE)
        ),
        None => "/api/auth/signin/google".to_string(),
    };

    let body = format!(
        r#"<section class="sign-in">
<h1>Welcome to {APP_NAME}</h1>
<p>Sign in to browse and search movies.</p>
{alert}
<a class="button sign-in-google" href="{}">Sign in with Google</a>
</section>"#,
        escape(&href)
    );
    document("Sign in", None, &body)
}
