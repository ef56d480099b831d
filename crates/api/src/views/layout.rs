//! Document shell and page header.

use axum::response::Html;
use jafflix_core::session::Session;

use super::escape;

pub const APP_NAME: &str = "Jafflix";

/// Wrap `body` in a full HTML document. The header shows the signed-in user
/// and a sign-out button when `session` is present.
pub fn document(title: &str, session: Option<&Session>, body: &str) -> Html<String> {
    let header = header(session);
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {APP_NAME}</title>
</head>
<body>
{header}
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn header(session: Option<&Session>) -> String {
    let account = match session.filter(|s| s.user.is_some()) {
        Some(session) => {
            let name = session.display_name().unwrap_or("Signed in");
            let avatar = session
                .user
                .as_ref()
                .and_then(|u| u.image.as_deref())
                .map(|src| {
                    format!(
                        r#"<img class="avatar" src="{}" alt="" width="32" height="32">"#,
                        escape(src)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<div class="account">{avatar}<span class="user-name">{}</span>
<form method="post" action="/api/auth/signout"><button type="submit">Sign out</button></form></div>"#,
                escape(name)
            )
        }
        None => String::new(),
    };

    format!(r#"<header><a class="brand" href="/">{APP_NAME}</a>{account}</header>"#)
}
