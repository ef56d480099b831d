//! Session gateway: resolves the visitor's identity from the session cookie.
//!
//! Every call re-reads the cookie and re-validates the token. A missing,
//! tampered or expired token means "no session". Failures that say something
//! about the server rather than the visitor (no signing secret, key or crypto
//! errors) are returned to the caller.

use axum::http::HeaderMap;
use jafflix_core::session::{Session, SessionUser};
use jsonwebtoken::errors::ErrorKind;

use crate::auth::cookies::{clear_cookie, read_cookie, set_cookie, SESSION_COOKIE};
use crate::auth::jwt::{generate_session_token, validate_token, SessionConfig};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session signing secret is not configured")]
    MissingSecret,

    #[error("Session token could not be processed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub struct SessionGateway {
    config: SessionConfig,
    secure_cookies: bool,
}

impl SessionGateway {
    /// Cookies are marked `Secure` when the app is served over HTTPS.
    pub fn new(config: SessionConfig, app_url: &str) -> Self {
        Self {
            config,
            secure_cookies: app_url.starts_with("https://"),
        }
    }

    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// Resolve the current session from request headers.
    pub fn current_session(&self, headers: &HeaderMap) -> Result<Option<Session>, SessionError> {
        if self.config.secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }

        let Some(token) = read_cookie(headers, SESSION_COOKIE) else {
            return Ok(None);
        };

        match validate_token(token, &self.config) {
            Ok(claims) => Ok(Some(claims.into_session())),
            Err(err) if is_visitor_error(err.kind()) => {
                tracing::debug!(error = %err, "Ignoring unusable session token");
                Ok(None)
            }
            Err(err) => Err(SessionError::Token(err)),
        }
    }

    /// `Set-Cookie` value carrying a fresh session for `user`.
    pub fn issue_cookie(&self, user: &SessionUser) -> Result<String, SessionError> {
        if self.config.secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }
        let token = generate_session_token(user, &self.config)?;
        Ok(set_cookie(
            SESSION_COOKIE,
            &token,
            self.config.max_age_secs,
            self.secure_cookies,
        ))
    }

    /// `Set-Cookie` value that ends the session.
    pub fn clear_cookie(&self) -> String {
        clear_cookie(SESSION_COOKIE, self.secure_cookies)
    }
}

/// Token problems caused by what the visitor sent, as opposed to server-side
/// key or crypto failures.
fn is_visitor_error(kind: &ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::ExpiredSignature
            | ErrorKind::ImmatureSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    use super::*;
    use crate::auth::jwt::DEFAULT_SESSION_MAX_AGE_SECS;

    fn gateway(secret: &str) -> SessionGateway {
        SessionGateway::new(
            SessionConfig {
                secret: secret.to_string(),
                max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
            },
            "http://localhost:3000",
        )
    }

    fn user() -> SessionUser {
        SessionUser {
            id: "108".into(),
            email: Some("test@example.com".into()),
            name: None,
            image: Some("https://lh3.googleusercontent.com/a/photo".into()),
        }
    }

    fn headers_with(set_cookie: &str) -> HeaderMap {
        // `name=value; Path=/; ...` -> `name=value`
        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(pair).unwrap());
        headers
    }

    #[test]
    fn no_cookie_means_no_session() {
        let session = gateway("secret").current_session(&HeaderMap::new()).unwrap();
        assert_eq!(session, None);
    }

    #[test]
    fn issued_cookie_resolves_to_the_same_user() {
        let gw = gateway("secret");
        let cookie = gw.issue_cookie(&user()).unwrap();
        assert!(cookie.contains("Max-Age=2592000"));

        let session = gw.current_session(&headers_with(&cookie)).unwrap().unwrap();
        assert_eq!(session.user.unwrap(), user());
    }

    #[test]
    fn tampered_token_means_no_session() {
        let cookie = gateway("one-secret").issue_cookie(&user()).unwrap();
        let session = gateway("another-secret")
            .current_session(&headers_with(&cookie))
            .unwrap();
        assert_eq!(session, None);
    }

    #[test]
    fn garbage_token_means_no_session() {
        let session = gateway("secret")
            .current_session(&headers_with("jafflix.session-token=not-a-jwt"))
            .unwrap();
        assert_eq!(session, None);
    }

    #[test]
    fn missing_secret_is_a_resolution_failure() {
        let result = gateway("").current_session(&HeaderMap::new());
        assert_matches!(result, Err(SessionError::MissingSecret));
    }

    #[test]
    fn https_app_url_marks_cookies_secure() {
        let gw = SessionGateway::new(
            SessionConfig {
                secret: "secret".into(),
                max_age_secs: 60,
            },
            "https://jafflix.example.com",
        );
        assert!(gw.secure_cookies());
        assert!(gw.clear_cookie().ends_with("; Secure"));
    }
}
