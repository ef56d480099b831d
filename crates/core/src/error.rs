#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Failure of a call against the movie catalog.
///
/// `Display` yields the upstream message unchanged so controllers can surface
/// it to the user as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("{0}")]
    Transport(String),

    /// The upstream answered with a non-2xx status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The upstream answered 2xx but the body did not match the expected shape.
    #[error("{0}")]
    Decode(String),
}

impl CatalogError {
    /// HTTP status reported by the upstream, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
