//! Resolved visitor identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Provider subject identifier.
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The identity and expiry for the current visitor.
///
/// Produced only by the session gateway; pages read it and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub expires: DateTime<Utc>,
}

impl Session {
    /// Name to greet the visitor with, falling back to the email address.
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        user.name.as_deref().or(user.email.as_deref())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}
