use std::net::IpAddr;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::{email::Email, invite::AccountHandle};

/// The authenticated account on the profile-edit path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    #[serde(serialize_with = "expose_email")]
    pub email: Email,
    pub handle: AccountHandle,
    /// Whether a local password is set; externally managed identities may have none.
    pub has_local_credential: bool,
}

fn expose_email<S: Serializer>(email: &Email, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(email.as_ref().expose_secret())
}

/// One signed-in browser session of a principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionActivation {
    pub id: Uuid,
    pub user_agent: String,
    pub ip: Option<IpAddr>,
    pub last_seen_at: DateTime<Utc>,
}

/// Read-only list of a principal's active sessions, shown on the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SessionContext {
    sessions: Vec<SessionActivation>,
}

impl SessionContext {
    pub fn new(mut sessions: Vec<SessionActivation>) -> Self {
        sessions.sort_by(|a, b| b.last_seen_at.cmp(&a.last_seen_at));
        Self { sessions }
    }

    pub fn sessions(&self) -> &[SessionActivation] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
