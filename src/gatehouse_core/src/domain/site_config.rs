use serde::Deserialize;

/// Site-wide switches consulted while handling a registration request.
///
/// A request reads one snapshot of this value up front and passes it down explicitly,
/// so every gate in that request sees the same configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SiteConfig {
    /// Anyone may sign up without an invite.
    #[serde(default)]
    pub registrations_open: bool,
    /// The instance hosts exactly one account; sign-up is never available.
    #[serde(default)]
    pub single_user_mode: bool,
    /// Identities are managed by an external provider (PAM, LDAP, ...).
    #[serde(default)]
    pub external_identity_auth_mode: bool,
}

impl SiteConfig {
    pub fn open() -> Self {
        Self {
            registrations_open: true,
            ..Self::default()
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }
}
