use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque invite token as it appears in invite links and the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Returns `None` for blank input; a blank code means "no invite".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        (!raw.is_empty()).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public handle of an existing account, rendered as `@name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountHandle(String);

impl AccountHandle {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self(name.trim_start_matches('@').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// An invite issued by an existing account.
///
/// Invites are created and consumed elsewhere; the registration gateway only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    code: InviteCode,
    owner: AccountHandle,
    expires_at: Option<DateTime<Utc>>,
    max_uses: Option<u32>,
    uses: u32,
    autofollow: bool,
}

impl Invite {
    pub fn new(code: InviteCode, owner: AccountHandle) -> Self {
        Self {
            code,
            owner,
            expires_at: None,
            max_uses: None,
            uses: 0,
            autofollow: false,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses = uses;
        self
    }

    pub fn with_autofollow(mut self, autofollow: bool) -> Self {
        self.autofollow = autofollow;
        self
    }

    pub fn code(&self) -> &InviteCode {
        &self.code
    }

    pub fn owner(&self) -> &AccountHandle {
        &self.owner
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn max_uses(&self) -> Option<u32> {
        self.max_uses
    }

    pub fn uses(&self) -> u32 {
        self.uses
    }

    pub fn autofollow(&self) -> bool {
        self.autofollow
    }

    /// Not expired at `now` and not used up.
    pub fn valid_for_use_at(&self, now: DateTime<Utc>) -> bool {
        let unexpired = self.expires_at.is_none_or(|expiry| now < expiry);
        let uses_left = self.max_uses.is_none_or(|max| self.uses < max);
        unexpired && uses_left
    }

    pub fn valid_for_use(&self) -> bool {
        self.valid_for_use_at(Utc::now())
    }

    /// Bookkeeping for stores that consume an invite when an account registers with it.
    pub fn record_use(&mut self) {
        self.uses = self.uses.saturating_add(1);
    }
}
