use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    account_update::AccountUpdate,
    candidate::{FieldErrors, RegistrationCandidate},
    invite::{AccountHandle, Invite, InviteCode},
    session::{Principal, SessionActivation},
};

// InviteStore port trait and errors
#[derive(Debug, Error)]
pub enum InviteStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Read access to invites. Invites are created and consumed elsewhere.
#[async_trait]
pub trait InviteStore: Send + Sync {
    /// Exact lookup by code. A missing invite is `Ok(None)`, not an error.
    async fn find_by_code(&self, code: &InviteCode) -> Result<Option<Invite>, InviteStoreError>;
}

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Validation failed")]
    Invalid(FieldErrors),
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Invalid(a), Self::Invalid(b)) => a == b,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// What the store created for a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAccount {
    pub id: Uuid,
    pub handle: AccountHandle,
    /// `false` while the account still awaits confirmation or approval.
    pub active: bool,
}

/// The external store that owns accounts, their uniqueness rules and invite consumption.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn persist(
        &self,
        candidate: &RegistrationCandidate,
    ) -> Result<PersistedAccount, AccountStoreError>;

    async fn update_persisted(
        &self,
        principal: &Principal,
        update: &AccountUpdate,
    ) -> Result<Principal, AccountStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Read-only view of the session subsystem.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The principal a session cookie belongs to, if the session is active.
    async fn principal_for_session(
        &self,
        session_id: &str,
    ) -> Result<Option<Principal>, SessionStoreError>;

    async fn active_sessions(
        &self,
        principal: &Principal,
    ) -> Result<Vec<SessionActivation>, SessionStoreError>;
}
