use gatehouse_core::{InviteCode, InviteStoreError};

/// Invite consumption bookkeeping, done by the account side when an invited sign-up is saved.
#[async_trait::async_trait]
pub trait InviteUsage: Send + Sync {
    /// Counts one registration against the invite. Unknown codes are ignored.
    async fn record_use(&self, code: &InviteCode) -> Result<(), InviteStoreError>;
}
