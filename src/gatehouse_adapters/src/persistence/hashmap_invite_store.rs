use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gatehouse_core::{Invite, InviteCode, InviteStore, InviteStoreError};

use super::InviteUsage;

#[derive(Default, Clone)]
pub struct HashMapInviteStore {
    invites: Arc<RwLock<HashMap<InviteCode, Invite>>>,
}

impl HashMapInviteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_invite(&self, invite: Invite) {
        let mut invites = self.invites.write().await;
        invites.insert(invite.code().clone(), invite);
    }
}

#[async_trait::async_trait]
impl InviteStore for HashMapInviteStore {
    async fn find_by_code(&self, code: &InviteCode) -> Result<Option<Invite>, InviteStoreError> {
        let invites = self.invites.read().await;
        Ok(invites.get(code).cloned())
    }
}

#[async_trait::async_trait]
impl InviteUsage for HashMapInviteStore {
    async fn record_use(&self, code: &InviteCode) -> Result<(), InviteStoreError> {
        let mut invites = self.invites.write().await;
        if let Some(invite) = invites.get_mut(code) {
            invite.record_use();
        }
        Ok(())
    }
}
