use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gatehouse_core::{Principal, SessionActivation, SessionStore, SessionStoreError};
use uuid::Uuid;

use super::HashMapAccountStore;

/// In-memory sessions backed by a [`HashMapAccountStore`].
///
/// A session id points at an account id, so a principal always reflects the latest saved
/// state of its account.
#[derive(Clone)]
pub struct HashMapSessionStore {
    accounts: HashMapAccountStore,
    sessions: Arc<RwLock<HashMap<String, Uuid>>>,
    activations: Arc<RwLock<HashMap<Uuid, Vec<SessionActivation>>>>,
}

impl HashMapSessionStore {
    pub fn new(accounts: HashMapAccountStore) -> Self {
        Self {
            accounts,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            activations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn sign_in(&self, session_id: &str, account_id: Uuid, activation: SessionActivation) {
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), account_id);
        self.activations
            .write()
            .await
            .entry(account_id)
            .or_default()
            .push(activation);
    }

    pub async fn sign_out(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }
}

#[async_trait::async_trait]
impl SessionStore for HashMapSessionStore {
    async fn principal_for_session(
        &self,
        session_id: &str,
    ) -> Result<Option<Principal>, SessionStoreError> {
        let account_id = self.sessions.read().await.get(session_id).copied();
        match account_id {
            Some(id) => Ok(self.accounts.principal(id).await),
            None => Ok(None),
        }
    }

    async fn active_sessions(
        &self,
        principal: &Principal,
    ) -> Result<Vec<SessionActivation>, SessionStoreError> {
        let activations = self.activations.read().await;
        Ok(activations.get(&principal.id).cloned().unwrap_or_default())
    }
}
