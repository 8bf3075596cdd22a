use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gatehouse_core::{
    AccountHandle, AccountStore, AccountStoreError, AccountUpdate, Email, Field, InviteCode,
    PersistedAccount, Principal, RegistrationCandidate, Username,
};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use super::InviteUsage;

const TAKEN: &str = "has already been taken";

#[derive(Debug, Clone)]
struct StoredAccount {
    id: Uuid,
    email: Email,
    password: Option<Secret<String>>,
    username: String,
    invited_with: Option<InviteCode>,
    active: bool,
}

impl StoredAccount {
    fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            email: self.email.clone(),
            handle: AccountHandle::new(self.username.as_str()),
            has_local_credential: self.password.is_some(),
        }
    }
}

/// In-memory account store with the uniqueness rules of the real one.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, StoredAccount>>>,
    invites: Option<Arc<dyn InviteUsage>>,
    confirmation_required: bool,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations made with an invite code count against that invite.
    pub fn with_invite_store(mut self, invites: impl InviteUsage + 'static) -> Self {
        self.invites = Some(Arc::new(invites));
        self
    }

    /// New accounts stay inactive until confirmed.
    pub fn with_confirmation_required(mut self, required: bool) -> Self {
        self.confirmation_required = required;
        self
    }

    /// Adds an existing account, e.g. one that signed up before this store was created.
    ///
    /// `password` is `None` for identities managed by an external provider.
    pub async fn insert_principal(&self, principal: &Principal, password: Option<Secret<String>>) {
        let account = StoredAccount {
            id: principal.id,
            email: principal.email.clone(),
            password,
            username: principal.handle.as_str().to_string(),
            invited_with: None,
            active: true,
        };
        self.accounts.write().await.insert(account.id, account);
    }

    pub async fn principal(&self, id: Uuid) -> Option<Principal> {
        let accounts = self.accounts.read().await;
        accounts.get(&id).map(StoredAccount::principal)
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Principal> {
        let email = Email::parse(email).ok()?;
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|account| account.email == email)
            .map(StoredAccount::principal)
    }

    pub async fn invite_code_of(&self, id: Uuid) -> Option<InviteCode> {
        let accounts = self.accounts.read().await;
        accounts.get(&id).and_then(|account| account.invited_with.clone())
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn email_taken(
    accounts: &HashMap<Uuid, StoredAccount>,
    email: &Email,
    except: Option<Uuid>,
) -> bool {
    accounts
        .values()
        .any(|account| Some(account.id) != except && &account.email == email)
}

fn username_taken(
    accounts: &HashMap<Uuid, StoredAccount>,
    username: &Username,
    except: Option<Uuid>,
) -> bool {
    accounts
        .values()
        .any(|account| {
            Some(account.id) != except && account.username.to_lowercase() == username.canonical()
        })
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    #[tracing::instrument(name = "Persisting account in memory", skip_all)]
    async fn persist(
        &self,
        candidate: &RegistrationCandidate,
    ) -> Result<PersistedAccount, AccountStoreError> {
        let mut errors = candidate.validate();
        let mut accounts = self.accounts.write().await;

        let email = Email::parse(&candidate.email).ok();
        if let Some(email) = &email {
            if email_taken(&accounts, email, None) {
                errors.add(Field::Email, TAKEN);
            }
        }
        let username = candidate
            .username()
            .and_then(|username| Username::parse(username).ok());
        if let Some(username) = &username {
            if username_taken(&accounts, username, None) {
                errors.add(Field::Username, TAKEN);
            }
        }

        let (Some(email), Some(username), true) = (email, username, errors.is_empty()) else {
            return Err(AccountStoreError::Invalid(errors));
        };

        if let (Some(invites), Some(code)) = (&self.invites, &candidate.invite_code) {
            invites
                .record_use(code)
                .await
                .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        }

        let account = StoredAccount {
            id: Uuid::new_v4(),
            email,
            password: candidate.password.clone(),
            username: username.as_str().to_string(),
            invited_with: candidate.invite_code.clone(),
            active: !self.confirmation_required,
        };
        let persisted = PersistedAccount {
            id: account.id,
            handle: AccountHandle::new(account.username.as_str()),
            active: account.active,
        };
        accounts.insert(account.id, account);

        Ok(persisted)
    }

    #[tracing::instrument(name = "Updating account in memory", skip_all)]
    async fn update_persisted(
        &self,
        principal: &Principal,
        update: &AccountUpdate,
    ) -> Result<Principal, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let mut errors = update.validate();

        let email = update.email.as_deref().and_then(|email| Email::parse(email).ok());
        if let Some(email) = &email {
            if email_taken(&accounts, email, Some(principal.id)) {
                errors.add(Field::Email, TAKEN);
            }
        }
        let username = update
            .username
            .as_deref()
            .and_then(|username| Username::parse(username).ok());
        if let Some(username) = &username {
            if username_taken(&accounts, username, Some(principal.id)) {
                errors.add(Field::Username, TAKEN);
            }
        }

        let account = accounts
            .get_mut(&principal.id)
            .ok_or(AccountStoreError::AccountNotFound)?;

        if let Some(stored) = &account.password {
            match update
                .current_password
                .as_ref()
                .filter(|current| !current.expose_secret().is_empty())
            {
                None => errors.add(Field::CurrentPassword, "can't be blank"),
                Some(current) if current.expose_secret() != stored.expose_secret() => {
                    errors.add(Field::CurrentPassword, "is invalid")
                }
                Some(_) => {}
            }
        }

        if !errors.is_empty() {
            return Err(AccountStoreError::Invalid(errors));
        }

        if let Some(email) = email {
            account.email = email;
        }
        if let Some(username) = username {
            account.username = username.as_str().to_string();
        }
        if update.changes_password() {
            account.password = update.password.clone();
        }

        Ok(account.principal())
    }
}
