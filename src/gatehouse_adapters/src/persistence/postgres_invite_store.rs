use chrono::{DateTime, Utc};
use gatehouse_core::{AccountHandle, Invite, InviteCode, InviteStore, InviteStoreError};
use sqlx::{FromRow, PgPool};

use super::InviteUsage;

#[derive(Clone)]
pub struct PostgresInviteStore {
    pool: PgPool,
}

impl PostgresInviteStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresInviteStore { pool }
    }
}

#[derive(Debug, FromRow)]
struct InviteRow {
    code: String,
    owner_username: String,
    expires_at: Option<DateTime<Utc>>,
    max_uses: Option<i32>,
    uses: i32,
    autofollow: bool,
}

impl InviteRow {
    fn into_invite(self) -> Result<Invite, InviteStoreError> {
        let code = InviteCode::parse(&self.code)
            .ok_or_else(|| InviteStoreError::UnexpectedError("blank invite code".to_string()))?;

        let mut invite = Invite::new(code, AccountHandle::new(self.owner_username))
            .with_uses(self.uses.max(0) as u32)
            .with_autofollow(self.autofollow);
        if let Some(expires_at) = self.expires_at {
            invite = invite.with_expiry(expires_at);
        }
        if let Some(max_uses) = self.max_uses {
            invite = invite.with_max_uses(max_uses.max(0) as u32);
        }
        Ok(invite)
    }
}

#[async_trait::async_trait]
impl InviteStore for PostgresInviteStore {
    #[tracing::instrument(name = "Retrieving invite from PostgreSQL", skip_all)]
    async fn find_by_code(&self, code: &InviteCode) -> Result<Option<Invite>, InviteStoreError> {
        let row = sqlx::query_as::<_, InviteRow>(
            r#"
                SELECT code, owner_username, expires_at, max_uses, uses, autofollow
                FROM invites
                WHERE code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InviteStoreError::UnexpectedError(e.to_string()))?;

        row.map(InviteRow::into_invite).transpose()
    }
}

#[async_trait::async_trait]
impl InviteUsage for PostgresInviteStore {
    #[tracing::instrument(name = "Recording invite use in PostgreSQL", skip_all)]
    async fn record_use(&self, code: &InviteCode) -> Result<(), InviteStoreError> {
        sqlx::query("UPDATE invites SET uses = uses + 1 WHERE code = $1")
            .bind(code.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| InviteStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}
