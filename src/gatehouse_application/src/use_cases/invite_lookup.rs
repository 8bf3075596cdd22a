use gatehouse_core::{Invite, InviteCode, InviteStore};
use tokio::sync::OnceCell;

/// Request-scoped invite resolution.
///
/// The store is asked at most once per lookup; later calls return the cached answer.
/// A blank or missing code resolves to `None` without touching the store, and store
/// failures are logged and treated as "no invite".
pub struct InviteLookup<'a, I>
where
    I: InviteStore,
{
    invite_store: &'a I,
    code: Option<InviteCode>,
    resolved: OnceCell<Option<Invite>>,
}

impl<'a, I> InviteLookup<'a, I>
where
    I: InviteStore,
{
    pub fn new(invite_store: &'a I, code: Option<&str>) -> Self {
        Self {
            invite_store,
            code: code.and_then(InviteCode::parse),
            resolved: OnceCell::new(),
        }
    }

    pub fn code(&self) -> Option<&InviteCode> {
        self.code.as_ref()
    }

    #[tracing::instrument(name = "InviteLookup::resolve", skip_all)]
    pub async fn resolve(&self) -> Option<&Invite> {
        self.resolved
            .get_or_init(|| async {
                let code = self.code.as_ref()?;
                match self.invite_store.find_by_code(code).await {
                    Ok(invite) => invite,
                    Err(e) => {
                        tracing::warn!(error = %e, "Invite lookup failed");
                        None
                    }
                }
            })
            .await
            .as_ref()
    }
}
