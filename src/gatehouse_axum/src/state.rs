use std::sync::Arc;

use gatehouse_adapters::{config::SiteConfigHandle, handlers::GatewayContext, locale::LocaleNegotiator};
use gatehouse_application::RegistrationFlow;
use gatehouse_core::{AccountStore, HumanVerifier, InviteStore, SessionStore};

/// Shared state of the registration routes.
pub struct GatewayState<I, A, S, V>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
{
    pub flow: Arc<RegistrationFlow<I, A, S, V>>,
    pub site: SiteConfigHandle,
    pub locales: Arc<LocaleNegotiator>,
    pub session_cookie: Arc<str>,
}

impl<I, A, S, V> GatewayState<I, A, S, V>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
{
    pub fn new(
        flow: RegistrationFlow<I, A, S, V>,
        site: SiteConfigHandle,
        locales: LocaleNegotiator,
        session_cookie: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            flow: Arc::new(flow),
            site,
            locales: Arc::new(locales),
            session_cookie: session_cookie.into(),
        }
    }

    /// Per-request context with a fresh site configuration snapshot.
    pub fn context(&self) -> GatewayContext<'_> {
        GatewayContext {
            site: self.site.snapshot(),
            locales: &self.locales,
            session_cookie: &self.session_cookie,
        }
    }
}

impl<I, A, S, V> Clone for GatewayState<I, A, S, V>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
{
    fn clone(&self) -> Self {
        Self {
            flow: Arc::clone(&self.flow),
            site: self.site.clone(),
            locales: Arc::clone(&self.locales),
            session_cookie: Arc::clone(&self.session_cookie),
        }
    }
}
