use std::sync::Arc;

use arc_swap::ArcSwap;
use gatehouse_core::SiteConfig;

/// Shared, replaceable site configuration.
///
/// Requests take one [`snapshot`](SiteConfigHandle::snapshot) when they start; an admin
/// change is published with [`replace`](SiteConfigHandle::replace) and is seen by every
/// request that starts afterwards.
#[derive(Debug, Clone)]
pub struct SiteConfigHandle {
    current: Arc<ArcSwap<SiteConfig>>,
}

impl SiteConfigHandle {
    pub fn new(site: SiteConfig) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(site)),
        }
    }

    pub fn snapshot(&self) -> SiteConfig {
        **self.current.load()
    }

    pub fn replace(&self, site: SiteConfig) {
        tracing::info!(?site, "Site configuration replaced");
        self.current.store(Arc::new(site));
    }
}
