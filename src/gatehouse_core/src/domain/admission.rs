use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{invite::Invite, site_config::SiteConfig};

/// Why a registration attempt was let through or turned away.
///
/// Only ever logged; the requester never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionReason {
    SingleUserMode,
    RegistrationsOpen,
    ValidInvite,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionDecision {
    pub allowed: bool,
    pub reason: AdmissionReason,
}

/// Decides whether a registration attempt may proceed at all.
///
/// Single-user mode is an unconditional override: it denies even when registrations are
/// open or the invite is valid. Otherwise the attempt is admitted when registrations are
/// open or a usable invite accompanies it.
pub struct AdmissionPolicy;

impl AdmissionPolicy {
    pub fn decide_at(
        site: &SiteConfig,
        invite: Option<&Invite>,
        now: DateTime<Utc>,
    ) -> AdmissionDecision {
        let (allowed, reason) = if site.single_user_mode {
            (false, AdmissionReason::SingleUserMode)
        } else if site.registrations_open {
            (true, AdmissionReason::RegistrationsOpen)
        } else if invite.is_some_and(|invite| invite.valid_for_use_at(now)) {
            (true, AdmissionReason::ValidInvite)
        } else {
            (false, AdmissionReason::Closed)
        };

        AdmissionDecision { allowed, reason }
    }

    pub fn decide(site: &SiteConfig, invite: Option<&Invite>) -> AdmissionDecision {
        Self::decide_at(site, invite, Utc::now())
    }

    pub fn is_allowed(site: &SiteConfig, invite: Option<&Invite>) -> bool {
        Self::decide(site, invite).allowed
    }
}
