use async_trait::async_trait;

use crate::domain::{params::RawParams, verification::VerificationOutcome};

/// Strategy for telling humans from automated sign-ups.
///
/// One implementation is picked when the process starts and handed to the registration
/// flow, so no request ever has to look at the deployment flag itself.
///
/// Implementations never fail: anything that goes wrong while asking an external provider
/// is folded into a `VerificationOutcome` with `passed = false`.
#[async_trait]
pub trait HumanVerifier: Send + Sync + 'static {
    async fn challenge(&self, params: &RawParams) -> VerificationOutcome;
}
