use gatehouse_core::{HumanVerifier, RawParams, VerificationOutcome};

/// Used when verification is disabled: every request passes and nothing is sent anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysHuman;

#[async_trait::async_trait]
impl HumanVerifier for AlwaysHuman {
    async fn challenge(&self, _params: &RawParams) -> VerificationOutcome {
        VerificationOutcome::skipped()
    }
}
