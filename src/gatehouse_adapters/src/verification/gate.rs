use std::time::Duration;

use gatehouse_core::{HumanVerifier, RawParams, VerificationOutcome};

use super::{AlwaysHuman, RecaptchaVerifier};
use crate::config::VerificationSettings;

/// The verifier chosen from [`VerificationSettings`] at start-up.
#[derive(Clone)]
pub enum VerificationGate {
    Disabled(AlwaysHuman),
    Recaptcha(RecaptchaVerifier),
}

impl VerificationGate {
    pub fn from_settings(settings: &VerificationSettings) -> Result<Self, reqwest::Error> {
        if !settings.enabled {
            tracing::info!("Human verification disabled");
            return Ok(Self::Disabled(AlwaysHuman));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_in_millis))
            .build()?;

        tracing::info!(endpoint = %settings.endpoint, "Human verification enabled");
        Ok(Self::Recaptcha(RecaptchaVerifier::new(
            settings.endpoint.clone(),
            settings.secret.clone(),
            http_client,
        )))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Recaptcha(_))
    }
}

#[async_trait::async_trait]
impl HumanVerifier for VerificationGate {
    async fn challenge(&self, params: &RawParams) -> VerificationOutcome {
        match self {
            Self::Disabled(verifier) => verifier.challenge(params).await,
            Self::Recaptcha(verifier) => verifier.challenge(params).await,
        }
    }
}
