use serde::Serialize;

/// Form field carrying the verification provider's response token.
pub const VERIFICATION_TOKEN_FIELD: &str = "g-recaptcha-response";

/// What the verification provider (or lack of one) said about a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderResponse {
    /// Verification is disabled for this deployment.
    Skipped,
    /// The form carried no provider token; the provider was not contacted.
    MissingToken,
    /// The provider answered with a well-formed body.
    Answered {
        success: bool,
        error_codes: Vec<String>,
    },
    /// The provider was unreachable, timed out, answered non-200 or with a malformed body.
    TransportFailure { message: String },
}

/// Result of a human-verification challenge. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub passed: bool,
    pub provider_response: ProviderResponse,
}

impl VerificationOutcome {
    pub fn skipped() -> Self {
        Self {
            passed: true,
            provider_response: ProviderResponse::Skipped,
        }
    }

    pub fn missing_token() -> Self {
        Self {
            passed: false,
            provider_response: ProviderResponse::MissingToken,
        }
    }

    pub fn answered(success: bool, error_codes: Vec<String>) -> Self {
        Self {
            passed: success,
            provider_response: ProviderResponse::Answered {
                success,
                error_codes,
            },
        }
    }

    /// Transport problems fail closed.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            provider_response: ProviderResponse::TransportFailure {
                message: message.into(),
            },
        }
    }
}
