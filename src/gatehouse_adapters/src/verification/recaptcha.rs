use gatehouse_core::{HumanVerifier, RawParams, VERIFICATION_TOKEN_FIELD, VerificationOutcome};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Asks a reCAPTCHA-compatible `siteverify` endpoint whether a form was filled in by a human.
///
/// One POST per challenge, no retries. Whatever goes wrong on the way (timeouts,
/// connection errors, non-200 answers, bodies without a boolean `success`) fails closed.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    http_client: Client,
    endpoint: String,
    secret: Secret<String>,
}

impl RecaptchaVerifier {
    /// `http_client` should carry a short timeout; a timed out request counts as a failure.
    pub fn new(endpoint: String, secret: Secret<String>, http_client: Client) -> Self {
        Self {
            http_client,
            endpoint,
            secret,
        }
    }

    async fn site_verify(&self, token: &str) -> Result<SiteVerifyResponse, SiteVerifyError> {
        let request_body = SiteVerifyRequest {
            secret: self.secret.expose_secret(),
            response: token,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .form(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SiteVerifyError::UnexpectedStatus(status));
        }

        Ok(response.json::<SiteVerifyResponse>().await?)
    }
}

#[async_trait::async_trait]
impl HumanVerifier for RecaptchaVerifier {
    #[tracing::instrument(name = "Verifying human", skip_all)]
    async fn challenge(&self, params: &RawParams) -> VerificationOutcome {
        let Some(token) = params.present(VERIFICATION_TOKEN_FIELD) else {
            return VerificationOutcome::missing_token();
        };

        match self.site_verify(token).await {
            Ok(body) => {
                if !body.error_codes.is_empty() {
                    tracing::debug!(error_codes = ?body.error_codes, "Verification provider reported errors");
                }
                VerificationOutcome::answered(body.success, body.error_codes)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Verification provider unavailable");
                VerificationOutcome::transport_failure(e.to_string())
            }
        }
    }
}

#[derive(Debug, Error)]
enum SiteVerifyError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),
}

#[derive(Serialize, Debug)]
struct SiteVerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

#[derive(Deserialize, Debug)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::ProviderResponse;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SITEVERIFY_PATH: &str = "/recaptcha/api/siteverify";

    fn verifier(server: &MockServer, timeout: Duration) -> RecaptchaVerifier {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        RecaptchaVerifier::new(
            format!("{}{}", server.uri(), SITEVERIFY_PATH),
            Secret::new("server-secret".to_string()),
            http_client,
        )
    }

    fn params_with_token(token: &str) -> RawParams {
        [(VERIFICATION_TOKEN_FIELD, token)].into_iter().collect()
    }

    #[tokio::test]
    async fn posts_secret_and_token_and_reads_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SITEVERIFY_PATH))
            .and(body_string_contains("secret=server-secret"))
            .and(body_string_contains("response=token-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = verifier(&server, Duration::from_secs(2))
            .challenge(&params_with_token("token-123"))
            .await;

        assert!(outcome.passed);
    }

    #[tokio::test]
    async fn provider_saying_no_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error-codes": ["invalid-input-response"]
            })))
            .mount(&server)
            .await;

        let outcome = verifier(&server, Duration::from_secs(2))
            .challenge(&params_with_token("forged"))
            .await;

        assert!(!outcome.passed);
        assert_eq!(
            outcome.provider_response,
            ProviderResponse::Answered {
                success: false,
                error_codes: vec!["invalid-input-response".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn missing_or_blank_token_skips_the_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let verifier = verifier(&server, Duration::from_secs(2));

        let absent = verifier.challenge(&RawParams::new()).await;
        let blank = verifier.challenge(&params_with_token("")).await;

        assert_eq!(absent, VerificationOutcome::missing_token());
        assert_eq!(blank, VerificationOutcome::missing_token());
    }

    #[tokio::test]
    async fn non_200_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(serde_json::json!({ "success": true })),
            )
            .mount(&server)
            .await;

        let outcome = verifier(&server, Duration::from_secs(2))
            .challenge(&params_with_token("token"))
            .await;

        assert!(!outcome.passed);
        assert!(matches!(
            outcome.provider_response,
            ProviderResponse::TransportFailure { .. }
        ));
    }

    #[tokio::test]
    async fn malformed_body_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let outcome = verifier(&server, Duration::from_secs(2))
            .challenge(&params_with_token("token"))
            .await;

        assert!(!outcome.passed);
    }

    #[tokio::test]
    async fn body_without_success_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "hostname": "example.com" })),
            )
            .mount(&server)
            .await;

        let outcome = verifier(&server, Duration::from_secs(2))
            .challenge(&params_with_token("token"))
            .await;

        assert!(!outcome.passed);
    }

    #[tokio::test]
    async fn timeout_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let outcome = verifier(&server, Duration::from_millis(50))
            .challenge(&params_with_token("token"))
            .await;

        assert!(!outcome.passed);
    }
}
