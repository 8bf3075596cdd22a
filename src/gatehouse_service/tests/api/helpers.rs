use gatehouse_adapters::{
    config::{SiteConfigHandle, VerificationSettings, constants::test},
    locale::LocaleNegotiator,
    persistence::{HashMapAccountStore, HashMapInviteStore, HashMapSessionStore},
    verification::VerificationGate,
};
use gatehouse_application::RegistrationFlow;
use gatehouse_axum::GatewayState;
use gatehouse_core::{Locale, SiteConfig, VERIFICATION_TOKEN_FIELD, domain::params};
use gatehouse_service::GatewayService;
use secrecy::Secret;
use wiremock::MockServer;

pub const SITEVERIFY_PATH: &str = "/recaptcha/api/siteverify";
pub const SESSION_COOKIE: &str = "_session_id";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub invites: HashMapInviteStore,
    pub accounts: HashMapAccountStore,
    pub sessions: HashMapSessionStore,
    pub site: SiteConfigHandle,
    pub verification_server: MockServer,
}

impl TestApp {
    pub async fn new(site: SiteConfig) -> Self {
        Self::with_verification(site, false).await
    }

    pub async fn with_verification(site: SiteConfig, enabled: bool) -> Self {
        let verification_server = MockServer::start().await;
        let verifier = VerificationGate::from_settings(&VerificationSettings {
            enabled,
            secret: Secret::new(test::verification::SECRET.to_string()),
            endpoint: format!("{}{}", verification_server.uri(), SITEVERIFY_PATH),
            timeout_in_millis: test::verification::TIMEOUT_IN_MILLIS,
        })
        .expect("Failed to build verifier");

        let invites = HashMapInviteStore::new();
        let accounts = HashMapAccountStore::new().with_invite_store(invites.clone());
        let sessions = HashMapSessionStore::new(accounts.clone());
        let site = SiteConfigHandle::new(site);

        let state = GatewayState::new(
            RegistrationFlow::new(invites.clone(), accounts.clone(), sessions.clone(), verifier),
            site.clone(),
            LocaleNegotiator::new(
                vec![Locale::new("en"), Locale::new("de")],
                Locale::new("en"),
            ),
            SESSION_COOKIE,
        );

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind address");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(GatewayService::new(state).run_standalone(listener, None));

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build http client");

        Self {
            address,
            http_client,
            invites,
            accounts,
            sessions,
            site,
            verification_server,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_with_session(&self, path: &str, session_id: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .header("cookie", format!("{SESSION_COOKIE}={session_id}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_registration(&self, form: &[(&str, &str)]) -> reqwest::Response {
        self.http_client
            .post(format!("{}/auth", self.address))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_registration(
        &self,
        form: &[(&str, &str)],
        session_id: &str,
    ) -> reqwest::Response {
        self.http_client
            .patch(format!("{}/auth", self.address))
            .header("cookie", format!("{SESSION_COOKIE}={session_id}"))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_registration(&self) -> reqwest::Response {
        self.http_client
            .delete(format!("{}/auth", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn sign_up_form<'a>(email: &'a str, username: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        (params::EMAIL, email),
        (params::PASSWORD, "correct horse"),
        (params::PASSWORD_CONFIRMATION, "correct horse"),
        (params::USERNAME, username),
    ]
}

pub fn with_token<'a>(
    mut form: Vec<(&'static str, &'a str)>,
    token: &'a str,
) -> Vec<(&'static str, &'a str)> {
    form.push((VERIFICATION_TOKEN_FIELD, token));
    form
}

pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
