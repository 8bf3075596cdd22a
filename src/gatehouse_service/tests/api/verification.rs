use gatehouse_core::SiteConfig;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{SITEVERIFY_PATH, TestApp, location, sign_up_form, with_token};

#[tokio::test]
async fn missing_token_shows_the_form_again_without_calling_the_provider() {
    let app = TestApp::with_verification(SiteConfig::open(), true).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.verification_server)
        .await;

    let response = app
        .post_registration(&sign_up_form("alice@example.com", "alice"))
        .await;

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["resource"]["email"], "alice@example.com");
    assert_eq!(body["resource"]["account"]["username"], "alice");
    assert!(app.accounts.is_empty().await);
}

#[tokio::test]
async fn verified_human_is_registered() {
    let app = TestApp::with_verification(SiteConfig::open(), true).await;
    Mock::given(method("POST"))
        .and(path(SITEVERIFY_PATH))
        .and(body_string_contains("response=human-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .expect(1)
        .mount(&app.verification_server)
        .await;

    let response = app
        .post_registration(&with_token(
            sign_up_form("alice@example.com", "alice"),
            "human-token",
        ))
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/auth/sign_in");
}

#[tokio::test]
async fn provider_outage_fails_closed() {
    let app = TestApp::with_verification(SiteConfig::open(), true).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.verification_server)
        .await;

    let response = app
        .post_registration(&with_token(
            sign_up_form("alice@example.com", "alice"),
            "token",
        ))
        .await;

    assert_eq!(response.status().as_u16(), 422);
    assert!(app.accounts.is_empty().await);
}

#[tokio::test]
async fn slow_provider_fails_closed() {
    let app = TestApp::with_verification(SiteConfig::open(), true).await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "success": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&app.verification_server)
        .await;

    let response = app
        .post_registration(&with_token(
            sign_up_form("alice@example.com", "alice"),
            "token",
        ))
        .await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn verification_runs_before_admission() {
    let app = TestApp::with_verification(SiteConfig::closed(), true).await;

    let response = app
        .post_registration(&sign_up_form("alice@example.com", "alice"))
        .await;

    assert_eq!(response.status().as_u16(), 422);
}
