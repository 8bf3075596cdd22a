use chrono::Utc;
use fake::Fake;
use fake::faker::internet::en::{SafeEmail, Username};
use gatehouse_core::{
    AccountHandle, Email, Invite, InviteCode, InviteStore, Principal, SessionActivation,
    SiteConfig, domain::params,
};
use secrecy::Secret;
use uuid::Uuid;

use crate::helpers::{TestApp, location, sign_up_form};

fn invite(code: &str) -> Invite {
    Invite::new(InviteCode::parse(code).unwrap(), AccountHandle::new("alice"))
}

fn fake_username() -> String {
    let name: String = Username().fake();
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(20)
        .collect::<String>()
        + "_x"
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::new(SiteConfig::closed()).await;

    let response = app.get("/health").await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn sign_up_form_is_shown_when_registrations_are_open() {
    let app = TestApp::new(SiteConfig::open()).await;

    let response = app.get("/auth/sign_up").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["view"], "new");
    assert_eq!(body["layout"], "auth");
    assert_eq!(body["resource"]["locale"], "en");
    assert!(body["resource"]["account"].is_object());
}

#[tokio::test]
async fn closed_registrations_redirect_to_root() {
    let app = TestApp::new(SiteConfig::closed()).await;

    let form_response = app.get("/auth/sign_up").await;
    let create_response = app
        .post_registration(&sign_up_form("alice@example.com", "alice"))
        .await;

    assert_eq!(form_response.status().as_u16(), 303);
    assert_eq!(location(&form_response), "/");
    assert_eq!(create_response.status().as_u16(), 303);
    assert_eq!(location(&create_response), "/");
    assert!(app.accounts.is_empty().await);
}

#[tokio::test]
async fn single_user_mode_wins_over_open_registrations() {
    let app = TestApp::new(SiteConfig {
        registrations_open: true,
        single_user_mode: true,
        external_identity_auth_mode: false,
    })
    .await;

    let response = app.get("/auth/sign_up").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn site_config_changes_apply_to_later_requests() {
    let app = TestApp::new(SiteConfig::closed()).await;
    assert_eq!(app.get("/auth/sign_up").await.status().as_u16(), 303);

    app.site.replace(SiteConfig::open());

    assert_eq!(app.get("/auth/sign_up").await.status().as_u16(), 200);
}

#[tokio::test]
async fn valid_sign_up_is_persisted_and_sent_to_sign_in() {
    let app = TestApp::new(SiteConfig::open()).await;
    let email: String = SafeEmail().fake();
    let username = fake_username();

    let response = app
        .post_registration(&sign_up_form(&email, &username))
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/auth/sign_in");
    assert!(app.accounts.find_by_email(&email).await.is_some());
}

#[tokio::test]
async fn invalid_sign_up_is_shown_again_with_errors() {
    let app = TestApp::new(SiteConfig::open()).await;
    let mut form = sign_up_form("alice@example.com", "alice");
    form[2] = (params::PASSWORD_CONFIRMATION, "something else");

    let response = app.post_registration(&form).await;

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["password_confirmation"][0], "doesn't match Password");
    assert_eq!(body["resource"]["email"], "alice@example.com");
    assert_eq!(body["resource"]["account"]["username"], "alice");
    assert!(body["resource"].get("password").is_none());
    assert!(app.accounts.is_empty().await);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = TestApp::new(SiteConfig::open()).await;
    app.post_registration(&sign_up_form("alice@example.com", "alice"))
        .await;

    let response = app
        .post_registration(&sign_up_form("alice@example.com", "alice2"))
        .await;

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["email"][0], "has already been taken");
}

#[tokio::test]
async fn unpermitted_fields_are_ignored() {
    let app = TestApp::new(SiteConfig::open()).await;
    let mut form = sign_up_form("alice@example.com", "not valid!");
    form.push(("user[admin]", "true"));

    let response = app.post_registration(&form).await;

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["resource"].get("admin").is_none());
}

#[tokio::test]
async fn valid_invite_admits_when_registrations_are_closed() {
    let app = TestApp::new(SiteConfig::closed()).await;
    app.invites.add_invite(invite("ABC123").with_max_uses(1)).await;

    let form_response = app.get("/auth/sign_up?invite_code=ABC123").await;
    let mut form = sign_up_form("bob@example.com", "bob");
    form.push((params::TOP_LEVEL_INVITE_CODE, "ABC123"));
    let create_response = app.post_registration(&form).await;

    assert_eq!(form_response.status().as_u16(), 200);
    let body: serde_json::Value = form_response.json().await.unwrap();
    assert_eq!(body["resource"]["invite_code"], "ABC123");
    assert_eq!(create_response.status().as_u16(), 303);
    assert_eq!(location(&create_response), "/auth/sign_in");

    let used = app
        .invites
        .find_by_code(&InviteCode::parse("ABC123").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(!used.valid_for_use());
}

#[tokio::test]
async fn single_use_invite_admits_once_whatever_the_nested_code() {
    let app = TestApp::new(SiteConfig::closed()).await;
    app.invites.add_invite(invite("ONCE").with_max_uses(1)).await;

    let mut outcomes = Vec::new();
    for (email, username) in [
        ("bob@example.com", "bob"),
        ("carol@example.com", "carol"),
        ("dave@example.com", "dave"),
    ] {
        let mut form = sign_up_form(email, username);
        form.push((params::TOP_LEVEL_INVITE_CODE, "ONCE"));
        form.push((params::INVITE_CODE, "JUNK"));
        let response = app.post_registration(&form).await;
        outcomes.push(location(&response).to_string());
    }

    assert_eq!(outcomes, ["/auth/sign_in", "/", "/"]);
    assert_eq!(app.accounts.len().await, 1);
    let bob = app.accounts.find_by_email("bob@example.com").await.unwrap();
    assert_eq!(
        app.accounts.invite_code_of(bob.id).await,
        InviteCode::parse("ONCE")
    );
    let used = app
        .invites
        .find_by_code(&InviteCode::parse("ONCE").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(used.uses(), 1);
}

#[tokio::test]
async fn exhausted_invite_redirects_to_root_without_persisting() {
    let app = TestApp::new(SiteConfig::closed()).await;
    app.invites
        .add_invite(invite("GONE").with_max_uses(1).with_uses(1))
        .await;
    let mut form = sign_up_form("bob@example.com", "bob");
    form.push((params::INVITE_CODE, "GONE"));

    let response = app.post_registration(&form).await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");
    assert!(app.accounts.is_empty().await);
}

#[tokio::test]
async fn destroy_is_not_found() {
    let app = TestApp::new(SiteConfig::open()).await;

    let response = app.delete_registration().await;

    assert_eq!(response.status().as_u16(), 404);
}

async fn signed_in(app: &TestApp, password: Option<&str>) -> (Principal, String) {
    let principal = Principal {
        id: Uuid::new_v4(),
        email: Email::parse("carol@example.com").unwrap(),
        handle: AccountHandle::new("carol"),
        has_local_credential: password.is_some(),
    };
    app.accounts
        .insert_principal(&principal, password.map(|p| Secret::new(p.to_string())))
        .await;
    let session_id = Uuid::new_v4().to_string();
    app.sessions
        .sign_in(
            &session_id,
            principal.id,
            SessionActivation {
                id: Uuid::new_v4(),
                user_agent: "integration test".to_string(),
                ip: None,
                last_seen_at: Utc::now(),
            },
        )
        .await;
    (principal, session_id)
}

#[tokio::test]
async fn edit_requires_a_session() {
    let app = TestApp::new(SiteConfig::open()).await;

    let response = app.get("/auth/edit").await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/auth/sign_in");
}

#[tokio::test]
async fn edit_shows_the_account_and_its_sessions() {
    let app = TestApp::new(SiteConfig::closed()).await;
    let (_, session_id) = signed_in(&app, Some("old password")).await;

    let response = app.get_with_session("/auth/edit", &session_id).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["view"], "edit");
    assert_eq!(body["layout"], "admin");
    assert_eq!(body["resource"]["principal"]["handle"], "carol");
    assert_eq!(body["sessions"][0]["user_agent"], "integration test");
}

#[tokio::test]
async fn update_redirects_back_to_edit() {
    let app = TestApp::new(SiteConfig::closed()).await;
    let (principal, session_id) = signed_in(&app, Some("old password")).await;

    let response = app
        .patch_registration(
            &[
                (params::EMAIL, "carol@new.example.com"),
                (params::CURRENT_PASSWORD, "old password"),
            ],
            &session_id,
        )
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/auth/edit");
    let updated = app.accounts.principal(principal.id).await.unwrap();
    assert_eq!(updated.email, Email::parse("carol@new.example.com").unwrap());
}

#[tokio::test]
async fn update_without_current_password_is_shown_again() {
    let app = TestApp::new(SiteConfig::closed()).await;
    let (_, session_id) = signed_in(&app, Some("old password")).await;

    let response = app
        .patch_registration(&[(params::EMAIL, "carol@new.example.com")], &session_id)
        .await;

    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["current_password"][0], "can't be blank");
    assert_eq!(body["resource"]["pending"]["email"], "carol@new.example.com");
}

#[tokio::test]
async fn external_identities_cannot_set_a_password() {
    let app = TestApp::new(SiteConfig {
        registrations_open: false,
        single_user_mode: false,
        external_identity_auth_mode: true,
    })
    .await;
    let (principal, session_id) = signed_in(&app, None).await;

    let response = app
        .patch_registration(
            &[
                (params::PASSWORD, "newpass"),
                (params::PASSWORD_CONFIRMATION, "newpass"),
            ],
            &session_id,
        )
        .await;

    assert_eq!(response.status().as_u16(), 303);
    let after = app.accounts.principal(principal.id).await.unwrap();
    assert!(!after.has_local_credential);
}
