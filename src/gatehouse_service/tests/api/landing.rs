use gatehouse_core::{AccountHandle, Invite, InviteCode, SiteConfig, domain::params};

use crate::helpers::{TestApp, location, sign_up_form};

#[tokio::test]
async fn autofollow_invite_lands_on_the_inviters_page() {
    let app = TestApp::new(SiteConfig::closed()).await;
    app.invites
        .add_invite(
            Invite::new(InviteCode::parse("ABC123").unwrap(), AccountHandle::new("alice"))
                .with_autofollow(true),
        )
        .await;
    let mut form = sign_up_form("bob@example.com", "bob");
    form.push((params::INVITE_CODE, "ABC123"));

    let created = app.post_registration(&form).await;
    let landing = app.get("/auth/sign_in/landing?invite_code=ABC123").await;

    assert_eq!(location(&created), "/auth/sign_in");
    assert_eq!(landing.status().as_u16(), 303);
    assert_eq!(location(&landing), "/@alice");
}

#[tokio::test]
async fn landing_without_invite_goes_to_the_app() {
    let app = TestApp::new(SiteConfig::open()).await;

    let landing = app.get("/auth/sign_in/landing").await;

    assert_eq!(landing.status().as_u16(), 303);
    assert_eq!(location(&landing), "/web");
}

#[tokio::test]
async fn invite_without_autofollow_goes_to_the_app() {
    let app = TestApp::new(SiteConfig::open()).await;
    app.invites
        .add_invite(Invite::new(
            InviteCode::parse("PLAIN").unwrap(),
            AccountHandle::new("alice"),
        ))
        .await;

    let landing = app.get("/auth/sign_in/landing?invite_code=PLAIN").await;

    assert_eq!(location(&landing), "/web");
}
