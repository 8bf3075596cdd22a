use serde::Serialize;

use super::invite::AccountHandle;

pub const ROOT_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/auth/sign_in";
pub const SIGN_UP_PATH: &str = "/auth/sign_up";
pub const EDIT_REGISTRATION_PATH: &str = "/auth/edit";
pub const AFTER_SIGN_IN_PATH: &str = "/web";

/// Where a requester is sent after a step completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The site root. Also where denied sign-up attempts land.
    Root,
    SignIn,
    EditRegistration,
    /// Public page of an account.
    AccountPage(AccountHandle),
    /// Whatever the session subsystem shows by default after signing in.
    AfterSignIn,
}

impl Destination {
    pub fn path(&self) -> String {
        match self {
            Destination::Root => ROOT_PATH.to_string(),
            Destination::SignIn => SIGN_IN_PATH.to_string(),
            Destination::EditRegistration => EDIT_REGISTRATION_PATH.to_string(),
            Destination::AccountPage(handle) => format!("/{handle}"),
            Destination::AfterSignIn => AFTER_SIGN_IN_PATH.to_string(),
        }
    }
}

/// Form a rendered step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    New,
    Edit,
}

/// Page chrome a rendered step is wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Auth,
    Admin,
}

impl View {
    pub fn layout(self) -> Layout {
        match self {
            View::New => Layout::Auth,
            View::Edit => Layout::Admin,
        }
    }
}
