use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use super::{
    candidate::{Field, FieldErrors},
    email::Email,
    password::Password,
    username::Username,
};

/// Changes an authenticated principal submitted for their own record.
///
/// Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdate {
    pub email: Option<String>,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
    #[serde(skip)]
    pub password_confirmation: Option<Secret<String>>,
    #[serde(skip)]
    pub current_password: Option<Secret<String>>,
    pub username: Option<String>,
}

impl AccountUpdate {
    pub fn changes_password(&self) -> bool {
        self.password
            .as_ref()
            .is_some_and(|password| !password.expose_secret().is_empty())
    }

    /// Drops any password change from this update.
    pub fn discard_password(&mut self) {
        self.password = None;
        self.password_confirmation = None;
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Some(email) = &self.email {
            if let Err(e) = Email::parse(email) {
                errors.add(Field::Email, e.to_string());
            }
        }

        if self.changes_password() {
            if let Some(password) = &self.password {
                if let Err(e) = Password::try_from(password.clone()) {
                    errors.add(Field::Password, e.to_string());
                }
                let confirmed = self
                    .password_confirmation
                    .as_ref()
                    .is_none_or(|c| c.expose_secret() == password.expose_secret());
                if !confirmed {
                    errors.add(Field::PasswordConfirmation, "doesn't match Password");
                }
            }
        }

        if let Some(username) = &self.username {
            if let Err(e) = Username::parse(username) {
                errors.add(Field::Username, e.to_string());
            }
        }

        errors
    }
}
