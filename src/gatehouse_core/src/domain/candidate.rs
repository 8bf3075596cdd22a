use std::collections::BTreeMap;

use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use super::{
    email::Email, invite::InviteCode, locale::Locale, password::Password, username::Username,
};

/// Form fields that validation errors attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "password_confirmation")]
    PasswordConfirmation,
    #[serde(rename = "current_password")]
    CurrentPassword,
    #[serde(rename = "locale")]
    Locale,
    #[serde(rename = "invite_code")]
    InviteCode,
    #[serde(rename = "account.username")]
    Username,
}

/// Field-level validation messages, rendered inline next to the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn on(&self, field: Field) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            for message in messages {
                if !self.on(field).contains(&message) {
                    self.add(field, message);
                }
            }
        }
    }
}

/// The nested profile of a registering account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub username: String,
}

/// An account that has been filled in from a sign-up form but not saved.
///
/// Fields hold what the requester typed, valid or not, so the form can be shown again
/// with their input intact. Passwords are never serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrationCandidate {
    pub email: String,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
    #[serde(skip)]
    pub password_confirmation: Option<Secret<String>>,
    pub locale: Option<Locale>,
    pub invite_code: Option<InviteCode>,
    #[serde(rename = "account")]
    pub profile: Option<Profile>,
}

impl RegistrationCandidate {
    pub fn username(&self) -> Option<&str> {
        self.profile.as_ref().map(|profile| profile.username.as_str())
    }

    /// Runs the field rules without saving anything.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Err(e) = Email::parse(&self.email) {
            errors.add(Field::Email, e.to_string());
        }

        let blank = || Secret::new(String::new());
        let password = self.password.clone().unwrap_or_else(blank);
        let confirmation = self.password_confirmation.clone().unwrap_or_else(blank);
        if let Err(e) = Password::try_from(password.clone()) {
            errors.add(Field::Password, e.to_string());
        }
        if self.password_confirmation.is_some()
            && password.expose_secret() != confirmation.expose_secret()
        {
            errors.add(Field::PasswordConfirmation, "doesn't match Password");
        }

        if self.locale.is_none() {
            errors.add(Field::Locale, "can't be blank");
        }

        let username = self.username().unwrap_or_default();
        if let Err(e) = Username::parse(username) {
            errors.add(Field::Username, e.to_string());
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
