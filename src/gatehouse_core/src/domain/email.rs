use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("can't be blank")]
    Blank,
    #[error("is invalid")]
    Invalid,
}

/// A syntactically valid email address.
///
/// The address is kept behind a `Secret` so it never ends up in logs by accident.
/// Addresses are compared case-insensitively.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        Self::try_from(Secret::new(raw.to_string()))
    }

    fn normalized(&self) -> String {
        self.0.expose_secret().to_lowercase()
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let trimmed = value.expose_secret().trim();
        if trimmed.is_empty() {
            return Err(EmailError::Blank);
        }
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(EmailError::Invalid);
        }
        Ok(Self(Secret::new(trimmed.to_string())))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}
