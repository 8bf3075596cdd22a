use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 72;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("can't be blank")]
    Blank,
    #[error("is too short (minimum is {MIN_PASSWORD_LENGTH} characters)")]
    TooShort,
    #[error("is too long (maximum is {MAX_PASSWORD_LENGTH} characters)")]
    TooLong,
}

/// A password that satisfies the length policy.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let length = value.expose_secret().chars().count();
        match length {
            0 => Err(PasswordError::Blank),
            n if n < MIN_PASSWORD_LENGTH => Err(PasswordError::TooShort),
            n if n > MAX_PASSWORD_LENGTH => Err(PasswordError::TooLong),
            _ => Ok(Self(value)),
        }
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
