//! Submitted form parameters and the allow-lists applied to them.
//!
//! Forms arrive as flat url-encoded pairs with bracketed names
//! (`user[account_attributes][username]=alice`). A [`ParamSchema`] names every key that may
//! flow into a resource; everything else under the resource namespace is dropped at the
//! boundary, so extra fields such as `user[admin]=true` can never be mass-assigned.

use std::collections::BTreeMap;

use serde::Deserialize;

pub const EMAIL: &str = "user[email]";
pub const PASSWORD: &str = "user[password]";
pub const PASSWORD_CONFIRMATION: &str = "user[password_confirmation]";
pub const CURRENT_PASSWORD: &str = "user[current_password]";
pub const INVITE_CODE: &str = "user[invite_code]";
pub const USERNAME: &str = "user[account_attributes][username]";

/// Top-level invite code, as carried by invite links.
pub const TOP_LEVEL_INVITE_CODE: &str = "invite_code";

/// Keys permitted when signing up.
pub const SIGN_UP: ParamSchema = ParamSchema {
    namespace: "user",
    permitted: &[EMAIL, PASSWORD, PASSWORD_CONFIRMATION, INVITE_CODE, USERNAME],
};

/// Keys permitted when an authenticated principal edits their own record.
pub const ACCOUNT_UPDATE: ParamSchema = ParamSchema {
    namespace: "user",
    permitted: &[
        EMAIL,
        PASSWORD,
        PASSWORD_CONFIRMATION,
        CURRENT_PASSWORD,
        USERNAME,
    ],
};

/// The raw key/value pairs of a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawParams(BTreeMap<String, String>);

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key` unless it is missing or blank.
    pub fn present(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The request-level invite code.
    ///
    /// Both the top-level `invite_code` and the namespaced `user[invite_code]` are checked;
    /// the top-level value wins when it is present.
    pub fn invite_code(&self) -> Option<&str> {
        self.present(TOP_LEVEL_INVITE_CODE)
            .or_else(|| self.present(INVITE_CODE))
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// An explicit allow-list of resource keys.
#[derive(Debug, Clone, Copy)]
pub struct ParamSchema {
    pub namespace: &'static str,
    pub permitted: &'static [&'static str],
}

impl ParamSchema {
    fn owns(&self, key: &str) -> bool {
        key.strip_prefix(self.namespace)
            .is_some_and(|rest| rest.starts_with('['))
    }

    /// Keeps the permitted keys of `raw`.
    ///
    /// Keys outside the schema's namespace (tokens, `_method`, the top-level invite code)
    /// are not part of the resource and are neither kept nor reported.
    pub fn permit(&self, raw: &RawParams) -> PermittedParams {
        let mut values = BTreeMap::new();
        let mut unpermitted = Vec::new();

        for (key, value) in &raw.0 {
            if let Some(permitted) = self.permitted.iter().find(|p| **p == key.as_str()) {
                values.insert(*permitted, value.clone());
            } else if self.owns(key) {
                unpermitted.push(key.clone());
            }
        }

        PermittedParams {
            values,
            unpermitted,
        }
    }
}

/// Output of [`ParamSchema::permit`].
#[derive(Debug, Clone, Default)]
pub struct PermittedParams {
    values: BTreeMap<&'static str, String>,
    unpermitted: Vec<String>,
}

impl PermittedParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn unpermitted(&self) -> &[String] {
        &self.unpermitted
    }
}
