use config::{Config, ConfigError, Environment, File};
use gatehouse_core::{Locale, SiteConfig};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{CONFIG_FILE, ENV_PREFIX, ENV_SEPARATOR, prod};

/// Origins allowed to call the gateway cross-site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
    pub available_locales: Vec<Locale>,
    pub default_locale: Locale,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    pub enabled: bool,
    pub secret: Secret<String>,
    pub endpoint: String,
    pub timeout_in_millis: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub cookie_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

/// Everything the gateway reads from its environment.
///
/// Sources, later ones winning: built-in defaults, `config/base.json` if present,
/// then `GATEHOUSE__SECTION__KEY` environment variables (a `.env` file is loaded first).
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySettings {
    pub app: AppSettings,
    pub site: SiteConfig,
    pub verification: VerificationSettings,
    pub session: SessionSettings,
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
}

impl GatewaySettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&[])
    }

    /// Like [`GatewaySettings::load`], with `overrides` applied on top of every source.
    pub fn load_with(overrides: &[(&str, &str)]) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("app.available_locales", vec![prod::DEFAULT_LOCALE])?
            .set_default("app.default_locale", prod::DEFAULT_LOCALE)?
            .set_default("site.registrations_open", false)?
            .set_default("site.single_user_mode", false)?
            .set_default("site.external_identity_auth_mode", false)?
            .set_default("verification.enabled", false)?
            .set_default("verification.secret", "")?
            .set_default("verification.endpoint", prod::verification::ENDPOINT)?
            .set_default(
                "verification.timeout_in_millis",
                prod::verification::TIMEOUT_IN_MILLIS,
            )?
            .set_default("session.cookie_name", prod::SESSION_COOKIE_NAME)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("app.allowed_origins")
                    .with_list_parse_key("app.available_locales"),
            );

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }
}
