pub const ENV_PREFIX: &str = "GATEHOUSE";
pub const ENV_SEPARATOR: &str = "__";
pub const CONFIG_FILE: &str = "config/base";

pub mod env {
    pub const REGISTRATIONS_OPEN_ENV_VAR: &str = "GATEHOUSE__SITE__REGISTRATIONS_OPEN";
    pub const SINGLE_USER_MODE_ENV_VAR: &str = "GATEHOUSE__SITE__SINGLE_USER_MODE";
    pub const EXTERNAL_IDENTITY_AUTH_MODE_ENV_VAR: &str =
        "GATEHOUSE__SITE__EXTERNAL_IDENTITY_AUTH_MODE";
    pub const VERIFICATION_ENABLED_ENV_VAR: &str = "GATEHOUSE__VERIFICATION__ENABLED";
    pub const VERIFICATION_SECRET_ENV_VAR: &str = "GATEHOUSE__VERIFICATION__SECRET";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "GATEHOUSE__APP__ALLOWED_ORIGINS";
    pub const DATABASE_URL_ENV_VAR: &str = "GATEHOUSE__DATABASE__URL";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const DEFAULT_LOCALE: &str = "en";
    pub const SESSION_COOKIE_NAME: &str = "_session_id";

    pub mod verification {
        pub const ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";
        pub const TIMEOUT_IN_MILLIS: u64 = 3_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod verification {
        pub const SECRET: &str = "test-verification-secret";
        pub const TIMEOUT_IN_MILLIS: u64 = 200;
    }
}
