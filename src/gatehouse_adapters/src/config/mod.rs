pub mod constants;
pub mod settings;
pub mod site_config_handle;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppSettings, DatabaseSettings, GatewaySettings, SessionSettings,
    VerificationSettings,
};
pub use site_config_handle::SiteConfigHandle;
