pub mod account_update;
pub mod admission;
pub mod candidate;
pub mod destination;
pub mod email;
pub mod invite;
pub mod locale;
pub mod params;
pub mod password;
pub mod session;
pub mod site_config;
pub mod username;
pub mod verification;
