pub mod config;
pub mod handlers;
pub mod locale;
pub mod persistence;
pub mod verification;
