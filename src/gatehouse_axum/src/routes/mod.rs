//! Axum-specific route handlers.
//!
//! Each route extracts what it needs with Axum's extractors, calls the framework-agnostic
//! handler, and returns the response that handler built.

pub mod registration;

pub use registration::{
    RegistrationError, create, destroy, edit, new_registration, sign_in_landing, update,
};
