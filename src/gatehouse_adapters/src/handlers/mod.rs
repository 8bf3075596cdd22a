//! Framework-agnostic registration handlers.
//!
//! Framework-specific routes extract the request parts and the submitted form, call these
//! handlers, and hand back whatever response the builder produced.

pub mod registration;

pub use registration::{
    GatewayContext, handle_create, handle_destroy, handle_edit, handle_new,
    handle_sign_in_landing, handle_update, respond,
};
