pub mod invite_lookup;
pub mod registration_builder;
pub mod registration_flow;

// Re-export for convenience
pub use invite_lookup::InviteLookup;
pub use registration_builder::{BuildContext, RegistrationResourceBuilder};
pub use registration_flow::{
    FlowError, FlowOutcome, FormResource, RegistrationFlow, RegistrationRequest, RenderedForm,
};
