pub mod use_cases;

pub use use_cases::{
    BuildContext, FlowError, FlowOutcome, FormResource, InviteLookup, RegistrationFlow,
    RegistrationRequest, RegistrationResourceBuilder, RenderedForm,
};
