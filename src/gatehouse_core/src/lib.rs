pub mod domain;
pub mod http_abstraction;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    account_update::AccountUpdate,
    admission::{AdmissionDecision, AdmissionPolicy, AdmissionReason},
    candidate::{Field, FieldErrors, Profile, RegistrationCandidate},
    destination::{Destination, Layout, View},
    email::{Email, EmailError},
    invite::{AccountHandle, Invite, InviteCode},
    locale::Locale,
    params::{ACCOUNT_UPDATE, ParamSchema, PermittedParams, RawParams, SIGN_UP},
    password::{Password, PasswordError},
    session::{Principal, SessionActivation, SessionContext},
    site_config::SiteConfig,
    username::{Username, UsernameError},
    verification::{ProviderResponse, VERIFICATION_TOKEN_FIELD, VerificationOutcome},
};

pub use ports::repositories::{
    AccountStore, AccountStoreError, InviteStore, InviteStoreError, PersistedAccount,
    SessionStore, SessionStoreError,
};

pub use strategies::human_verifier::HumanVerifier;

pub use http_abstraction::{GatewayRequest, GatewayResponseBuilder, GatewayResponseHelpers};
