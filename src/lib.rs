//! # Gatehouse - account self-registration gateway
//!
//! Facade crate that re-exports the public APIs of the gateway's components.
//!
//! ## Structure
//!
//! - **Core domain types**: `RegistrationCandidate`, `Invite`, `SiteConfig`, `AdmissionPolicy`, etc.
//! - **Ports**: `InviteStore`, `AccountStore`, `SessionStore`, `HumanVerifier`
//! - **Use cases**: `RegistrationFlow`, `InviteLookup`, `RegistrationResourceBuilder`
//! - **Adapters**: in-memory and Postgres stores, verification strategies, configuration
//! - **Service**: `GatewayService`, the axum router serving the registration routes

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

pub use gatehouse_core::{
    AccountHandle, AccountUpdate, AdmissionDecision, AdmissionPolicy, Destination, Email,
    FieldErrors, Invite, InviteCode, Locale, Principal, RawParams, RegistrationCandidate,
    SiteConfig, VerificationOutcome,
};

// ============================================================================
// Ports
// ============================================================================

pub use gatehouse_core::{
    AccountStore, AccountStoreError, HumanVerifier, InviteStore, InviteStoreError, SessionStore,
    SessionStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

pub use gatehouse_application::{
    FlowError, FlowOutcome, InviteLookup, RegistrationFlow, RegistrationRequest,
    RegistrationResourceBuilder,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use gatehouse_adapters::{config, handlers, locale, persistence, verification};
}

pub use gatehouse_adapters::{
    config::{GatewaySettings, SiteConfigHandle},
    locale::LocaleNegotiator,
    persistence::{
        HashMapAccountStore, HashMapInviteStore, HashMapSessionStore, InviteUsage,
        PostgresInviteStore,
    },
    verification::{AlwaysHuman, RecaptchaVerifier, VerificationGate},
};

// ============================================================================
// Gateway Service (Main Entry Point)
// ============================================================================

pub use gatehouse_axum::GatewayState;
pub use gatehouse_service::GatewayService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the store traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
