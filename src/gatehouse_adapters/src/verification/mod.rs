//! Human-verification strategies.
//!
//! [`VerificationGate`] picks one strategy when the service starts: [`AlwaysHuman`] when
//! verification is switched off, [`RecaptchaVerifier`] when it is on.

pub mod always_human;
pub mod gate;
pub mod recaptcha;

pub use always_human::AlwaysHuman;
pub use gate::VerificationGate;
pub use recaptcha::RecaptchaVerifier;
