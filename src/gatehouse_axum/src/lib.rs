//! Axum integration for the registration gateway.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_core: HTTP trait definitions  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_axum: Axum implementations    │
//! │  - AxumRequest extractor                 │
//! │  - AxumResponseBuilder                   │
//! │  - registration routes + GatewayState    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use gatehouse_axum::{GatewayState, routes};
//!
//! let app = Router::new()
//!     .route("/auth/sign_up", get(routes::new_registration::<I, A, S, V>))
//!     .with_state(state);
//! ```

pub mod adapters;
pub mod routes;
pub mod state;

pub use adapters::{AxumRequest, AxumResponseBuilder, response_builder};
pub use state::GatewayState;
