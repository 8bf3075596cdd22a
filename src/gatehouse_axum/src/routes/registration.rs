//! Axum registration routes.

use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_adapters::handlers;
use gatehouse_application::FlowError;
use gatehouse_core::{AccountStore, HumanVerifier, InviteStore, RawParams, SessionStore};
use thiserror::Error;

use crate::adapters::{AxumRequest, response_builder};
use crate::state::GatewayState;

/// `GET /auth/sign_up`
#[tracing::instrument(name = "New registration", skip_all)]
pub async fn new_registration<I, A, S, V>(
    State(state): State<GatewayState<I, A, S, V>>,
    request: AxumRequest,
    Query(params): Query<RawParams>,
) -> Response
where
    I: InviteStore + 'static,
    A: AccountStore + 'static,
    S: SessionStore + 'static,
    V: HumanVerifier,
{
    let context = state.context();
    handlers::handle_new(&state.flow, &context, &request, params, response_builder()).await
}

/// `POST /auth`
#[tracing::instrument(name = "Create registration", skip_all)]
pub async fn create<I, A, S, V>(
    State(state): State<GatewayState<I, A, S, V>>,
    request: AxumRequest,
    Form(params): Form<RawParams>,
) -> Result<Response, RegistrationError>
where
    I: InviteStore + 'static,
    A: AccountStore + 'static,
    S: SessionStore + 'static,
    V: HumanVerifier,
{
    let context = state.context();
    let response =
        handlers::handle_create(&state.flow, &context, &request, params, response_builder())
            .await?;
    Ok(response)
}

/// `GET /auth/edit`
#[tracing::instrument(name = "Edit registration", skip_all)]
pub async fn edit<I, A, S, V>(
    State(state): State<GatewayState<I, A, S, V>>,
    request: AxumRequest,
) -> Result<Response, RegistrationError>
where
    I: InviteStore + 'static,
    A: AccountStore + 'static,
    S: SessionStore + 'static,
    V: HumanVerifier,
{
    let context = state.context();
    let response =
        handlers::handle_edit(&state.flow, &context, &request, response_builder()).await?;
    Ok(response)
}

/// `PUT|PATCH /auth`
#[tracing::instrument(name = "Update registration", skip_all)]
pub async fn update<I, A, S, V>(
    State(state): State<GatewayState<I, A, S, V>>,
    request: AxumRequest,
    Form(params): Form<RawParams>,
) -> Result<Response, RegistrationError>
where
    I: InviteStore + 'static,
    A: AccountStore + 'static,
    S: SessionStore + 'static,
    V: HumanVerifier,
{
    let context = state.context();
    let response =
        handlers::handle_update(&state.flow, &context, &request, params, response_builder())
            .await?;
    Ok(response)
}

/// `DELETE /auth`
#[tracing::instrument(name = "Destroy registration", skip_all)]
pub async fn destroy<I, A, S, V>(State(state): State<GatewayState<I, A, S, V>>) -> Response
where
    I: InviteStore + 'static,
    A: AccountStore + 'static,
    S: SessionStore + 'static,
    V: HumanVerifier,
{
    handlers::handle_destroy(&state.flow, response_builder())
}

/// `GET /auth/sign_in/landing`
#[tracing::instrument(name = "Sign-in landing", skip_all)]
pub async fn sign_in_landing<I, A, S, V>(
    State(state): State<GatewayState<I, A, S, V>>,
    Query(params): Query<RawParams>,
) -> Response
where
    I: InviteStore + 'static,
    A: AccountStore + 'static,
    S: SessionStore + 'static,
    V: HumanVerifier,
{
    handlers::handle_sign_in_landing(&state.flow, &params, response_builder()).await
}

/// Errors a registration route cannot turn into a form or a redirect.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Registration flow failed: {0}")]
    Flow(#[from] FlowError),
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Registration request failed");
        let (status, message) = match self {
            RegistrationError::Flow(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
