//! Framework-agnostic registration handlers.

use gatehouse_application::{FlowError, FlowOutcome, RegistrationFlow, RegistrationRequest};
use gatehouse_core::{
    AccountStore, Destination, GatewayRequest, GatewayResponseBuilder, GatewayResponseHelpers,
    HumanVerifier, InviteStore, Principal, RawParams, SessionStore, SiteConfig,
};

use crate::locale::LocaleNegotiator;

/// Per-request inputs that do not come from the submitted form.
pub struct GatewayContext<'a> {
    /// Snapshot taken when the request started.
    pub site: SiteConfig,
    pub locales: &'a LocaleNegotiator,
    pub session_cookie: &'a str,
}

impl GatewayContext<'_> {
    fn registration_request<R: GatewayRequest>(
        &self,
        request: &R,
        params: RawParams,
    ) -> RegistrationRequest {
        RegistrationRequest {
            params,
            locale: self.locales.negotiate(request.header("accept-language")),
        }
    }
}

/// Turns a flow outcome into a response.
///
/// Forms are JSON: 200 on first display, 422 when a submission was turned down.
pub fn respond<B: GatewayResponseBuilder>(outcome: FlowOutcome, builder: B) -> B::Response {
    match outcome {
        FlowOutcome::Redirect(destination) => builder.see_other(&destination.path()),
        FlowOutcome::NotFound => builder.not_found(),
        FlowOutcome::Render(form) => match serde_json::to_value(&form) {
            Ok(body) if form.rejected => builder.unprocessable(body),
            Ok(body) => builder.ok_json(body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize form");
                builder.internal_error("Internal Server Error")
            }
        },
    }
}

/// `GET /auth/sign_up`
pub async fn handle_new<I, A, S, V, R, B>(
    flow: &RegistrationFlow<I, A, S, V>,
    context: &GatewayContext<'_>,
    request: &R,
    params: RawParams,
    builder: B,
) -> B::Response
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
    R: GatewayRequest,
    B: GatewayResponseBuilder,
{
    let registration = context.registration_request(request, params);
    let outcome = flow.new_registration(&context.site, &registration).await;
    respond(outcome, builder)
}

/// `POST /auth`
pub async fn handle_create<I, A, S, V, R, B>(
    flow: &RegistrationFlow<I, A, S, V>,
    context: &GatewayContext<'_>,
    request: &R,
    params: RawParams,
    builder: B,
) -> Result<B::Response, FlowError>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
    R: GatewayRequest,
    B: GatewayResponseBuilder,
{
    let registration = context.registration_request(request, params);
    let outcome = flow.create(&context.site, &registration).await?;
    Ok(respond(outcome, builder))
}

/// `GET /auth/edit`
pub async fn handle_edit<I, A, S, V, R, B>(
    flow: &RegistrationFlow<I, A, S, V>,
    context: &GatewayContext<'_>,
    request: &R,
    builder: B,
) -> Result<B::Response, FlowError>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
    R: GatewayRequest,
    B: GatewayResponseBuilder,
{
    let Some(principal) = authenticate(flow, context, request).await? else {
        return Ok(builder.see_other(&Destination::SignIn.path()));
    };

    let outcome = flow.edit(&principal).await?;
    Ok(respond(outcome, builder))
}

/// `PUT|PATCH /auth`
pub async fn handle_update<I, A, S, V, R, B>(
    flow: &RegistrationFlow<I, A, S, V>,
    context: &GatewayContext<'_>,
    request: &R,
    params: RawParams,
    builder: B,
) -> Result<B::Response, FlowError>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
    R: GatewayRequest,
    B: GatewayResponseBuilder,
{
    let Some(principal) = authenticate(flow, context, request).await? else {
        return Ok(builder.see_other(&Destination::SignIn.path()));
    };

    let registration = context.registration_request(request, params);
    let outcome = flow
        .update(&context.site, &principal, &registration)
        .await?;
    Ok(respond(outcome, builder))
}

/// `DELETE /auth`
pub fn handle_destroy<I, A, S, V, B>(flow: &RegistrationFlow<I, A, S, V>, builder: B) -> B::Response
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
    B: GatewayResponseBuilder,
{
    respond(flow.destroy(), builder)
}

/// `GET /auth/sign_in/landing`
pub async fn handle_sign_in_landing<I, A, S, V, B>(
    flow: &RegistrationFlow<I, A, S, V>,
    params: &RawParams,
    builder: B,
) -> B::Response
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
    B: GatewayResponseBuilder,
{
    let destination = flow.after_sign_in(params).await;
    builder.see_other(&destination.path())
}

async fn authenticate<I, A, S, V, R>(
    flow: &RegistrationFlow<I, A, S, V>,
    context: &GatewayContext<'_>,
    request: &R,
) -> Result<Option<Principal>, FlowError>
where
    I: InviteStore,
    A: AccountStore,
    S: SessionStore,
    V: HumanVerifier,
    R: GatewayRequest,
{
    let principal = flow
        .current_principal(request.cookie(context.session_cookie))
        .await?;
    if principal.is_none() {
        tracing::debug!(path = request.path(), "No signed-in principal");
    }
    Ok(principal)
}
