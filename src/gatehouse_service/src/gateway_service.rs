use axum::{
    Json, Router,
    http::{HeaderValue, Method, request},
    routing::get,
};
use gatehouse_adapters::config::AllowedOrigins;
use gatehouse_axum::{GatewayState, routes};
use gatehouse_core::{AccountStore, HumanVerifier, InviteStore, SessionStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The registration gateway: every registration route plus a health check.
pub struct GatewayService {
    router: Router,
}

impl GatewayService {
    /// Stores and the verifier are shared by all requests through `state`.
    pub fn new<I, A, S, V>(state: GatewayState<I, A, S, V>) -> Self
    where
        I: InviteStore + 'static,
        A: AccountStore + 'static,
        S: SessionStore + 'static,
        V: HumanVerifier,
    {
        let router = Router::new()
            .route(
                "/auth/sign_up",
                get(routes::new_registration::<I, A, S, V>),
            )
            .route(
                "/auth",
                axum::routing::post(routes::create::<I, A, S, V>)
                    .put(routes::update::<I, A, S, V>)
                    .patch(routes::update::<I, A, S, V>)
                    .delete(routes::destroy::<I, A, S, V>),
            )
            .route("/auth/edit", get(routes::edit::<I, A, S, V>))
            .route(
                "/auth/sign_in/landing",
                get(routes::sign_in_landing::<I, A, S, V>),
            )
            .with_state(state)
            .route("/health", get(health));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// The gateway as a router that can be nested into another application.
    ///
    /// With `allowed_origins`, cross-site requests are accepted from exactly those origins.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .is_ok_and(|origin| allowed_origins.contains(origin))
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serves the gateway on `listener` until the process stops.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Registration gateway listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
