use color_eyre::eyre::Result;
use gatehouse_adapters::{
    config::{GatewaySettings, SiteConfigHandle},
    locale::LocaleNegotiator,
    persistence::{
        HashMapAccountStore, HashMapInviteStore, HashMapSessionStore, PostgresInviteStore,
    },
    verification::VerificationGate,
};
use gatehouse_application::RegistrationFlow;
use gatehouse_axum::GatewayState;
use gatehouse_core::InviteStore;
use gatehouse_service::GatewayService;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = GatewaySettings::load()?;

    match &settings.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database.url.expose_secret())
                .await?;
            sqlx::migrate!().run(&pg_pool).await?;

            let invites = PostgresInviteStore::new(pg_pool);
            let accounts = HashMapAccountStore::new().with_invite_store(invites.clone());
            serve(settings.clone(), invites, accounts).await
        }
        None => {
            tracing::warn!("No database configured, invites are kept in memory");
            let invites = HashMapInviteStore::new();
            let accounts = HashMapAccountStore::new().with_invite_store(invites.clone());
            serve(settings.clone(), invites, accounts).await
        }
    }
}

async fn serve<I>(settings: GatewaySettings, invites: I, accounts: HashMapAccountStore) -> Result<()>
where
    I: InviteStore + 'static,
{
    let sessions = HashMapSessionStore::new(accounts.clone());
    let verifier = VerificationGate::from_settings(&settings.verification)?;

    let flow = RegistrationFlow::new(invites, accounts, sessions, verifier);
    let state = GatewayState::new(
        flow,
        SiteConfigHandle::new(settings.site),
        LocaleNegotiator::new(
            settings.app.available_locales.clone(),
            settings.app.default_locale.clone(),
        ),
        settings.session.cookie_name.as_str(),
    );

    let allowed_origins = settings.app.allowed_origins.clone();
    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    tracing::info!(site = ?settings.site, "Starting registration gateway");

    GatewayService::new(state)
        .run_standalone(listener, Some(allowed_origins))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
