use std::sync::Arc;
use std::net::SocketAddr;
use anyhow::Context;
use lodge_api::{app, AppState, AuthConfig};
use lodge_store::{
    app_config::Config, DbClient, RedisPageCache, StoreBookingRepository, StoreCabinRepository,
    StoreGuestRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lodge_api=debug,lodge_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Lodge API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to Postgres")?;

    let cache = RedisPageCache::new(&config.redis.url).context("Invalid Redis URL")?;

    let app_state = AppState {
        guests: Arc::new(StoreGuestRepository::new(db.pool.clone())),
        bookings: Arc::new(StoreBookingRepository::new(db.pool.clone())),
        cabins: Arc::new(StoreCabinRepository::new(db.pool.clone())),
        cache: Arc::new(cache),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
            cookie_name: config.auth.cookie_name.clone(),
            sign_in_url: config.auth.sign_in_url.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
