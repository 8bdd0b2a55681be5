use std::net::SocketAddr;

use roam_api::{app, AppState};
use roam_store::{SchemaPools, SchemaProfile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roam_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = roam_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Roam API on port {}", config.server.port);

    // Connection is retried until the server comes up; a schema mismatch is
    // permanent and aborts startup instead.
    let pools = SchemaPools::connect(&config.database).await;
    pools.migrate().await.expect("Failed to run migrations");
    let profile = SchemaProfile::verify(&pools)
        .await
        .expect("Schema verification failed");
    tracing::info!(?profile, "schemas verified");

    let state = AppState::new(pools, profile);
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
