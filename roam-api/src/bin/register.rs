//! The standalone registration server: one endpoint, its own port, the
//! plain `{message}` envelope its signup form expects.

use std::net::SocketAddr;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roam_core::user::RegisterRequest;
use roam_store::{database, UserRepo};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roam_register=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = roam_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting registration server on port {}", config.registration.port);

    let pool = database::connect_schema(&config.database.url, &config.database.schemas.users).await;
    let users = UserRepo::new(pool);

    let app = Router::new()
        .route("/register", post(register))
        .with_state(users);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.registration.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn register(
    State(users): State<UserRepo>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<Value>) {
    let Some((name, email, number)) = req.validated() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "All fields are required" })),
        );
    };

    match users.register(&name, &email, &number).await {
        Ok(user) => {
            tracing::info!("New user registered: {}", user.name);
            (
                StatusCode::OK,
                Json(json!({ "message": "Registration successful!" })),
            )
        }
        Err(err) => {
            tracing::error!("Error inserting data: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Failed to register. Please try again." })),
            )
        }
    }
}
