use axum::{http::Method, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod deals;
pub mod error;
pub mod flights;
pub mod hotels;
pub mod packages;
pub mod receipts;
pub mod state;
pub mod tickets;
pub mod trips;
pub mod users;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/", get(root))
        .merge(users::routes())
        .merge(flights::routes())
        .merge(hotels::routes())
        .merge(packages::routes())
        .merge(deals::routes())
        .merge(tickets::routes())
        .merge(trips::routes())
        .merge(admin::routes())
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Roam travel API is running..."
}
