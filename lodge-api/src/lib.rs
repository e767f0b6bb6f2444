use axum::{
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

pub mod account;
pub mod actions;
pub mod auth;
pub mod cabins;
pub mod error;
pub mod middleware;
pub mod state;

pub use state::{AppState, AuthConfig};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(account::routes())
        .merge(cabins::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
