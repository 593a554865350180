use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use expenses_client::WeeklyExpensesClient;

/// Create the main application router with all API endpoints
pub fn create_router(client: Arc<WeeklyExpensesClient>) -> Router {
    // The widget is served from the host's origin, not ours
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/expenses/weekly", get(handlers::get_weekly_expenses))
        .route(
            "/api/expenses/weekly/raw",
            get(handlers::get_raw_weekly_expenses),
        )
        .with_state(client)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
