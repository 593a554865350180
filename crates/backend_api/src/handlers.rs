use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use expenses_client::WeeklyExpensesClient;
use std::sync::Arc;

use crate::Result;

pub type ClientState = Arc<WeeklyExpensesClient>;

pub const ORIGIN_HEADER: &str = "x-expenses-origin";

fn origin_headers(origin: models::PayloadOrigin) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(ORIGIN_HEADER),
        HeaderValue::from_static(origin.as_str()),
    );
    headers
}

/// GET /api/expenses/weekly
/// Returns the annotated week plus the month summary
pub async fn get_weekly_expenses(State(client): State<ClientState>) -> Result<impl IntoResponse> {
    let (expenses, origin) = client.get_weekly_expenses_with_origin().await?;
    tracing::debug!(
        "Serving {} days from {} (max {})",
        expenses.expenses_data.len(),
        origin,
        expenses.max_amount
    );

    Ok((StatusCode::OK, origin_headers(origin), Json(expenses)))
}

/// GET /api/expenses/weekly/raw
/// Returns the payload as retrieved, before annotation
pub async fn get_raw_weekly_expenses(State(client): State<ClientState>) -> impl IntoResponse {
    let (payload, origin) = client.fetch_weekly_expenses_with_origin().await;
    (StatusCode::OK, origin_headers(origin), Json(payload))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "weekly-expenses-api"
    }))
}
