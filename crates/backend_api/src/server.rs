use std::net::SocketAddr;
use std::sync::Arc;

use expenses_client::WeeklyExpensesClient;

use crate::router::create_router;

/// Run the API server
pub async fn run_server(client: Arc<WeeklyExpensesClient>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(client);

    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing for the server binary
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "backend_api=debug,expenses_client=debug,tower_http=debug".into()
            }),
        )
        .init();
}
