use anyhow::Context;
use backend_api::{init_tracing, run_server};
use expenses_client::WeeklyExpensesClient;
use std::{env, path::PathBuf, sync::Arc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Environment variables with sane defaults
    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    let settings = settings_loader::load_effective_settings(settings_path.as_ref())
        .context("Loading expenses settings")?;

    match settings.flow_url.as_deref() {
        Some(url) => tracing::info!("Remote flow: {}", url),
        None => tracing::info!("No remote flow configured, running offline"),
    }
    if let Some(path) = settings.local_data_path.as_ref() {
        tracing::info!("Local data file: {}", path.display());
    }

    let client = Arc::new(WeeklyExpensesClient::from_settings(&settings));
    run_server(client, &host, port).await?;

    Ok(())
}
