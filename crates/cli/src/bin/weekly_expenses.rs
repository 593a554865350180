use anyhow::{Context, Result};
use clap::Parser;
use cli::{WeeklyExpensesReport, apply_cli_overrides, write_report_json};
use expenses_client::WeeklyExpensesClient;
use std::path::PathBuf;

/// Fetch the weekly expenses (remote flow, local file or built-in week),
/// flag the highest-spend days and print the result as JSON.
#[derive(Debug, Parser)]
#[command(
    name = "weekly-expenses",
    author,
    version,
    about = "Fetch and annotate weekly expenses",
    long_about = None
)]
struct Args {
    /// Path to settings.json (defaults to ./settings.json when present)
    #[arg(short = 's', long = "settings")]
    settings: Option<PathBuf>,

    /// Remote flow URL, overrides settings and EXPENSES_FLOW_URL
    #[arg(long = "flow-url")]
    flow_url: Option<String>,

    /// Local payload JSON file, overrides settings and EXPENSES_LOCAL_DATA
    #[arg(long = "local-data")]
    local_data: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Ignore every configured source and use the built-in week
    #[arg(long = "offline")]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expenses_client=info".into()),
        )
        .init();

    let args = Args::parse();

    let settings = settings_loader::load_effective_settings(args.settings.as_ref())
        .context("Loading expenses settings")?;
    let settings = apply_cli_overrides(settings, args.flow_url, args.local_data);

    let client = if args.offline {
        WeeklyExpensesClient::offline()
    } else {
        WeeklyExpensesClient::from_settings(&settings)
    };

    let (expenses, origin) = client
        .get_weekly_expenses_with_origin()
        .await
        .context("Annotating weekly expenses")?;
    let report = WeeklyExpensesReport::new(expenses, origin);

    match args.out {
        Some(out_path) => {
            write_report_json(&report, &out_path)
                .with_context(|| format!("Writing {}", out_path.display()))?;
            eprintln!("Done. Wrote {} ({} source)", out_path.display(), origin);
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
