use anyhow::Result;
use chrono::{DateTime, Local};
use models::{ExpensesSettings, PayloadOrigin, WeeklyExpenses};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Local>,
    pub origin: PayloadOrigin,
}

#[derive(Debug, Serialize)]
pub struct WeeklyExpensesReport {
    pub metadata: ReportMetadata,
    #[serde(flatten)]
    pub expenses: WeeklyExpenses,
}

impl WeeklyExpensesReport {
    pub fn new(expenses: WeeklyExpenses, origin: PayloadOrigin) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Local::now(),
                origin,
            },
            expenses,
        }
    }
}

/// Command-line flags win over settings and environment. A blank `--flow-url` clears the URL.
pub fn apply_cli_overrides(
    mut settings: ExpensesSettings,
    flow_url: Option<String>,
    local_data: Option<PathBuf>,
) -> ExpensesSettings {
    if let Some(url) = flow_url {
        settings.flow_url = Some(url.trim().to_string()).filter(|u| !u.is_empty());
    }
    if let Some(path) = local_data {
        settings.local_data_path = Some(path);
    }
    settings
}

pub fn write_report_json(report: &WeeklyExpensesReport, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(out_path, json)?;
    Ok(())
}
