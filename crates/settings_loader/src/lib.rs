//! # Settings Loader
//!
//! Centralized settings loading for the weekly expenses services.
//! Settings come from an optional `settings.json` file and can be overridden
//! from the environment (a `.env` file in the working directory is honoured).
//!
//! ## Environment variables
//!
//! - `EXPENSES_FLOW_URL`   remote flow address (empty means unset)
//! - `EXPENSES_LOCAL_DATA` path to a local payload JSON file (empty means unset)
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load a specific file and layer the environment on top
//! let settings = settings_loader::load_settings("config/settings.json")?;
//! let settings = settings_loader::apply_env_overrides(settings);
//!
//! // Or do everything at once, tolerating a missing file
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_effective_settings(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::ExpensesSettings;

pub const FLOW_URL_VAR: &str = "EXPENSES_FLOW_URL";
pub const LOCAL_DATA_VAR: &str = "EXPENSES_LOCAL_DATA";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ExpensesSettings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: ExpensesSettings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(normalize(settings))
}

/// Loads settings from a default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<ExpensesSettings> {
    load_settings("settings.json")
}

/// Tries the provided path, then the default location, then plain defaults (offline mode).
///
/// A file that exists but cannot be parsed is still an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<ExpensesSettings> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path);
        }
        tracing::warn!(
            "Settings file {} not found, trying default location",
            settings_path.display()
        );
    }

    if default_settings_exist() {
        return load_default_settings();
    }

    tracing::debug!("No settings file found, using defaults");
    Ok(ExpensesSettings::default())
}

/// Overrides settings with `EXPENSES_FLOW_URL` / `EXPENSES_LOCAL_DATA` when set.
pub fn apply_env_overrides(settings: ExpensesSettings) -> ExpensesSettings {
    // Missing .env is the common case
    let _ = dotenvy::dotenv();
    apply_overrides_from(settings, |name| std::env::var(name).ok())
}

/// Same as [`apply_env_overrides`] with a caller-supplied variable lookup.
pub fn apply_overrides_from<F>(settings: ExpensesSettings, lookup: F) -> ExpensesSettings
where
    F: Fn(&str) -> Option<String>,
{
    apply_overrides(settings, lookup(FLOW_URL_VAR), lookup(LOCAL_DATA_VAR))
}

/// File (or defaults) first, environment on top.
pub fn load_effective_settings(path: Option<&PathBuf>) -> Result<ExpensesSettings> {
    let settings = load_settings_with_fallback(path)?;
    Ok(apply_env_overrides(settings))
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Checks if the default settings file (settings.json) exists
pub fn default_settings_exist() -> bool {
    settings_file_exists("settings.json")
}

fn apply_overrides(
    mut settings: ExpensesSettings,
    flow_url: Option<String>,
    local_data: Option<String>,
) -> ExpensesSettings {
    if let Some(url) = flow_url {
        settings.flow_url = Some(url);
    }
    if let Some(path) = local_data {
        settings.local_data_path = Some(PathBuf::from(path));
    }
    normalize(settings)
}

// Blank values mean "not configured".
fn normalize(mut settings: ExpensesSettings) -> ExpensesSettings {
    settings.flow_url = settings
        .flow_url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    settings.local_data_path = settings
        .local_data_path
        .filter(|p| !p.as_os_str().is_empty());
    settings
}
