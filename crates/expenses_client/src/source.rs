use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::{PayloadOrigin, RawDayEntry, WeeklyExpensesPayload};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::{Result, SourceError};

/// A place a weekly expenses payload can come from.
///
/// Implementations make a single attempt and report failure; falling back is
/// the caller's job.
#[async_trait]
pub trait ExpensesSource: Send + Sync {
    async fn fetch(&self) -> Result<WeeklyExpensesPayload>;
    fn origin(&self) -> PayloadOrigin;
}

/// Remote flow reached over HTTP GET.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    http: Client,
    url: Url,
}

impl RemoteSource {
    pub fn new(flow_url: &str) -> Result<Self> {
        let url = Url::parse(flow_url).map_err(|e| SourceError::InvalidUrl {
            url: flow_url.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SourceError::InvalidUrl {
                    url: flow_url.to_string(),
                    reason: format!("unsupported scheme '{other}'"),
                })
            }
        }

        let http = Client::builder().build().map_err(SourceError::HttpClient)?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ExpensesSource for RemoteSource {
    async fn fetch(&self) -> Result<WeeklyExpensesPayload> {
        let response = self
            .http
            .get(self.url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(SourceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = response.bytes().await.map_err(SourceError::Transport)?;
        serde_json::from_slice(&body).map_err(SourceError::ResponseShape)
    }

    fn origin(&self) -> PayloadOrigin {
        PayloadOrigin::Remote
    }
}

/// Accepted layouts of a local data file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocalData {
    Payload(WeeklyExpensesPayload),
    /// Bare `[{day, amount}]` list; the summary figures come from the built-in week.
    Entries(Vec<RawDayEntry>),
}

impl LocalData {
    fn into_payload(self) -> WeeklyExpensesPayload {
        match self {
            LocalData::Payload(payload) => payload,
            LocalData::Entries(entries) => WeeklyExpensesPayload {
                entries,
                ..fallback_payload()
            },
        }
    }
}

/// Payload stored as a JSON file on disk (development data).
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ExpensesSource for LocalFileSource {
    async fn fetch(&self) -> Result<WeeklyExpensesPayload> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::LocalFile {
                path: self.path.clone(),
                source,
            })?;
        let data: LocalData =
            serde_json::from_slice(&content).map_err(|source| SourceError::LocalShape {
                path: self.path.clone(),
                source,
            })?;
        Ok(data.into_payload())
    }

    fn origin(&self) -> PayloadOrigin {
        PayloadOrigin::LocalFile
    }
}

/// The built-in week used when nothing else answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFallback;

impl LocalFallback {
    pub fn payload(&self) -> WeeklyExpensesPayload {
        fallback_payload()
    }
}

#[async_trait]
impl ExpensesSource for LocalFallback {
    async fn fetch(&self) -> Result<WeeklyExpensesPayload> {
        Ok(self.payload())
    }

    fn origin(&self) -> PayloadOrigin {
        PayloadOrigin::Fallback
    }
}

pub fn fallback_payload() -> WeeklyExpensesPayload {
    WeeklyExpensesPayload {
        entries: vec![
            RawDayEntry::new("mon", 17.45),
            RawDayEntry::new("tue", 34.91),
            RawDayEntry::new("wed", 52.36),
            RawDayEntry::new("thu", 31.07),
            RawDayEntry::new("fri", 23.39),
            RawDayEntry::new("sat", 43.28),
            RawDayEntry::new("sun", 25.48),
        ],
        balance: 921.48,
        month_total: 478.33,
        month_change: 2.4,
    }
}
