use expenses_engine::AnnotateError;
use models::{ExpensesSettings, PayloadOrigin, WeeklyExpenses, WeeklyExpensesPayload};

use crate::source::{ExpensesSource, LocalFallback, LocalFileSource, RemoteSource};

/// Retrieval with a guaranteed answer: configured sources are tried once each,
/// in order, and the built-in week is returned when all of them fail.
pub struct WeeklyExpensesClient {
    sources: Vec<Box<dyn ExpensesSource>>,
    fallback: LocalFallback,
}

impl WeeklyExpensesClient {
    /// Remote flow first (if configured), then the local data file (if configured).
    pub fn from_settings(settings: &ExpensesSettings) -> Self {
        let mut sources: Vec<Box<dyn ExpensesSource>> = Vec::new();

        if let Some(url) = settings.flow_url.as_deref() {
            match RemoteSource::new(url) {
                Ok(remote) => sources.push(Box::new(remote)),
                Err(e) => tracing::warn!("Ignoring remote source: {}", e),
            }
        }
        if let Some(path) = settings.local_data_path.as_ref() {
            sources.push(Box::new(LocalFileSource::new(path)));
        }

        Self::with_sources(sources)
    }

    pub fn with_sources(sources: Vec<Box<dyn ExpensesSource>>) -> Self {
        Self {
            sources,
            fallback: LocalFallback,
        }
    }

    /// Offline client that always answers with the built-in week.
    pub fn offline() -> Self {
        Self::with_sources(Vec::new())
    }

    pub fn is_offline(&self) -> bool {
        self.sources.is_empty()
    }

    /// Never fails; also reports which tier produced the payload.
    pub async fn fetch_weekly_expenses_with_origin(
        &self,
    ) -> (WeeklyExpensesPayload, PayloadOrigin) {
        for source in &self.sources {
            match source.fetch().await {
                Ok(payload) => {
                    tracing::debug!("Weekly expenses loaded from {} source", source.origin());
                    return (payload, source.origin());
                }
                Err(e) => {
                    tracing::warn!("{} source failed, falling back: {}", source.origin(), e);
                }
            }
        }

        tracing::debug!("Using built-in weekly expenses");
        (self.fallback.payload(), PayloadOrigin::Fallback)
    }

    pub async fn fetch_weekly_expenses(&self) -> WeeklyExpensesPayload {
        self.fetch_weekly_expenses_with_origin().await.0
    }

    /// Fetch then annotate. Only an empty entry list can fail.
    pub async fn get_weekly_expenses_with_origin(
        &self,
    ) -> Result<(WeeklyExpenses, PayloadOrigin), AnnotateError> {
        let (payload, origin) = self.fetch_weekly_expenses_with_origin().await;
        let composed = expenses_engine::compose(&payload)?;
        Ok((composed, origin))
    }

    pub async fn get_weekly_expenses(&self) -> Result<WeeklyExpenses, AnnotateError> {
        Ok(self.get_weekly_expenses_with_origin().await?.0)
    }
}

pub async fn fetch_weekly_expenses(settings: &ExpensesSettings) -> WeeklyExpensesPayload {
    WeeklyExpensesClient::from_settings(settings)
        .fetch_weekly_expenses()
        .await
}

pub async fn get_weekly_expenses(
    settings: &ExpensesSettings,
) -> Result<WeeklyExpenses, AnnotateError> {
    WeeklyExpensesClient::from_settings(settings)
        .get_weekly_expenses()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SourceError};
    use crate::source::fallback_payload;
    use async_trait::async_trait;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use models::RawDayEntry;
    use reqwest::StatusCode as HttpStatus;
    use std::path::PathBuf;

    struct FixedSource(WeeklyExpensesPayload);

    #[async_trait]
    impl ExpensesSource for FixedSource {
        async fn fetch(&self) -> Result<WeeklyExpensesPayload> {
            Ok(self.0.clone())
        }

        fn origin(&self) -> PayloadOrigin {
            PayloadOrigin::Remote
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ExpensesSource for FailingSource {
        async fn fetch(&self) -> Result<WeeklyExpensesPayload> {
            Err(SourceError::Status(HttpStatus::BAD_GATEWAY))
        }

        fn origin(&self) -> PayloadOrigin {
            PayloadOrigin::Remote
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/flow")
    }

    fn remote_settings(url: String) -> ExpensesSettings {
        ExpensesSettings {
            flow_url: Some(url),
            local_data_path: None,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_returns_fallback() {
        let settings = ExpensesSettings::default();
        let client = WeeklyExpensesClient::from_settings(&settings);
        assert!(client.is_offline());

        let (payload, origin) = client.fetch_weekly_expenses_with_origin().await;
        assert_eq!(payload, fallback_payload());
        assert_eq!(origin, PayloadOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_server_error_returns_fallback() {
        let router = Router::new().route(
            "/flow",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let settings = remote_settings(serve(router).await);

        let payload = fetch_weekly_expenses(&settings).await;
        assert_eq!(payload.balance, 921.48);
        assert_eq!(payload.month_total, 478.33);
        assert_eq!(payload.month_change, 2.4);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_fallback() {
        let router = Router::new().route("/flow", get(|| async { "{\"entries\": 42}" }));
        let settings = remote_settings(serve(router).await);
        assert_eq!(fetch_weekly_expenses(&settings).await, fallback_payload());
    }

    #[tokio::test]
    async fn test_unreachable_returns_fallback() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let settings = remote_settings(format!("http://{addr}/flow"));
        assert_eq!(fetch_weekly_expenses(&settings).await, fallback_payload());
    }

    #[tokio::test]
    async fn test_invalid_url_returns_fallback() {
        let settings = remote_settings("::not-a-url::".to_string());
        let client = WeeklyExpensesClient::from_settings(&settings);
        assert!(client.is_offline());
        assert_eq!(client.fetch_weekly_expenses().await, fallback_payload());
    }

    #[tokio::test]
    async fn test_remote_payload_is_composed_verbatim() {
        let router = Router::new().route(
            "/flow",
            get(|| async {
                Json(serde_json::json!({
                    "entries": [{"day": "mon", "amount": 5}],
                    "balance": 100,
                    "monthTotal": 200,
                    "monthChange": -1.5
                }))
            }),
        );
        let settings = remote_settings(serve(router).await);

        let client = WeeklyExpensesClient::from_settings(&settings);
        let (out, origin) = client.get_weekly_expenses_with_origin().await.unwrap();
        assert_eq!(origin, PayloadOrigin::Remote);
        assert_eq!(out.balance, 100.0);
        assert_eq!(out.month_total, 200.0);
        assert_eq!(out.month_change, -1.5);
        assert_eq!(out.max_amount, 5.0);
        assert_eq!(out.expenses_data.len(), 1);
        assert!(out.expenses_data[0].is_max_amount);
    }

    #[tokio::test]
    async fn test_empty_remote_entries_surface_error() {
        let router = Router::new().route(
            "/flow",
            get(|| async {
                Json(serde_json::json!({
                    "entries": [],
                    "balance": 1,
                    "monthTotal": 1,
                    "monthChange": 0
                }))
            }),
        );
        let settings = remote_settings(serve(router).await);
        assert_eq!(
            get_weekly_expenses(&settings).await,
            Err(AnnotateError::EmptyInput)
        );
    }

    #[tokio::test]
    async fn test_local_file_used_when_remote_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"data":[{"day":"mon","amount":1},{"day":"tue","amount":2}],"balance":3,"monthTotal":4,"monthChange":5}"#,
        )
        .unwrap();

        let router = Router::new().route("/flow", get(|| async { StatusCode::NOT_FOUND }));
        let settings = ExpensesSettings {
            flow_url: Some(serve(router).await),
            local_data_path: Some(path),
        };

        let client = WeeklyExpensesClient::from_settings(&settings);
        let (payload, origin) = client.fetch_weekly_expenses_with_origin().await;
        assert_eq!(origin, PayloadOrigin::LocalFile);
        assert_eq!(payload.entries[1], RawDayEntry::new("tue", 2.0));
        assert_eq!(payload.balance, 3.0);
    }

    #[tokio::test]
    async fn test_broken_local_file_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "not json").unwrap();

        let settings = ExpensesSettings {
            flow_url: None,
            local_data_path: Some(path),
        };
        let client = WeeklyExpensesClient::from_settings(&settings);
        let (payload, origin) = client.fetch_weekly_expenses_with_origin().await;
        assert_eq!(origin, PayloadOrigin::Fallback);
        assert_eq!(payload, fallback_payload());
    }

    #[tokio::test]
    async fn test_first_successful_source_wins() {
        let custom = WeeklyExpensesPayload {
            entries: vec![RawDayEntry::new("a", 10.0), RawDayEntry::new("b", 10.0)],
            balance: 0.0,
            month_total: 0.0,
            month_change: 0.0,
        };
        let client = WeeklyExpensesClient::with_sources(vec![
            Box::new(FailingSource),
            Box::new(FixedSource(custom.clone())),
        ]);

        let out = client.get_weekly_expenses().await.unwrap();
        assert_eq!(out.max_amount, 10.0);
        assert!(out.expenses_data.iter().all(|e| e.is_max_amount));
    }

    #[tokio::test]
    async fn test_offline_composition_flags_wednesday() {
        let out = WeeklyExpensesClient::offline()
            .get_weekly_expenses()
            .await
            .unwrap();
        assert_eq!(out.max_amount, 52.36);
        let flagged: Vec<&str> = out
            .expenses_data
            .iter()
            .filter(|e| e.is_max_amount)
            .map(|e| e.day.as_str())
            .collect();
        assert_eq!(flagged, vec!["wed"]);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_independent() {
        let client = WeeklyExpensesClient::offline();
        let first = client.get_weekly_expenses().await.unwrap();
        let second = client.get_weekly_expenses().await.unwrap();
        assert_eq!(first, second);
    }
}
