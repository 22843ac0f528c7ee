use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::models::AuditRecord;

/// Endpoint path of the audit feed, relative to the API base URL.
pub const AUDIT_PATH: &str = "/audit/redlock";

#[derive(Debug, Clone)]
pub struct AuditClientConfig {
    /// `https://{domain}` in production; injectable for tests.
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("audit API returned HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("audit API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("audit API response is not a record array: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct AuditClient {
    client: Client,
    config: AuditClientConfig,
}

impl AuditClient {
    pub fn new(config: AuditClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// One relative-range fetch of the last `minutes` of audit events.
    ///
    /// Deliberately no retry and no backoff: a failed window is simply
    /// re-requested unchanged by the next scheduled cycle.
    pub async fn fetch_audit_events(
        &self,
        api_key: &str,
        minutes: u32,
    ) -> Result<Vec<AuditRecord>, ApiError> {
        let url = format!("{}{AUDIT_PATH}", self.config.base_url);
        let amount = minutes.to_string();

        let response = self
            .client
            .get(&url)
            .header("x-redlock-auth", api_key)
            .query(&[
                ("timeType", "relative"),
                ("timeAmount", amount.as_str()),
                ("timeUnit", "minute"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        let body = response.text().await?;
        let records = serde_json::from_str(&body)?;
        Ok(records)
    }
}
