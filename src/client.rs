use crate::errors::ReportError;
use crate::models::{CommissionReport, DateRange, ServiceErrorBody};
use reqwest::Client;
use tracing::{error, info, warn};

const REPORT_PATH: &str = "/api/comisiones";

/// Client for the external commission service.
#[derive(Debug, Clone)]
pub struct CommissionClient {
    http: Client,
    base_url: String,
}

impl CommissionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Loopback client that ignores proxy settings from the environment.
    #[cfg(test)]
    pub(crate) fn local(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .no_proxy()
            .build()
            .expect("build test client");
        Self::with_client(http, base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_report(&self, range: &DateRange) -> Result<CommissionReport, ReportError> {
        let url = format!("{}{REPORT_PATH}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&range.query())
            .send()
            .await
            .inspect_err(|err| error!(%url, "commission request failed: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(%url, status = status.as_u16(), "failed to read error response: {err}");
                    Default::default()
                }
            };
            let message = serde_json::from_slice::<ServiceErrorBody>(&body)
                .ok()
                .and_then(|payload| payload.error);
            let err = ReportError::service(status, message);
            warn!(%url, status = status.as_u16(), "commission service error: {err}");
            return Err(err);
        }

        let body = response
            .bytes()
            .await
            .inspect_err(|err| error!(%url, "failed to read commission response: {err}"))?;
        let report: CommissionReport = serde_json::from_slice(&body).map_err(|err| {
            error!(%url, "malformed commission response: {err}");
            ReportError::transport(err)
        })?;

        info!(
            start = %range.start(),
            end = %range.end(),
            entries = report.len(),
            "commission report loaded"
        );
        Ok(report)
    }
}
