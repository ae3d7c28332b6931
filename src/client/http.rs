use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::{AnalysisClient, ClientError, ClientResult};
use crate::domain::{ChangePoint, PriceSeries};

pub const CHANGE_POINTS_PATH: &str = "/api/change_points";
pub const PLOT_PATH: &str = "/api/plot";
pub const PRICES_PATH: &str = "/api/prices";

#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| ClientError::ConfigError(format!("invalid base url {}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::ConfigError(format!(
                "unsupported scheme in base url: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ConfigError(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> ClientResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!(%url, "GET");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request did not complete");
            transport_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "non-success status");
            return Err(ClientError::RequestFailed(format!("GET {} returned {}", path, status)));
        }
        Ok(response)
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn change_points(&self) -> ClientResult<Vec<ChangePoint>> {
        let body = self
            .get(CHANGE_POINTS_PATH)
            .await?
            .bytes()
            .await
            .map_err(transport_error)?;

        let points: Vec<ChangePoint> = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "malformed change point body");
            ClientError::ParseError(format!("invalid change point list: {}", e))
        })?;

        tracing::info!(count = points.len(), "change points loaded");
        Ok(points)
    }

    async fn plot(&self) -> ClientResult<Vec<u8>> {
        let body = self
            .get(PLOT_PATH)
            .await?
            .bytes()
            .await
            .map_err(transport_error)?;

        tracing::info!(bytes = body.len(), "plot loaded");
        Ok(body.to_vec())
    }

    async fn prices(&self) -> ClientResult<PriceSeries> {
        let body = self
            .get(PRICES_PATH)
            .await?
            .bytes()
            .await
            .map_err(transport_error)?;

        let series: PriceSeries = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "malformed price body");
            ClientError::ParseError(format!("invalid price series: {}", e))
        })?;

        tracing::info!(count = series.len(), "prices loaded");
        Ok(series)
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::ConnectionError(format!("failed to connect: {}", e))
    } else {
        ClientError::RequestFailed(e.to_string())
    }
}
