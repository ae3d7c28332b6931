use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ChangePoint, PriceSeries};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
    #[error("timeout")]
    Timeout,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Read-only access to the change-point analysis backend.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// `GET /api/change_points`, records in the order the backend returned them.
    async fn change_points(&self) -> ClientResult<Vec<ChangePoint>>;

    /// `GET /api/plot`, the raw image bytes.
    async fn plot(&self) -> ClientResult<Vec<u8>>;

    /// `GET /api/prices`, the daily price history behind the chart.
    async fn prices(&self) -> ClientResult<PriceSeries>;
}
