use crate::models::prediction::{PredictionRequest, PredictionResult};
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://home-credit-api-production.up.railway.app/predict";

/// Why a scoring round trip failed. Callers treat every variant as the same
/// `PREDICTION_FAILED` outcome; the variant only feeds the log.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("scoring service answered {status}")]
    Status { status: StatusCode },

    #[error("malformed prediction body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid prediction payload: {0}")]
    Invalid(String),
}

impl PredictionError {
    pub fn to_command_error(&self) -> String {
        format!("PREDICTION_FAILED: {self}")
    }
}

/// Something that can score a request. Implemented over HTTP by
/// [`ScoringClient`]; tests substitute their own.
pub trait PredictionService: Send + Sync {
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResult, PredictionError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    /// `None` waits for the service indefinitely.
    pub timeout: Option<Duration>,
    pub auth_token: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            auth_token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringClient {
    http: Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl ScoringClient {
    pub fn new(options: &ClientOptions) -> Result<Self, PredictionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: options.endpoint.clone(),
            auth_token: options.auth_token.clone(),
        })
    }
}

impl PredictionService for ScoringClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        let mut call = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(request);
        if let Some(token) = &self.auth_token {
            call = call.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = call.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Status { status });
        }

        let body = response.bytes().await?;
        debug!("scoring service answered {} ({} bytes)", status, body.len());

        let result: PredictionResult = serde_json::from_slice(&body)?;
        if result.prediction > 1 {
            return Err(PredictionError::Invalid(format!(
                "prediction must be 0 or 1, got {}",
                result.prediction
            )));
        }
        Ok(result)
    }
}
