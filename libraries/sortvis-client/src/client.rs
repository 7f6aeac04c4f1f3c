//! Step service client.

use crate::error::{ClientError, Result};
use crate::types::{
    AlgorithmInfo, ClientConfig, ErrorBody, HealthResponse, RandomArrayQuery, RandomArrayResponse,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use sortvis_core::{FetchError, SortRequest, StepFetcher, StepRecord, StepSequence};
use std::time::Duration;
use tracing::{debug, info};

/// Client for a Sortvis step service.
///
/// Implements `StepFetcher`, so it can be handed straight to the playback
/// engine.
///
/// # Example
///
/// ```ignore
/// use sortvis_client::{ClientConfig, SortServiceClient};
/// use sortvis_core::{AlgorithmId, SortRequest};
///
/// let client = SortServiceClient::new(ClientConfig::new("http://localhost:5000"))?;
/// let request = SortRequest::new(vec![5, 3, 1], AlgorithmId::Merge)?;
/// let steps = client.fetch_steps(&request).await?;
/// println!("{} steps", steps.len());
/// ```
#[derive(Debug, Clone)]
pub struct SortServiceClient {
    http: Client,
    url: String,
}

impl SortServiceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Sortvis/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    /// Get the service URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the complete step trace for `request`.
    ///
    /// Every record is validated; a single bad record fails the whole fetch.
    pub async fn fetch_steps(&self, request: &SortRequest) -> Result<StepSequence> {
        let url = format!("{}/api/sort", self.url);
        debug!(
            url = %url,
            algorithm = %request.algorithm,
            len = request.len(),
            "Fetching steps"
        );

        let response = self.send(self.http.post(&url).json(request)).await?;
        let records: Vec<StepRecord> = parse_json(response, "steps").await?;

        let sequence = StepSequence::from_records(records)
            .map_err(|e| ClientError::ParseError(e.to_string()))?;

        info!(
            algorithm = %request.algorithm,
            steps = sequence.len(),
            "Fetched step sequence"
        );
        Ok(sequence)
    }

    /// Ask the service for a random array.
    pub async fn random_array(&self, query: RandomArrayQuery) -> Result<Vec<u32>> {
        let url = format!("{}/api/random-array", self.url);
        debug!(url = %url, size = query.size, "Requesting random array");

        let response = self.send(self.http.get(&url).query(&query)).await?;
        let body: RandomArrayResponse = parse_json(response, "random array").await?;
        Ok(body.array)
    }

    /// List the algorithms the service supports.
    pub async fn algorithms(&self) -> Result<Vec<AlgorithmInfo>> {
        let url = format!("{}/api/algorithms", self.url);
        let response = self.send(self.http.get(&url)).await?;
        parse_json(response, "algorithms").await
    }

    /// Check that the service is up.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.url);
        let response = self.send(self.http.get(&url)).await?;
        let health: HealthResponse = parse_json(response, "health").await?;

        info!(status = %health.status, version = %health.version, "Service health");
        Ok(health)
    }

    /// Send a request, turning non-success statuses into `ServerError`.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

#[async_trait]
impl StepFetcher for SortServiceClient {
    async fn fetch(&self, request: &SortRequest) -> std::result::Result<StepSequence, FetchError> {
        self.fetch_steps(request).await.map_err(FetchError::from)
    }
}
