//! Types for step service requests and responses.

use serde::{Deserialize, Serialize};
use sortvis_core::AlgorithmId;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to a step service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "http://localhost:5000")
    pub url: String,
    /// Timeout for a whole request
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Query for `GET /api/random-array`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomArrayQuery {
    pub size: usize,
    pub min_val: u32,
    pub max_val: u32,
}

impl Default for RandomArrayQuery {
    fn default() -> Self {
        Self {
            size: 10,
            min_val: 1,
            max_val: 100,
        }
    }
}

/// Response from `GET /api/random-array`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomArrayResponse {
    pub array: Vec<u32>,
}

/// One entry of `GET /api/algorithms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub name: String,
    pub description: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub best_case: String,
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned by the service.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
