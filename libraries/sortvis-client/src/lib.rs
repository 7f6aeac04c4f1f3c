//! Sortvis Service Client
//!
//! HTTP client library for the Sortvis step service.
//!
//! # Features
//!
//! - **Steps**: Fetch the complete step trace for an array and algorithm
//! - **Arrays**: Ask the service for a random input array
//! - **Catalog**: List supported algorithms with their complexity notes
//! - **Health**: Check the service is reachable
//!
//! `SortServiceClient` implements `sortvis_core::StepFetcher`, and every
//! `ClientError` converts into a `FetchError` for the playback engine.
//!
//! # Example
//!
//! ```ignore
//! use sortvis_client::{ClientConfig, RandomArrayQuery, SortServiceClient};
//! use sortvis_core::{AlgorithmId, SortRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SortServiceClient::new(ClientConfig::new("http://localhost:8000"))?;
//!
//!     let array = client.random_array(RandomArrayQuery::default()).await?;
//!     let request = SortRequest::new(array, AlgorithmId::Quick)?;
//!
//!     let steps = client.fetch_steps(&request).await?;
//!     println!("Fetched {} steps", steps.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

// Re-export main types
pub use client::SortServiceClient;
pub use error::{ClientError, Result};
pub use types::{
    AlgorithmInfo, ClientConfig, HealthResponse, RandomArrayQuery, RandomArrayResponse,
    DEFAULT_TIMEOUT,
};
