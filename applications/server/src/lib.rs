//! Sortvis Server Library
//!
//! HTTP step service: generates sorting step traces, random input arrays and
//! the algorithm catalog for the Sortvis player.
//!
//! This library exposes the router and configuration for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::{LimitSettings, ServerConfig, ServerSettings};
pub use error::{Result, ServerError};
pub use state::AppState;
