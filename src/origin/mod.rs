//! Outbound forwarding to the origin server.
//!
//! # Data Flow
//! ```text
//! ProxyHandler (cache miss)
//!     → OriginRequest (method, target, end-to-end headers, buffered body)
//!     → OriginClient::forward
//!     → ResponseSnapshot | OriginError
//! ```
//!
//! # Design Decisions
//! - Redirects are never followed; 3xx responses pass through verbatim
//! - Every call is bounded by connect and read timeouts
//! - No automatic retries

pub mod client;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method};
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

use crate::cache::ResponseSnapshot;

pub use client::HttpOriginClient;

/// A request to be sent to the origin.
#[derive(Debug, Clone)]
pub struct OriginRequest {
    pub method: Method,
    /// Path and query, appended to the origin base URL.
    pub target: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Transport-level failure talking to the origin.
///
/// Variants wrapping a lower-level error expose it through `source()` rather
/// than repeating it in `Display`.
#[derive(Debug, Error)]
pub enum OriginError {
    #[error("invalid origin URI {uri}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("origin request failed")]
    Transport(#[from] reqwest::Error),

    #[error("failed to read origin response")]
    Body(#[source] reqwest::Error),

    #[error("origin did not respond within {0:?}")]
    Timeout(Duration),
}

/// Sends requests to the single configured origin.
#[async_trait]
pub trait OriginClient: Send + Sync {
    /// Forward `request` and return the complete response.
    async fn forward(&self, request: OriginRequest) -> Result<ResponseSnapshot, OriginError>;
}
