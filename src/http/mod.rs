//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, body buffering)
//!     → request.rs (ProxyRequest: method, target, headers, body)
//!     → handler.rs (cache lookup / origin forward)
//!     → headers.rs (hop-by-hop filtering, both directions)
//!     → response.rs (X-Cache, X-Cache-Age, Via, 502 mapping)
//!     → Send to client
//! ```

pub mod handler;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use handler::ProxyHandler;
pub use request::{ProxyRequest, X_REQUEST_ID};
pub use server::HttpServer;
