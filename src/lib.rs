//! Caching HTTP Proxy Library
//!
//! Forwards every request to a single origin and keeps successful GET
//! responses in memory for a fixed time-to-live.

pub mod cache;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod origin;

pub use cache::CacheStore;
pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
