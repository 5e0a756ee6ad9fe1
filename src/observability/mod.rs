//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured log events per cache decision)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every request span
//! - Metrics are cheap (atomic increments) and no-ops without an exporter

pub mod logging;
pub mod metrics;
