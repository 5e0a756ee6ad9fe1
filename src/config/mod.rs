//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (cli.rs)
//!     → optional config file (loader.rs, TOML)
//!     → --port / --origin overrides
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → owned by the HttpServer instance
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde/clap) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::{Cli, Command};
pub use loader::{read_config, ConfigError};
pub use schema::{CacheConfig, ListenerConfig, ObservabilityConfig, OriginConfig, ProxyConfig};
pub use validation::{validate_config, ValidationError};
