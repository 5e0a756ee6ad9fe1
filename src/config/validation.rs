//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, TTL > 0)
//! - Check the origin is a usable `http://` or `https://` URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("origin URL is required")]
    MissingOrigin,

    #[error("invalid origin URL '{url}': {reason}")]
    OriginUrl { url: String, reason: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::Zero("listener.max_body_size"));
    }

    if let Err(e) = validate_origin(&config.origin.url) {
        errors.push(e);
    }
    if config.origin.connect_timeout_ms == 0 {
        errors.push(ValidationError::Zero("origin.connect_timeout_ms"));
    }
    if config.origin.read_timeout_ms == 0 {
        errors.push(ValidationError::Zero("origin.read_timeout_ms"));
    }

    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError::Zero("cache.ttl_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_origin(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingOrigin);
    }

    let invalid = |reason: String| ValidationError::OriginUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(())
}
