//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order (logging, metrics)
//! - Bind the listener last, so traffic only arrives when ready
//! - Wire OS signals to the shutdown coordinator
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Configuration is already validated by the time it gets here

use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::cache::CacheStore;
use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Run the proxy until a shutdown signal arrives.
pub async fn serve(config: ProxyConfig) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.origin.url,
        ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone())?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Caching proxy listening"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Empty a cache and report how many entries were removed.
///
/// The cache lives in process memory, so a standalone invocation always
/// starts from an empty store.
pub fn clear_cache(cache: &CacheStore) -> usize {
    println!("Clearing cache...");
    let removed = cache.clear();
    println!("Cache cleared successfully. {} entries removed.", removed);
    removed
}
