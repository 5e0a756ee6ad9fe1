//! Caching HTTP Proxy
//!
//! A forwarding proxy for a single origin that caches GET responses
//! in memory. Built with Tokio, Axum and Hyper.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌──────────────────────────────────────────────────┐
//!                              │                  CACHING PROXY                   │
//!                              │                                                  │
//!     Client Request           │  ┌─────────┐    ┌─────────┐    ┌────────────┐    │
//!     ─────────────────────────┼─▶│  http   │───▶│ handler │───▶│   cache    │    │
//!                              │  │ server  │    │         │    │  lookup    │    │
//!                              │  └─────────┘    └────┬────┘    └─────┬──────┘    │
//!                              │                      │   HIT         │ MISS      │
//!                              │                      │◀──────────────┤           │
//!                              │                      │               ▼           │
//!     Client Response          │  ┌─────────┐         │        ┌────────────┐     │
//!     ◀────────────────────────┼──│response │◀────────┘◀───────│   origin   │◀────┼──── Origin
//!                              │  │ tagging │                  │   client   │     │     Server
//!                              │  └─────────┘                  └────────────┘     │
//!                              │                                                  │
//!                              │  ┌────────────────────────────────────────────┐  │
//!                              │  │          Cross-Cutting Concerns            │  │
//!                              │  │  ┌────────┐  ┌──────────────┐ ┌─────────┐  │  │
//!                              │  │  │ config │  │observability │ │lifecycle│  │  │
//!                              │  │  └────────┘  └──────────────┘ └─────────┘  │  │
//!                              │  └────────────────────────────────────────────┘  │
//!                              └──────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use caching_proxy::cache::CacheStore;
use caching_proxy::config::{Cli, Command};
use caching_proxy::lifecycle::startup;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let command = match cli.into_command() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match command {
        Command::ClearCache => {
            startup::clear_cache(&CacheStore::default());
            ExitCode::SUCCESS
        }
        Command::Serve(config) => match startup::serve(*config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "Proxy terminated with error");
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
