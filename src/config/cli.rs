use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::{ListenerConfig, ProxyConfig};
use crate::config::validation::validate_config;

const EXAMPLES: &str = "\
Examples:
  caching-proxy --port 3000 --origin http://dummyjson.com
  caching-proxy --clear-cache";

/// Command-line arguments for the caching proxy.
#[derive(Debug, Parser)]
#[command(
    name = "caching-proxy",
    version,
    about = "HTTP caching proxy for a single origin server",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Port to listen on.
    #[arg(long, value_name = "PORT", required_unless_present_any = ["clear_cache", "config"])]
    pub port: Option<u16>,

    /// Origin server to forward requests to.
    #[arg(long, value_name = "URL", required_unless_present_any = ["clear_cache", "config"])]
    pub origin: Option<String>,

    /// Empty the cache, report how many entries were removed, and exit.
    #[arg(long)]
    pub clear_cache: bool,

    /// Optional TOML configuration file; --port and --origin override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What the binary should do.
#[derive(Debug)]
pub enum Command {
    /// Clear the cache and exit without binding a listener.
    ClearCache,
    /// Run the proxy with a validated configuration.
    Serve(Box<ProxyConfig>),
}

impl Cli {
    /// Resolve arguments into a command. `--clear-cache` takes precedence.
    pub fn into_command(self) -> Result<Command, ConfigError> {
        if self.clear_cache {
            return Ok(Command::ClearCache);
        }

        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProxyConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener = ListenerConfig {
                max_body_size: config.listener.max_body_size,
                ..ListenerConfig::with_port(port)
            };
        }
        if let Some(origin) = self.origin {
            config.origin.url = origin;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(Command::Serve(Box::new(config)))
    }
}
