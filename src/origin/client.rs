//! Origin client backed by a pooled reqwest client.

use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use crate::cache::ResponseSnapshot;
use crate::config::OriginConfig;
use crate::http::headers;
use crate::origin::{OriginClient, OriginError, OriginRequest};

/// Forwards requests to an `http://` or `https://` origin over pooled
/// connections.
///
/// Redirects are never followed, so 3xx responses come back as-is. The
/// connect timeout is enforced by the client; the read timeout bounds the
/// wait for the response head and, separately, the body.
#[derive(Clone)]
pub struct HttpOriginClient {
    client: Client,
    base_url: String,
    read_timeout: Duration,
}

impl HttpOriginClient {
    /// Build a client for the configured origin.
    pub fn new(config: &OriginConfig) -> Result<Self, OriginError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .redirect(redirect::Policy::none())
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            read_timeout: config.read_timeout(),
        })
    }

    /// Origin base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn target_url(&self, target: &str) -> Result<Url, OriginError> {
        let uri = format!("{}{}", self.base_url, target);
        Url::parse(&uri).map_err(|source| OriginError::InvalidUri { uri, source })
    }
}

#[async_trait]
impl OriginClient for HttpOriginClient {
    async fn forward(&self, request: OriginRequest) -> Result<ResponseSnapshot, OriginError> {
        let url = self.target_url(&request.target)?;
        tracing::debug!(method = %request.method, url = %url, "Forwarding to origin");

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(headers::end_to_end(&request.headers));
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = timeout(self.read_timeout, builder.send())
            .await
            .map_err(|_| OriginError::Timeout(self.read_timeout))??;

        let status = response.status();
        let response_headers = response.headers().clone();
        let body = timeout(self.read_timeout, response.bytes())
            .await
            .map_err(|_| OriginError::Timeout(self.read_timeout))?
            .map_err(OriginError::Body)?;

        Ok(ResponseSnapshot::new(status, response_headers, body))
    }
}
