//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use caching_proxy::cache::CacheStore;
use caching_proxy::config::ProxyConfig;
use caching_proxy::http::HttpServer;
use caching_proxy::lifecycle::Shutdown;

/// A request as seen by the mock origin.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub target: String,
    /// Header lines, names lowercased.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Handle on a running mock origin.
#[derive(Clone)]
pub struct MockOrigin {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockOrigin {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests the origin has answered.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Render a raw HTTP/1.1 response with a Content-Length body.
pub fn http_response(status_line: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut raw = format!("HTTP/1.1 {}\r\n", status_line);
    for (name, value) in headers {
        raw.push_str(&format!("{}: {}\r\n", name, value));
    }
    raw.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ));
    raw
}

/// Render a raw HTTP/1.1 200 response with a chunked body.
pub fn chunked_response(chunks: &[&str]) -> String {
    let mut raw = String::from(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
    );
    for chunk in chunks {
        raw.push_str(&format!("{:x}\r\n{}\r\n", chunk.len(), chunk));
    }
    raw.push_str("0\r\n\r\n");
    raw
}

/// Start a mock origin on an ephemeral port that answers every request
/// with whatever `respond` renders for it.
pub async fn start_mock_origin<F>(respond: F) -> MockOrigin
where
    F: Fn(&SeenRequest) -> String + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = MockOrigin {
        addr: listener.local_addr().unwrap(),
        hits: Arc::new(AtomicUsize::new(0)),
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let respond = Arc::new(respond);

    let handle = origin.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let respond = respond.clone();
                    let handle = handle.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let raw = respond(&request);
                        handle.seen.lock().unwrap().push(request);
                        handle.hits.fetch_add(1, Ordering::SeqCst);
                        let _ = socket.write_all(raw.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    origin
}

/// Mock origin that returns `body` with a 200 for every path.
pub async fn start_fixed_origin(body: &'static str) -> MockOrigin {
    start_mock_origin(move |_| http_response("200 OK", &[("Content-Type", "text/plain")], body)).await
}

/// Mock origin that echoes the request target in the body.
pub async fn start_echo_origin() -> MockOrigin {
    start_mock_origin(|req| {
        http_response(
            "200 OK",
            &[("Content-Type", "text/plain")],
            &format!("{} {}", req.method, req.target),
        )
    })
    .await
}

/// Mock origin that reads each request and never answers it.
pub async fn start_silent_origin() -> MockOrigin {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = MockOrigin {
        addr: listener.local_addr().unwrap(),
        hits: Arc::new(AtomicUsize::new(0)),
        seen: Arc::new(Mutex::new(Vec::new())),
    };

    let handle = origin.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let handle = handle.clone();
            tokio::spawn(async move {
                if let Some(request) = read_request(&mut socket).await {
                    handle.seen.lock().unwrap().push(request);
                }
                // Hold the connection open without replying.
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            });
        }
    });

    origin
}

async fn read_request(socket: &mut TcpStream) -> Option<SeenRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(n, _)| n == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(SeenRequest {
        method,
        target,
        headers,
        body,
    })
}

/// A proxy running on an ephemeral port.
pub struct RunningProxy {
    pub addr: SocketAddr,
    pub cache: CacheStore,
    shutdown: Shutdown,
}

impl RunningProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Proxy configuration pointing at `origin_url`, bound to an ephemeral port.
pub fn proxy_config(origin_url: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.origin.url = origin_url.to_string();
    config.origin.connect_timeout_ms = 2_000;
    config.origin.read_timeout_ms = 2_000;
    config
}

/// Start a proxy and return once it is accepting connections.
pub async fn start_proxy(config: ProxyConfig) -> RunningProxy {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let cache = server.cache().clone();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    RunningProxy {
        addr,
        cache,
        shutdown,
    }
}

/// HTTP client that talks to the proxy directly and never follows redirects.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
