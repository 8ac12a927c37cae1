use anyhow::{Result, anyhow};
use std::time::{Duration, Instant};

use super::types::Endpoint;

/// Checker trait for endpoint reachability checks
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Perform the check and return latency in milliseconds and optional status code.
    ///
    /// An `Err` means the endpoint could not be reached at all.
    async fn check(&self, endpoint: &Endpoint) -> Result<(u64, Option<u16>)>;
}

/// HTTP/HTTPS checker
///
/// Any response counts as reachable, whatever its status code. Only transport
/// failures (refused connections, DNS errors, timeouts, TLS errors) are errors.
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("linkwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Checker for HttpChecker {
    async fn check(&self, endpoint: &Endpoint) -> Result<(u64, Option<u16>)> {
        let start = Instant::now();

        let response = self
            .client
            .get(endpoint.as_str())
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        let latency = start.elapsed().as_millis() as u64;
        Ok((latency, Some(response.status().as_u16())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `response` verbatim to every connection on a local port.
    async fn serve_raw(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = socket.read(&mut buf).await;
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_success_response_is_reachable() {
        let url = serve_raw("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok").await;
        let checker = HttpChecker::new(Duration::from_secs(5)).unwrap();

        let (_, status) = checker.check(&Endpoint::from(url)).await.unwrap();
        assert_eq!(status, Some(200));
    }

    #[tokio::test]
    async fn test_error_status_is_still_reachable() {
        let not_found =
            serve_raw("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
        let server_error = serve_raw(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let checker = HttpChecker::new(Duration::from_secs(5)).unwrap();

        let (_, status) = checker.check(&Endpoint::from(not_found)).await.unwrap();
        assert_eq!(status, Some(404));

        let (_, status) = checker.check(&Endpoint::from(server_error)).await.unwrap();
        assert_eq!(status, Some(500));
    }

    #[tokio::test]
    async fn test_refused_connection_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let checker = HttpChecker::new(Duration::from_secs(5)).unwrap();
        let result = checker.check(&Endpoint::from(format!("http://{addr}/"))).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_silent_server_hits_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let checker = HttpChecker::new(Duration::from_millis(200)).unwrap();
        let started = Instant::now();
        let result = checker.check(&Endpoint::from(format!("http://{addr}/"))).await;

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
