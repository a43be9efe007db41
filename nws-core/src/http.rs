use std::{fmt::Debug, time::Instant};

use async_trait::async_trait;
use reqwest::{
    Client, ClientBuilder,
    header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::{config::ClientConfig, error::TransportError};

/// Issues a single GET and hands back the response body.
///
/// Non-success statuses must come back as [`TransportError::Status`].
#[async_trait]
pub trait Fetch: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// [`Fetch`] over a reqwest client carrying the configured headers and timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = client_builder(config)?
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { http })
    }
}

fn client_builder(config: &ClientConfig) -> Result<ClientBuilder, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value(USER_AGENT, &config.user_agent)?);
    headers.insert(ACCEPT, header_value(ACCEPT, &config.accept)?);

    Ok(Client::builder()
        .default_headers(headers)
        .timeout(config.timeout))
}

fn header_value(name: HeaderName, value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|source| TransportError::Header { name, source })
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let started = Instant::now();

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = res.status();
        debug!(
            url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GET"
        );

        if !status.is_success() {
            // The body is only context for the message.
            let body = res.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            });
        }

        res.text().await.map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        task::JoinHandle,
    };

    use super::*;

    /// Bypasses any proxy from the environment so requests reach the loopback listener.
    fn loopback_fetcher(config: &ClientConfig) -> HttpFetcher {
        let http = client_builder(config).unwrap().no_proxy().build().unwrap();
        HttpFetcher { http }
    }

    async fn read_head(socket: &mut TcpStream) -> String {
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        String::from_utf8_lossy(&head).into_owned()
    }

    /// Answers one request with `response` and returns the request head it received.
    async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let head = read_head(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            head
        });

        (base, server)
    }

    #[test]
    fn builds_with_default_config() {
        assert!(HttpFetcher::new(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn invalid_accept_value_is_rejected() {
        let config = ClientConfig {
            accept: "application/json\n".to_string(),
            ..ClientConfig::default()
        };

        let err = HttpFetcher::new(&config).unwrap_err();
        assert!(matches!(err, TransportError::Header { ref name, .. } if *name == ACCEPT));
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let config = ClientConfig {
            user_agent: "weather\r\ncli".to_string(),
            ..ClientConfig::default()
        };

        let err = HttpFetcher::new(&config).unwrap_err();
        assert!(matches!(err, TransportError::Header { ref name, .. } if *name == USER_AGENT));
    }

    #[tokio::test]
    async fn requests_carry_identity_headers() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
        )
        .await;

        let body = loopback_fetcher(&ClientConfig::default())
            .get(&format!("{base}/stations/KMPR"))
            .await
            .unwrap();
        let head = server.await.unwrap().to_lowercase();

        assert_eq!(body, "{}");
        assert!(head.starts_with("get /stations/kmpr http/1.1\r\n"), "{head}");
        assert!(head.contains("\r\nuser-agent: (weather cli tool, contact@example.com)\r\n"));
        assert!(head.contains("\r\naccept: application/json\r\n"));
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/stations/KMPR", listener.local_addr().unwrap());

        // Accept and read, but never answer.
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            while socket.read(&mut buf).await.map(|n| n > 0).unwrap_or(false) {}
        });

        let config = ClientConfig::default().with_timeout(Duration::from_millis(200));
        let err = loopback_fetcher(&config).get(&url).await.unwrap_err();

        server.abort();
        assert!(matches!(err, TransportError::Request { ref source, .. } if source.is_timeout()));
    }

    #[tokio::test]
    async fn error_status_keeps_body_text() {
        let (base, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 9\r\nconnection: close\r\n\r\nnot found",
        )
        .await;

        let err = loopback_fetcher(&ClientConfig::default())
            .get(&format!("{base}/stations/ZZZZ"))
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            TransportError::Status { status, body, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "not found");
            }
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_status_wins_over_unreadable_body() {
        // Promises 100 bytes, sends 5, then closes.
        let (base, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 100\r\nconnection: close\r\n\r\nshort",
        )
        .await;

        let err = loopback_fetcher(&ClientConfig::default())
            .get(&format!("{base}/stations/KMPR"))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            err,
            TransportError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[test]
    fn short_bodies_are_untouched() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.trim_end_matches("...").len(), 200);
    }
}
