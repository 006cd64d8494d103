//! Chat proxy client
//!
//! One POST per user message. No retries: any failure becomes a fixed
//! apology that is revealed like a normal reply.

use tracing::{debug, warn};

use super::types::{ChatRequest, ChatResponse};
use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// Route appended to the configured backend URL
pub const INITIATE_ROUTE: &str = "/api/v1/chat/initiate";

/// Substitute reply when the proxy cannot be reached or answers badly
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}{}", config.url.trim_end_matches('/'), INITIATE_ROUTE),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one message and return the proxy's reply
    pub async fn send(&self, message: &str) -> Result<ChatResponse> {
        if message.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }

        let request = ChatRequest {
            message: message.to_string(),
            model: self.model.clone(),
        };
        debug!(endpoint = %self.endpoint, model = %self.model, "Sending chat message");

        let response = self.http.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status { status, body });
        }

        Ok(response.json::<ChatResponse>().await?)
    }

    /// Reply text for `message`, or [`FALLBACK_REPLY`] on any failure
    pub async fn reply_or_apology(&self, message: &str) -> String {
        match self.send(message).await {
            Ok(reply) => reply.response,
            Err(e) => {
                warn!(error = %e, "Chat request failed, substituting apology");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve a single canned HTTP response, returning the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&raw) {
                    break;
                }
            }
            let reply = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..split]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= split + 4 + length
    }

    fn client_for(url: String) -> ChatClient {
        ChatClient::new(&BackendConfig {
            url,
            ..BackendConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_route() {
        let client = client_for("http://localhost:3008/".to_string());
        assert_eq!(client.endpoint(), "http://localhost:3008/api/v1/chat/initiate");
    }

    #[tokio::test]
    async fn test_empty_message_rejected_locally() {
        let client = client_for("http://127.0.0.1:1".to_string());
        assert!(matches!(client.send("   ").await, Err(Error::EmptyMessage)));
    }

    #[tokio::test]
    async fn test_send_posts_message_and_model() {
        let (url, server) =
            serve_once("200 OK", r#"{"id":0.5,"question":"hi","response":"**Hello** there"}"#).await;
        let client = client_for(url);

        let reply = client.send("hi").await.unwrap();
        assert_eq!(reply.response, "**Hello** there");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/v1/chat/initiate"));
        assert!(raw.contains(r#""message":"hi""#));
        assert!(raw.contains(r#""model":"gemini""#));
    }

    #[tokio::test]
    async fn test_error_status_becomes_apology() {
        let (url, server) = serve_once(
            "500 Internal Server Error",
            r#"{"id":0,"question":"hi","response":"An error occurred while processing your request"}"#,
        )
        .await;
        let client = client_for(url);

        assert_eq!(client.reply_or_apology("hi").await, FALLBACK_REPLY);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_response_field_becomes_apology() {
        let (url, server) = serve_once("200 OK", r#"{"id":1}"#).await;
        let client = client_for(url);

        assert_eq!(client.reply_or_apology("hi").await, FALLBACK_REPLY);
        server.await.unwrap();
    }
}
