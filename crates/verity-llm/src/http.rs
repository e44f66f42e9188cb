//! HTTP classifier
//!
//! Executes an `OutboundRequest` with reqwest and decodes the body according
//! to the request's response scheme.
//!
//! # Features
//!
//! - GET (tag-code) and POST/JSON (generative) requests
//! - Non-success statuses reported with the response body
//! - No retries and no client-side timeout: the session owns both policies
//!
//! # Examples
//!
//! ```no_run
//! use verity_llm::HttpClassifier;
//!
//! let classifier = HttpClassifier::new();
//! ```

use crate::{generative, tag_code, ClassifierError};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use verity_domain::traits::Classifier;
use verity_domain::{HttpMethod, OutboundRequest, RawResponse, ResponseScheme};

/// Longest error body kept in a [`ClassifierError::Http`]
const MAX_ERROR_BODY: usize = 512;

/// reqwest-backed classifier for tag-code and generative endpoints
#[derive(Debug, Clone, Default)]
pub struct HttpClassifier {
    client: reqwest::Client,
}

impl HttpClassifier {
    /// Create a classifier with a default client
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `request` and return the raw response body
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached
    /// - The endpoint answers with a non-success status
    pub async fn send(&self, request: &OutboundRequest) -> Result<String, ClassifierError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.endpoint),
            HttpMethod::Post => self
                .client
                .post(&request.endpoint)
                .header(CONTENT_TYPE, "application/json")
                .body(request.body.clone().unwrap_or_default()),
        };

        let response = builder
            .query(&request.query)
            .send()
            .await
            .map_err(|e| ClassifierError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ClassifierError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Classifier response length: {} chars", body.len());
        Ok(body)
    }
}

impl Classifier for HttpClassifier {
    type Error = ClassifierError;

    async fn classify(&self, request: &OutboundRequest) -> Result<RawResponse, Self::Error> {
        let body = self.send(request).await?;
        match request.scheme {
            ResponseScheme::TagCode => tag_code::decode(&body),
            ResponseScheme::Generative => Ok(generative::decode(&body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if received.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn tag_request(endpoint: String) -> OutboundRequest {
        OutboundRequest {
            scheme: ResponseScheme::TagCode,
            method: HttpMethod::Get,
            endpoint,
            query: vec![
                ("key".to_string(), "k".to_string()),
                ("txt".to_string(), "some news & more".to_string()),
                ("lang".to_string(), "en".to_string()),
            ],
            body: None,
        }
    }

    #[tokio::test]
    async fn test_tag_code_round_trip() {
        let endpoint = serve_once("HTTP/1.1 200 OK", r#"{"status":{"code":"0"},"score_tag":"N+"}"#).await;
        let raw = HttpClassifier::new().classify(&tag_request(endpoint)).await.unwrap();
        assert!(matches!(raw, RawResponse::TagCode { score_tag: Some(tag), .. } if tag == "N+"));
    }

    #[tokio::test]
    async fn test_generative_round_trip() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"ok {\"sentiment\":\"real\"}"}]}}]}"#,
        )
        .await;
        let request = OutboundRequest {
            scheme: ResponseScheme::Generative,
            method: HttpMethod::Post,
            endpoint,
            query: vec![("key".to_string(), "k".to_string())],
            body: Some(r#"{"contents":[]}"#.to_string()),
        };
        let raw = HttpClassifier::new().classify(&request).await.unwrap();
        assert_eq!(raw, RawResponse::freeform(r#"ok {"sentiment":"real"}"#));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let endpoint = serve_once("HTTP/1.1 403 Forbidden", r#"{"error":"bad key"}"#).await;
        match HttpClassifier::new().classify(&tag_request(endpoint)).await {
            Err(ClassifierError::Http { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("bad key"));
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let request = tag_request("http://127.0.0.1:1".to_string());
        let result = HttpClassifier::new().classify(&request).await;
        assert!(matches!(result, Err(ClassifierError::Communication(_))));
    }
}
