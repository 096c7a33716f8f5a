use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CompletionError;
use crate::retry::{self, Disposition};
use crate::schemas::chat::{ChatMessage, ChatRequest, ChatResponse};
use crate::settings::Settings;

/// Wall-clock bound on a single attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A raw reply from the endpoint: status plus unparsed body.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: StatusCode,
    pub body: String,
}

/// Faults raised before any HTTP status is available.
#[derive(Debug, Clone)]
pub enum TransportFault {
    Timeout,
    Connection,
    Other(String),
}

impl From<TransportFault> for CompletionError {
    fn from(fault: TransportFault) -> Self {
        match fault {
            TransportFault::Timeout => CompletionError::Timeout,
            TransportFault::Connection => CompletionError::ConnectionFailure,
            TransportFault::Other(detail) => CompletionError::Unexpected { detail },
        }
    }
}

/// The seam between the retry loop and the network. Tests inject a fake;
/// production uses [`HttpTransport`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<TransportReply, TransportFault>;
}

/// reqwest-backed transport: one bearer-authenticated POST per attempt.
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl HttpTransport {
    pub fn new(url: String, token: String) -> Self {
        HttpTransport {
            http: reqwest::Client::new(),
            url,
            token,
        }
    }
}

fn classify(e: reqwest::Error) -> TransportFault {
    if e.is_timeout() {
        TransportFault::Timeout
    } else if e.is_connect() {
        TransportFault::Connection
    } else {
        TransportFault::Other(e.to_string())
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<TransportReply, TransportFault> {
        let response = self
            .http
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .json(request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;
        Ok(TransportReply { status, body })
    }
}

/// Per-call knobs, fresh for every `complete` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    /// Total attempts, not extra retries. Must be at least 1.
    pub max_retries: u32,
    /// Sampling temperature, expected in [0, 1].
    pub temperature: f32,
    /// Generation cap, must be positive.
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        CompletionOptions {
            max_retries: 3,
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Builds chat-completion requests, submits them, and retries transient
/// failures. Holds no mutable state across calls, so one instance can be
/// shared freely.
pub struct CompletionClient {
    transport: Arc<dyn ChatTransport>,
}

impl CompletionClient {
    pub fn new(settings: &Settings) -> Self {
        CompletionClient {
            transport: Arc::new(HttpTransport::new(
                settings.api_url.clone(),
                settings.api_token.clone(),
            )),
        }
    }

    /// Build a client over any transport. This is how tests drive the
    /// retry loop without a network.
    pub fn with_transport(transport: Arc<dyn ChatTransport>) -> Self {
        CompletionClient { transport }
    }

    /// Submit one conversation and resolve it to generated text or a
    /// displayable error. `messages` must be non-empty and `model` a
    /// non-empty identifier the endpoint recognizes.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let request = ChatRequest {
            messages,
            model: model.to_string(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream: false,
        };

        for attempt in 0..options.max_retries {
            debug!(
                "completion attempt {}/{} for model {}",
                attempt + 1,
                options.max_retries,
                request.model
            );

            let error = match self.transport.send(&request).await {
                Ok(reply) => match interpret(reply) {
                    Ok(text) => return Ok(text),
                    Err(e) => e,
                },
                Err(fault) => fault.into(),
            };

            match retry::disposition(&error, attempt) {
                Disposition::Retry(wait) if attempt + 1 < options.max_retries => {
                    warn!(
                        "{}; retrying in {}s (attempt {}/{})",
                        error,
                        wait.as_secs(),
                        attempt + 1,
                        options.max_retries
                    );
                    tokio::time::sleep(wait).await;
                }
                _ => return Err(error),
            }
        }

        // Unreachable when max_retries >= 1; kept as the terminal fallback.
        Err(CompletionError::RetriesExhausted)
    }
}

/// Map one HTTP reply onto the error taxonomy, or extract the text.
fn interpret(reply: TransportReply) -> Result<String, CompletionError> {
    match reply.status {
        StatusCode::OK => match serde_json::from_str::<ChatResponse>(&reply.body) {
            Ok(parsed) => parsed
                .choices
                .first()
                .map(|choice| choice.message.content.trim().to_string())
                .ok_or(CompletionError::EmptyResponse),
            Err(e) => Err(CompletionError::Unexpected {
                detail: format!("malformed response body: {}", e),
            }),
        },
        StatusCode::TOO_MANY_REQUESTS => Err(CompletionError::RateLimited),
        StatusCode::UNAUTHORIZED => Err(CompletionError::Unauthorized),
        StatusCode::SERVICE_UNAVAILABLE => Err(CompletionError::ServiceUnavailable),
        status => Err(CompletionError::Upstream {
            status: status.as_u16(),
            detail: upstream_detail(&reply.body),
        }),
    }
}

/// Prefer the service-provided `error` field; fall back to the raw body.
fn upstream_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("error") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
