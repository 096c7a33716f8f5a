use thiserror::Error;

/// Everything that can go wrong while talking to the completion endpoint.
/// Every variant carries a message fit to show a user verbatim; no fault
/// escapes `CompletionClient` as anything other than one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompletionError {
    #[error("rate limit exceeded, wait a minute and try again")]
    RateLimited,

    #[error("invalid API token, check your credentials")]
    Unauthorized,

    #[error("model is currently unavailable, try a different model")]
    ServiceUnavailable,

    #[error("request timed out after multiple attempts")]
    Timeout,

    #[error("could not connect to the completion endpoint")]
    ConnectionFailure,

    #[error("no response generated")]
    EmptyResponse,

    #[error("endpoint returned status {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("unexpected error: {detail}")]
    Unexpected { detail: String },

    #[error("all retry attempts failed")]
    RetriesExhausted,
}

/// Caller-side failures: input validation plus anything the client reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("blog title must not be empty")]
    EmptyTitle,

    #[error(transparent)]
    Completion(#[from] CompletionError),
}
