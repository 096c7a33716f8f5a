use std::time::Duration;

use crate::error::CompletionError;

/// What the retry loop should do after a failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Wait this long, then try again.
    Retry(Duration),
    /// Terminal failure, return it to the caller.
    GiveUp,
}

/// The whole backoff policy in one table. `attempt` is the 0-based index
/// of the attempt that just failed.
///
/// Statuses other than 200/401/429/503 are never retried, even the
/// 5xx-adjacent ones; that boundary is deliberate.
pub fn disposition(error: &CompletionError, attempt: u32) -> Disposition {
    match error {
        CompletionError::RateLimited => {
            Disposition::Retry(Duration::from_secs((attempt as u64 + 1) * 3))
        }
        CompletionError::ServiceUnavailable => Disposition::Retry(Duration::from_secs(5)),
        CompletionError::Timeout => Disposition::Retry(Duration::from_secs(3)),
        CompletionError::ConnectionFailure => Disposition::Retry(Duration::from_secs(3)),
        CompletionError::Unexpected { .. } => Disposition::Retry(Duration::from_secs(2)),
        CompletionError::Unauthorized
        | CompletionError::EmptyResponse
        | CompletionError::Upstream { .. }
        | CompletionError::RetriesExhausted => Disposition::GiveUp,
    }
}
