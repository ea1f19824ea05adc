use std::time::Duration;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure of a single extraction strategy.
/// Every variant raised by the AI strategy is recoverable by falling back.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("AI extraction is not configured")]
    NotConfigured,

    #[error("AI provider rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("AI provider quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("AI provider rate limit reached: {0}")]
    RateLimited(String),

    #[error("AI response did not match the extraction schema: {0}")]
    MalformedResponse(String),

    #[error("AI extraction timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("AI provider error: {0}")]
    Upstream(String),

    #[error("Invalid term pattern '{term}': {reason}")]
    Pattern { term: String, reason: String },
}

impl From<LlmError> for ExtractionError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => ExtractionError::NotConfigured,
            LlmError::Api { status, message } => match status {
                401 | 403 => ExtractionError::Unauthorized(message),
                429 if message.to_lowercase().contains("quota") => {
                    ExtractionError::QuotaExceeded(message)
                }
                429 => ExtractionError::RateLimited(message),
                _ => ExtractionError::Upstream(format!("status {status}: {message}")),
            },
            LlmError::RateLimited { retries } => {
                ExtractionError::RateLimited(format!("gave up after {retries} retries"))
            }
            LlmError::Parse(e) => ExtractionError::MalformedResponse(e.to_string()),
            LlmError::EmptyContent => {
                ExtractionError::MalformedResponse("empty completion".to_string())
            }
            LlmError::Timeout(after) => ExtractionError::Timeout(after),
            LlmError::Http(e) => ExtractionError::Upstream(e.to_string()),
        }
    }
}
