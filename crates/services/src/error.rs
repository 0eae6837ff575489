//! Shared error types for the services crate.

use std::time::Duration;

use thiserror::Error;

use quiz_core::model::{ChoiceId, QuestionError, QuestionId};

/// Errors emitted by the remote question source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question request timed out after {after:?}")]
    Timeout { after: Duration },
    #[error("question request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("question response is not valid JSON for a question list: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("question response has an invalid shape: {0}")]
    InvalidShape(#[from] QuestionError),
}

impl FetchError {
    /// Classify a reqwest failure, reporting client-side timeouts separately.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { after: timeout }
        } else {
            Self::Transport(err)
        }
    }
}

/// Errors emitted by the checked session operations.
///
/// The lenient operations (`set_answer`, `get_answer`, `clear_answer`) never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question {0} is not part of the current session")]
    UnknownQuestion(QuestionId),
    #[error("choice {choice} does not belong to question {question}")]
    InvalidChoice {
        question: QuestionId,
        choice: ChoiceId,
    },
    #[error("{remaining} question(s) are still unanswered")]
    Incomplete { remaining: usize },
}

/// Errors emitted while reading quiz configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown question source: {0} (expected \"static\" or \"remote\")")]
    UnknownSource(String),
    #[error("an endpoint is required for the remote question source")]
    MissingEndpoint,
    #[error("invalid endpoint {raw}: {source}")]
    InvalidEndpoint {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid fetch timeout (seconds, > 0): {raw}")]
    InvalidTimeout { raw: String },
    #[error("invalid boolean for {key}: {raw}")]
    InvalidFlag { key: &'static str, raw: String },
}
