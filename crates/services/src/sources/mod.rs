mod remote;
mod static_source;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use quiz_core::model::QuestionSet;

use crate::error::{ConfigError, FetchError};

pub use remote::{RemoteQuestionSource, parse_questions_body};
pub use static_source::StaticQuestionSource;

/// Supplies the ordered question set for a session.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Produce the questions for a new session.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the questions cannot be obtained or fail validation.
    async fn load(&self) -> Result<QuestionSet, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Static,
    Remote,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Static => f.write_str("static"),
            SourceKind::Remote => f.write_str("remote"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(SourceKind::Static),
            "remote" => Ok(SourceKind::Remote),
            _ => Err(ConfigError::UnknownSource(s.to_string())),
        }
    }
}
