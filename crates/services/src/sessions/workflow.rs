use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use quiz_core::model::QuestionSet;

use super::shared::{LoadOutcome, SharedSession};
use super::state::QuizSession;
use crate::config::{QuizConfig, SourceConfig};
use crate::error::FetchError;
use crate::sources::{QuestionSource, RemoteQuestionSource, SourceKind, StaticQuestionSource};

/// Starts quiz sessions from the configured question source.
///
/// With a fallback set, a failed primary load is logged and the fallback is
/// used instead; without one the `FetchError` goes back to the caller.
#[derive(Clone)]
pub struct QuizLoopService {
    primary: Arc<dyn QuestionSource>,
    fallback: Option<Arc<dyn QuestionSource>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(primary: Arc<dyn QuestionSource>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn QuestionSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Build the source named by `config`; remote sources fall back to the
    /// built-in questions when `fallback_to_static` is set.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be built.
    pub fn from_config(config: &QuizConfig) -> Result<Self, FetchError> {
        match &config.source {
            SourceConfig::Static => Ok(Self::new(Arc::new(StaticQuestionSource::new()))),
            SourceConfig::Remote(remote) => {
                let service = Self::new(Arc::new(RemoteQuestionSource::new(remote.clone())?));
                if config.fallback_to_static {
                    Ok(service.with_fallback(Arc::new(StaticQuestionSource::new())))
                } else {
                    Ok(service)
                }
            }
        }
    }

    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.primary.kind()
    }

    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Load questions from the primary source, falling back if configured.
    ///
    /// # Errors
    ///
    /// Returns the primary `FetchError` when there is no fallback, or the
    /// fallback's error when it fails too.
    pub async fn load_questions(&self) -> Result<QuestionSet, FetchError> {
        let err = match self.primary.load().await {
            Ok(questions) => return Ok(questions),
            Err(err) => err,
        };

        let Some(fallback) = &self.fallback else {
            return Err(err);
        };
        warn!(
            error = %err,
            primary = %self.primary.kind(),
            fallback = %fallback.kind(),
            "question load failed; using fallback source"
        );
        fallback.load().await
    }

    /// Start a new session with freshly loaded questions.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when no source could supply questions.
    pub async fn start_session(&self) -> Result<QuizSession, FetchError> {
        let questions = self.load_questions().await?;
        info!(
            source = %self.primary.kind(),
            questions = questions.len(),
            "quiz session started"
        );
        Ok(QuizSession::with_questions(questions))
    }

    /// Reload a shared session through the same source and fallback policy.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when no source could supply questions; the session
    /// keeps its current questions and answers.
    pub async fn restart(&self, session: &SharedSession) -> Result<LoadOutcome, FetchError> {
        session.reload_from(self).await
    }
}

#[async_trait]
impl QuestionSource for QuizLoopService {
    fn kind(&self) -> SourceKind {
        self.primary.kind()
    }

    async fn load(&self) -> Result<QuestionSet, FetchError> {
        self.load_questions().await
    }
}
