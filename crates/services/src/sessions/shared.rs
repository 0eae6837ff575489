use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use quiz_core::model::{ChoiceId, QuestionId, QuestionSet};

use super::progress::SessionProgress;
use super::state::QuizSession;
use crate::error::{FetchError, SessionError};
use crate::sources::QuestionSource;

/// Result of `SharedSession::reload_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched questions replaced the session.
    Applied { generation: u64 },
    /// A newer load started while this one was in flight; its result was dropped.
    Superseded,
}

struct Inner {
    session: QuizSession,
    latest_ticket: u64,
}

/// A `QuizSession` behind one mutex, for hosts that touch the session from
/// several tasks.
///
/// Each method locks for a single operation. The lock is never held across the
/// remote fetch in `reload_from`.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Inner>>,
}

impl Default for SharedSession {
    fn default() -> Self {
        Self::new(QuizSession::new())
    }
}

impl SharedSession {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session,
                latest_ticket: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Session operations cannot leave it half-updated, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load `questions` immediately. Any fetch still in flight is superseded.
    pub fn load(&self, questions: QuestionSet) {
        let mut inner = self.lock();
        inner.latest_ticket = inner.latest_ticket.saturating_add(1);
        inner.session.load(questions);
    }

    /// Fetch questions from `source` and load them if no newer load started meanwhile.
    ///
    /// Answers recorded while the fetch is pending apply to the old question set
    /// and are discarded when the new set is loaded.
    ///
    /// # Errors
    ///
    /// Propagates the source's `FetchError`; the session is left untouched.
    pub async fn reload_from(&self, source: &dyn QuestionSource) -> Result<LoadOutcome, FetchError> {
        let ticket = {
            let mut inner = self.lock();
            inner.latest_ticket = inner.latest_ticket.saturating_add(1);
            inner.latest_ticket
        };

        let questions = source.load().await?;

        let mut inner = self.lock();
        if inner.latest_ticket != ticket {
            warn!(
                source = %source.kind(),
                ticket,
                latest = inner.latest_ticket,
                "dropping superseded question load"
            );
            return Ok(LoadOutcome::Superseded);
        }

        inner.session.load(questions);
        let generation = inner.session.generation();
        info!(source = %source.kind(), generation, "session reloaded");
        Ok(LoadOutcome::Applied { generation })
    }

    pub fn set_answer(&self, question_id: QuestionId, choice_id: ChoiceId) {
        self.lock().session.set_answer(question_id, choice_id);
    }

    /// See `QuizSession::set_answer_checked`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the question or choice is not in the current set.
    pub fn set_answer_checked(
        &self,
        question_id: QuestionId,
        choice_id: ChoiceId,
    ) -> Result<(), SessionError> {
        self.lock().session.set_answer_checked(question_id, choice_id)
    }

    pub fn clear_answer(&self, question_id: QuestionId) {
        self.lock().session.clear_answer(question_id);
    }

    #[must_use]
    pub fn get_answer(&self, question_id: QuestionId) -> Option<ChoiceId> {
        self.lock().session.get_answer(question_id)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.lock().session.is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.lock().session.progress()
    }

    /// Run `f` against the session under the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&QuizSession) -> R) -> R {
        f(&self.lock().session)
    }

    /// A copy of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> QuizSession {
        self.lock().session.clone()
    }
}
