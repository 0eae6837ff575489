use std::collections::HashMap;

use tracing::debug;

use quiz_core::model::{Answer, AnswerSubmission, ChoiceId, QuestionId, QuestionSet};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Question set plus one answer slot per question for a single quiz run.
///
/// Answers are kept in question order; `index` maps a question id to its slot.
/// Every `load` rebuilds both from scratch, so a slot always exists for each
/// loaded question and for nothing else.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: QuestionSet,
    answers: Vec<Answer>,
    index: HashMap<QuestionId, usize>,
    generation: u64,
}

impl QuizSession {
    /// An empty session with no questions loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: QuestionSet) -> Self {
        let mut session = Self::new();
        session.load(questions);
        session
    }

    /// Replace the question set and reset every answer to unanswered.
    ///
    /// Previously recorded answers are discarded.
    pub fn load(&mut self, questions: QuestionSet) {
        self.answers = questions
            .iter()
            .map(|question| Answer::unanswered(question.id()))
            .collect();
        self.index = self
            .answers
            .iter()
            .enumerate()
            .map(|(slot, answer)| (answer.question_id, slot))
            .collect();
        self.questions = questions;
        self.generation = self.generation.saturating_add(1);

        debug!(
            questions = self.questions.len(),
            generation = self.generation,
            "session loaded"
        );
    }

    /// Record `choice_id` for `question_id`, overwriting any earlier choice.
    ///
    /// An id that is not in the current question set is ignored. The choice is
    /// not checked against the question's own choices; see `set_answer_checked`.
    pub fn set_answer(&mut self, question_id: QuestionId, choice_id: ChoiceId) {
        match self.answer_mut(question_id) {
            Some(answer) => answer.choice_id = Some(choice_id),
            None => debug!(%question_id, %choice_id, "ignoring answer for unknown question"),
        }
    }

    /// Record an answer only if the choice belongs to the question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` for an id outside the current set and
    /// `SessionError::InvalidChoice` for a choice the question does not offer.
    /// The session is unchanged on error.
    pub fn set_answer_checked(
        &mut self,
        question_id: QuestionId,
        choice_id: ChoiceId,
    ) -> Result<(), SessionError> {
        let question = self
            .questions
            .get(question_id)
            .ok_or(SessionError::UnknownQuestion(question_id))?;
        if !question.has_choice(choice_id) {
            return Err(SessionError::InvalidChoice {
                question: question_id,
                choice: choice_id,
            });
        }
        self.set_answer(question_id, choice_id);
        Ok(())
    }

    /// Reset one answer to unanswered. Unknown ids are ignored.
    pub fn clear_answer(&mut self, question_id: QuestionId) {
        if let Some(answer) = self.answer_mut(question_id) {
            answer.choice_id = None;
        }
    }

    /// The recorded choice, or `None` if the question is unknown or unanswered.
    #[must_use]
    pub fn get_answer(&self, question_id: QuestionId) -> Option<ChoiceId> {
        self.index
            .get(&question_id)
            .and_then(|&slot| self.answers.get(slot))
            .and_then(|answer| answer.choice_id)
    }

    /// True when every loaded question has a recorded choice.
    ///
    /// Vacuously true for a session without questions.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Answer::is_answered)
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Answers in question order.
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Number of loads applied to this session.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_answered()).count()
    }

    /// Ids of unanswered questions, in question order.
    #[must_use]
    pub fn unanswered(&self) -> Vec<QuestionId> {
        self.answers
            .iter()
            .filter(|answer| !answer.is_answered())
            .map(|answer| answer.question_id)
            .collect()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.answers.len();
        let answered = self.answered_count();
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: answered == total,
        }
    }

    /// The finalised answer set for the scoring stage.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` while any question is unanswered.
    pub fn submission(&self) -> Result<AnswerSubmission, SessionError> {
        let remaining = self.answers.len() - self.answered_count();
        if remaining > 0 {
            return Err(SessionError::Incomplete { remaining });
        }
        Ok(AnswerSubmission {
            answers: self.answers.clone(),
        })
    }

    fn answer_mut(&mut self, question_id: QuestionId) -> Option<&mut Answer> {
        let slot = *self.index.get(&question_id)?;
        self.answers.get_mut(slot)
    }
}
