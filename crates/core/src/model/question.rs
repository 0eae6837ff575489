use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::model::ids::{ChoiceId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {question} has no choices")]
    NoChoices { question: QuestionId },

    #[error("question {question} lists choice {choice} more than once")]
    DuplicateChoice {
        question: QuestionId,
        choice: ChoiceId,
    },

    #[error("question {question} appears more than once in the set")]
    DuplicateQuestion { question: QuestionId },
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// One selectable option belonging to a Question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    id: ChoiceId,
    text: String,
}

impl Choice {
    #[must_use]
    pub fn new(id: ChoiceId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ChoiceId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with an ordered, non-empty list of choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    choices: Vec<Choice>,
}

impl Question {
    /// Creates a question after checking its choice list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoChoices` if `choices` is empty.
    /// Returns `QuestionError::DuplicateChoice` if two choices share an id.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Result<Self, QuestionError> {
        if choices.is_empty() {
            return Err(QuestionError::NoChoices { question: id });
        }

        let mut seen = HashSet::with_capacity(choices.len());
        for choice in &choices {
            if !seen.insert(choice.id()) {
                return Err(QuestionError::DuplicateChoice {
                    question: id,
                    choice: choice.id(),
                });
            }
        }

        Ok(Self {
            id,
            text: text.into(),
            choices,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Choices in display order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id() == id)
    }

    #[must_use]
    pub fn has_choice(&self, id: ChoiceId) -> bool {
        self.choice(id).is_some()
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered set of questions with unique ids.
///
/// The order is the display order; it is preserved from construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Builds a set from questions in display order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::DuplicateQuestion` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionError::DuplicateQuestion {
                    question: question.id(),
                });
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Question> {
        self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

impl TryFrom<Vec<Question>> for QuestionSet {
    type Error = QuestionError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}
