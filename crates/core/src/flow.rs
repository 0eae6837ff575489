//! Linear view flow of a quiz run: entrance → questions → confirm → result.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error("cannot leave {step} while questions are unanswered")]
    Incomplete { step: QuizStep },

    #[error("quiz flow already reached the result")]
    Finished,
}

/// One view in the quiz flow, addressable by its route path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuizStep {
    #[default]
    Entrance,
    Questions,
    Confirm,
    Result,
}

impl QuizStep {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            QuizStep::Entrance => "/",
            QuizStep::Questions => "/questions",
            QuizStep::Confirm => "/confirm",
            QuizStep::Result => "/result",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(QuizStep::Entrance),
            "/questions" => Some(QuizStep::Questions),
            "/confirm" => Some(QuizStep::Confirm),
            "/result" => Some(QuizStep::Result),
            _ => None,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            QuizStep::Entrance => Some(QuizStep::Questions),
            QuizStep::Questions => Some(QuizStep::Confirm),
            QuizStep::Confirm => Some(QuizStep::Result),
            QuizStep::Result => None,
        }
    }

    /// Whether leaving this step requires a complete answer set.
    fn gated(self) -> bool {
        matches!(self, QuizStep::Questions | QuizStep::Confirm)
    }
}

impl fmt::Display for QuizStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizStep::Entrance => "entrance",
            QuizStep::Questions => "questions",
            QuizStep::Confirm => "confirm",
            QuizStep::Result => "result",
        };
        f.write_str(name)
    }
}

/// Tracks which view a quiz run is on and refuses to move past the
/// question and confirmation views until every question is answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizFlow {
    step: QuizStep,
}

impl QuizFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> QuizStep {
        self.step
    }

    /// Move to the next view.
    ///
    /// `is_complete` is the session's completeness at the time of the call.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Incomplete` when leaving the questions or confirm view
    /// with unanswered questions, and `FlowError::Finished` on the result view.
    pub fn advance(&mut self, is_complete: bool) -> Result<QuizStep, FlowError> {
        let next = self.step.next().ok_or(FlowError::Finished)?;
        if self.step.gated() && !is_complete {
            return Err(FlowError::Incomplete { step: self.step });
        }
        self.step = next;
        Ok(next)
    }

    /// Step back one view. The entrance and result views stay where they are.
    pub fn back(&mut self) -> QuizStep {
        self.step = match self.step {
            QuizStep::Confirm => QuizStep::Questions,
            QuizStep::Questions | QuizStep::Entrance => QuizStep::Entrance,
            QuizStep::Result => QuizStep::Result,
        };
        self.step
    }

    pub fn restart(&mut self) {
        self.step = QuizStep::Entrance;
    }
}
