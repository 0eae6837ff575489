use serde::{Deserialize, Serialize};

use crate::model::ids::{ChoiceId, QuestionId};

/// The (possibly unset) selection recorded for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    pub choice_id: Option<ChoiceId>,
}

impl Answer {
    /// A fresh answer with no choice recorded.
    #[must_use]
    pub fn unanswered(question_id: QuestionId) -> Self {
        Self {
            question_id,
            choice_id: None,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.choice_id.is_some()
    }
}

/// Finalised answers handed to the scoring stage, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub answers: Vec<Answer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_uses_camel_case_keys() {
        let answer = Answer {
            question_id: QuestionId::new(2),
            choice_id: Some(ChoiceId::new(1)),
        };
        let json = serde_json::to_value(answer).unwrap();
        assert_eq!(json, serde_json::json!({ "questionId": 2, "choiceId": 1 }));
    }

    #[test]
    fn unanswered_serializes_null_choice() {
        let submission = AnswerSubmission {
            answers: vec![Answer::unanswered(QuestionId::new(5))],
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "answers": [{ "questionId": 5, "choiceId": null }] })
        );
    }
}
