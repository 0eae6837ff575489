use async_trait::async_trait;
use quiz_core::model::{Choice, ChoiceId, Question, QuestionId, QuestionSet};

use crate::error::FetchError;
use crate::sources::{QuestionSource, SourceKind};

type ChoiceRow = (u64, &'static str);

const BUILT_IN_QUESTIONS: &[(u64, &str, &[ChoiceRow])] = &[
    (
        1,
        "サッカー観戦のスタイルは？",
        &[(1, "スタジアムで熱狂したい"), (2, "家でゆったり観たい")],
    ),
    (
        2,
        "応援したいクラブの地域は？",
        &[(1, "地元"), (2, "全国的に有名なクラブ")],
    ),
    (
        3,
        "クラブに求めるものは？",
        &[(1, "強さ"), (2, "親しみやすさ")],
    ),
];

/// Built-in question set shipped with the app.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticQuestionSource;

impl StaticQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the fixed, ordered built-in questions.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table stops forming a valid question set.
    #[must_use]
    pub fn load_static(&self) -> QuestionSet {
        let questions = BUILT_IN_QUESTIONS
            .iter()
            .map(|(id, text, choices)| {
                let choices = choices
                    .iter()
                    .map(|(choice_id, label)| Choice::new(ChoiceId::new(*choice_id), *label))
                    .collect();
                Question::new(QuestionId::new(*id), *text, choices)
                    .expect("built-in question should be valid")
            })
            .collect();
        QuestionSet::new(questions).expect("built-in question ids should be unique")
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Static
    }

    async fn load(&self) -> Result<QuestionSet, FetchError> {
        Ok(self.load_static())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_set_has_three_two_way_questions() {
        let set = StaticQuestionSource::new().load_static();
        let ids: Vec<u64> = set.iter().map(|q| q.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for question in &set {
            let choice_ids: Vec<u64> = question.choices().iter().map(|c| c.id().value()).collect();
            assert_eq!(choice_ids, vec![1, 2]);
        }
        assert_eq!(set.as_slice()[1].text(), "応援したいクラブの地域は？");
    }

    #[test]
    fn repeated_loads_are_identical() {
        let source = StaticQuestionSource::new();
        assert_eq!(source.load_static(), source.load_static());
    }
}
