use quiz_core::model::{Choice, ChoiceId, Question, QuestionId, QuestionSet};
use quiz_core::{QuizFlow, QuizStep};
use services::{QuizSession, StaticQuestionSource};

fn qid(id: u64) -> QuestionId {
    QuestionId::new(id)
}

fn cid(id: u64) -> ChoiceId {
    ChoiceId::new(id)
}

fn question(id: u64, choices: u64) -> Question {
    Question::new(
        qid(id),
        format!("question {id}"),
        (1..=choices)
            .map(|c| Choice::new(cid(c), format!("choice {c}")))
            .collect(),
    )
    .unwrap()
}

#[test]
fn load_resets_every_answer() {
    let set = QuestionSet::new(vec![question(10, 3), question(20, 2), question(30, 4)]).unwrap();
    let mut session = QuizSession::new();
    session.load(set.clone());
    session.set_answer(qid(10), cid(3));
    session.load(set.clone());

    for q in &set {
        assert_eq!(session.get_answer(q.id()), None);
    }
    assert!(!session.is_complete());
}

#[test]
fn every_choice_round_trips() {
    let set = QuestionSet::new(vec![question(1, 4), question(2, 3)]).unwrap();
    let mut session = QuizSession::with_questions(set.clone());

    for q in &set {
        for choice in q.choices() {
            session.set_answer(q.id(), choice.id());
            assert_eq!(session.get_answer(q.id()), Some(choice.id()));
        }
    }
}

#[test]
fn last_write_wins() {
    let mut session = QuizSession::with_questions(StaticQuestionSource::new().load_static());
    session.set_answer(qid(2), cid(1));
    session.set_answer(qid(2), cid(2));
    assert_eq!(session.get_answer(qid(2)), Some(cid(2)));
    assert_eq!(session.answers().len(), 3);
}

#[test]
fn stale_question_id_is_a_no_op() {
    let mut session = QuizSession::with_questions(StaticQuestionSource::new().load_static());
    session.set_answer(qid(1), cid(1));
    session.set_answer(qid(2), cid(1));
    let before = session.answers().to_vec();

    session.set_answer(qid(99), cid(1));

    assert_eq!(session.answers(), before.as_slice());
    assert!(!session.is_complete());
    assert_eq!(session.get_answer(qid(99)), None);

    session.set_answer(qid(3), cid(2));
    session.set_answer(qid(99), cid(1));
    assert!(session.is_complete());
}

#[test]
fn completeness_needs_all_three() {
    let mut session = QuizSession::with_questions(StaticQuestionSource::new().load_static());
    session.set_answer(qid(1), cid(1));
    session.set_answer(qid(2), cid(2));
    assert!(!session.is_complete());
    session.set_answer(qid(3), cid(1));
    assert!(session.is_complete());
}

#[test]
fn static_scenario() {
    let mut session = QuizSession::new();
    session.load(StaticQuestionSource::new().load_static());

    assert_eq!(session.get_answer(qid(1)), None);
    session.set_answer(qid(1), cid(1));
    session.set_answer(qid(2), cid(2));
    session.set_answer(qid(3), cid(1));

    assert!(session.is_complete());
    assert_eq!(session.get_answer(qid(2)), Some(cid(2)));
}

#[test]
fn flow_follows_session_completeness() {
    let mut session = QuizSession::with_questions(StaticQuestionSource::new().load_static());
    let mut flow = QuizFlow::new();

    flow.advance(session.is_complete()).unwrap();
    assert_eq!(flow.step(), QuizStep::Questions);
    assert!(flow.advance(session.is_complete()).is_err());

    for id in 1..=3 {
        session.set_answer(qid(id), cid(1));
    }
    assert_eq!(flow.advance(session.is_complete()), Ok(QuizStep::Confirm));

    session.clear_answer(qid(2));
    assert!(flow.advance(session.is_complete()).is_err());
    assert_eq!(flow.back(), QuizStep::Questions);

    session.set_answer(qid(2), cid(2));
    flow.advance(session.is_complete()).unwrap();
    assert_eq!(flow.advance(session.is_complete()), Ok(QuizStep::Result));

    let submission = session.submission().unwrap();
    assert_eq!(
        serde_json::to_value(&submission).unwrap(),
        serde_json::json!({
            "answers": [
                { "questionId": 1, "choiceId": 1 },
                { "questionId": 2, "choiceId": 2 },
                { "questionId": 3, "choiceId": 1 }
            ]
        })
    );
}
