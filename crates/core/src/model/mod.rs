mod answer;
mod ids;
mod question;

pub use answer::{Answer, AnswerSubmission};
pub use ids::{ChoiceId, ParseIdError, QuestionId};
pub use question::{Choice, Question, QuestionError, QuestionSet};
