#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod sessions;
pub mod sources;

pub use sessions as session;

pub use config::{QuizConfig, RemoteSourceConfig, SourceConfig};
pub use error::{ConfigError, FetchError, SessionError};

pub use sessions::{LoadOutcome, QuizLoopService, QuizSession, SessionProgress, SharedSession};
pub use sources::{
    QuestionSource, RemoteQuestionSource, SourceKind, StaticQuestionSource, parse_questions_body,
};
