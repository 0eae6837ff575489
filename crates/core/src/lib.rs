#![forbid(unsafe_code)]

pub mod error;
pub mod flow;
pub mod model;

pub use error::Error;
pub use flow::{FlowError, QuizFlow, QuizStep};
