use thiserror::Error;

use crate::flow::FlowError;
use crate::model::QuestionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Flow(#[from] FlowError),
}
