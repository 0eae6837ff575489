use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use quiz_core::model::{Choice, ChoiceId, Question, QuestionError, QuestionId, QuestionSet};

use crate::config::RemoteSourceConfig;
use crate::error::FetchError;
use crate::sources::{QuestionSource, SourceKind};

/// Fetches the question list from an HTTP endpoint.
///
/// One GET per load, no retries. The caller decides what to do with a `FetchError`.
#[derive(Clone, Debug)]
pub struct RemoteQuestionSource {
    client: Client,
    config: RemoteSourceConfig,
}

impl RemoteQuestionSource {
    /// Build a source whose requests give up after `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the HTTP client cannot be constructed.
    pub fn new(config: RemoteSourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }

    /// Fetch and validate the question list.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failure, timeout, a non-success status,
    /// or a body that does not describe a valid question set.
    pub async fn load_remote(&self) -> Result<QuestionSet, FetchError> {
        let timeout = self.config.timeout;
        debug!(endpoint = %self.config.endpoint, "fetching questions");

        let response = self
            .client
            .get(self.config.endpoint.clone())
            .send()
            .await
            .map_err(|err| FetchError::from_transport(err, timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::from_transport(err, timeout))?;
        let questions = parse_questions_body(&body)?;

        info!(
            endpoint = %self.config.endpoint,
            count = questions.len(),
            "fetched questions"
        );
        Ok(questions)
    }
}

#[async_trait]
impl QuestionSource for RemoteQuestionSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    async fn load(&self) -> Result<QuestionSet, FetchError> {
        self.load_remote().await
    }
}

/// Validate a `{ "questions": [...] }` response body into a question set.
///
/// # Errors
///
/// Returns `FetchError::MalformedBody` when the JSON does not match the wire shape
/// and `FetchError::InvalidShape` when it breaks a question-set invariant.
pub fn parse_questions_body(body: &[u8]) -> Result<QuestionSet, FetchError> {
    let payload: QuestionsPayload = serde_json::from_slice(body)?;
    let questions = payload
        .questions
        .into_iter()
        .map(QuestionDto::into_question)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuestionSet::new(questions)?)
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
struct QuestionDto {
    id: u64,
    text: String,
    choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
struct ChoiceDto {
    id: u64,
    text: String,
}

impl QuestionDto {
    fn into_question(self) -> Result<Question, QuestionError> {
        let choices = self
            .choices
            .into_iter()
            .map(|choice| Choice::new(ChoiceId::new(choice.id), choice.text))
            .collect();
        Question::new(QuestionId::new(self.id), self.text, choices)
    }
}
