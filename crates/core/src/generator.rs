//! Generation Service Client
//!
//! The interview delegates all natural-language work to an external
//! generation service. This module defines the dispatch contract
//! ([`QuestionGenerator`]), an implementation for any OpenAI-compatible API
//! (OpenAI itself, or Gemini through its compatibility endpoint), and the
//! parsing of the structured replies the service is asked to produce.
//!
//! Every call is a single blocking round trip: no retries, no timeouts at
//! this layer. A transport failure or a malformed reply is surfaced to the
//! caller as an error.

use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation request failed: {0}")]
    Upstream(#[from] OpenAIError),
    #[error("generation service returned an empty reply")]
    EmptyReply,
    #[error("could not parse structured reply: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

/// Contract for dispatching an assembled prompt to the generation service.
///
/// Implementations request a machine-parseable (JSON object) reply and
/// return its raw text; callers parse it into the phase-specific shape.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// The structured reply for every question-producing phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReply {
    pub response: String,
}

impl QuestionReply {
    pub fn parse(raw: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// One evaluated transcript entry. `accuracy` is opaque text from the
/// model (typically a percentage) and is not interpreted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationItem {
    pub question: String,
    pub answer: String,
    pub accuracy: String,
    pub improved_answer: String,
}

/// The structured reply for the whole-transcript evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReply {
    pub answers: Vec<EvaluationItem>,
}

impl EvaluationReply {
    pub fn parse(raw: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A [`QuestionGenerator`] for any OpenAI-compatible chat completion API.
pub struct OpenAICompatibleGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAICompatibleGenerator {
    /// Creates a new generator.
    ///
    /// # Arguments
    ///
    /// * `config` - API key and base URL for the target service.
    /// * `model` - Model identifier (e.g. "gemini-1.5-flash", "gpt-4o").
    pub fn new(config: OpenAIConfig, model: String) -> Self {
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenAICompatibleGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .response_format(ResponseFormat::JsonObject)
            .messages(vec![
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.is_empty())
            .ok_or(GenerateError::EmptyReply)?;

        Ok(content)
    }
}
