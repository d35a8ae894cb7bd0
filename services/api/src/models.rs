//! API Models
//!
//! This module defines the request and response bodies of the interview
//! service, with `utoipa` schemas for the generated OpenAPI documentation.

use interview_core::generator::EvaluationItem;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of `POST /sessions`.
#[derive(Deserialize, ToSchema)]
pub struct ConfigureSessionPayload {
    #[schema(example = "Machine Learning")]
    pub role: String,
    #[schema(example = json!(["Linear Regression", "Neural Network"]))]
    pub topics: Vec<String>,
}

/// Reply to `POST /sessions`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SessionConfigured {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub role: String,
    pub topics: Vec<String>,
    pub total_questions: usize,
}

/// Body of `POST /sessions/{id}/questions`.
///
/// `step` is the caller's position in the interview, starting at 0; the
/// answer to the previous question travels with it. Step 0 carries no
/// answer, so the field defaults to empty.
#[derive(Deserialize, ToSchema)]
pub struct NextQuestionPayload {
    #[schema(example = 0)]
    pub step: usize,
    #[serde(default)]
    #[schema(example = "I spent two years building fraud models.")]
    pub answer: String,
}

/// The generated feedback/question for one step.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct QuestionResponse {
    pub response: String,
}

/// One evaluated transcript entry.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct EvaluatedAnswer {
    pub question: String,
    pub answer: String,
    #[schema(example = "85%")]
    pub accuracy: String,
    pub improved_answer: String,
}

impl From<EvaluationItem> for EvaluatedAnswer {
    fn from(item: EvaluationItem) -> Self {
        Self {
            question: item.question,
            answer: item.answer,
            accuracy: item.accuracy,
            improved_answer: item.improved_answer,
        }
    }
}

/// Reply to `POST /sessions/{id}/evaluation`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct EvaluationResponse {
    pub answers: Vec<EvaluatedAnswer>,
}

/// Reply to `POST /transcriptions`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
