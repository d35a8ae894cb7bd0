//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for the three
//! interview operations (configure, next question, evaluate) and the
//! transcription relay. It uses `utoipa` doc comments to generate OpenAPI
//! documentation.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use interview_core::{
    interviewer::InterviewError,
    session::InterviewSession,
    transcribe::TranscribeError,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    models::{
        ConfigureSessionPayload, ErrorResponse, EvaluationResponse, NextQuestionPayload,
        QuestionResponse, SessionConfigured, TranscriptionResponse,
    },
    state::AppState,
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::BadGateway(message) => {
                error!("Upstream failure: {}", message);
                (StatusCode::BAD_GATEWAY, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

/// An inconsistent step index is the caller's mistake; a transport failure
/// or malformed reply from the generation service is an upstream one.
fn map_interview_error(err: InterviewError) -> ApiError {
    match err {
        InterviewError::Session(e) => ApiError::BadRequest(e.to_string()),
        InterviewError::Generate(e) => ApiError::BadGateway(e.to_string()),
    }
}

fn map_transcribe_error(err: TranscribeError) -> ApiError {
    match err {
        TranscribeError::Rejected(message) => ApiError::BadRequest(message),
        other => ApiError::BadGateway(other.to_string()),
    }
}

fn session_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session with id '{}' not found", id))
}

/// Configure a new interview session.
#[utoipa::path(
    post,
    path = "/sessions",
    request_body = ConfigureSessionPayload,
    responses(
        (status = 201, description = "Session configured successfully", body = SessionConfigured),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn configure_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ConfigureSessionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.role.trim().is_empty() {
        return Err(ApiError::BadRequest("role must not be empty".to_string()));
    }
    if payload.topics.is_empty() || payload.topics.iter().any(|t| t.trim().is_empty()) {
        return Err(ApiError::BadRequest(
            "at least one non-empty topic is required".to_string(),
        ));
    }

    let session = InterviewSession::new(payload.role, payload.topics);
    let role = session.role.clone();
    let topics = session.topics.clone();
    let total_questions = session.total_questions();
    let session_id = state.sessions.create(session).await;

    info!(%session_id, %role, total_questions, "interview session configured");
    Ok((
        StatusCode::CREATED,
        Json(SessionConfigured {
            session_id,
            role,
            topics,
            total_questions,
        }),
    ))
}

/// Generate the next question for a step of an interview.
#[utoipa::path(
    post,
    path = "/sessions/{id}/questions",
    request_body = NextQuestionPayload,
    responses(
        (status = 200, description = "Generated feedback and question", body = QuestionResponse),
        (status = 400, description = "Inconsistent step index", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 502, description = "Generation service failed or replied unparseably", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn next_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NextQuestionPayload>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let session = state.sessions.get(id).await.ok_or_else(|| session_not_found(id))?;
    let mut session = session.lock().await;

    let reply = state
        .interviewer
        .next_question(&mut session, payload.step, &payload.answer)
        .await
        .map_err(map_interview_error)?;

    info!(%id, step = payload.step, "step processed");
    Ok(Json(QuestionResponse {
        response: reply.response,
    }))
}

/// Evaluate the full transcript of an interview.
#[utoipa::path(
    post,
    path = "/sessions/{id}/evaluation",
    responses(
        (status = 200, description = "Per-question evaluation of the transcript", body = EvaluationResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 502, description = "Generation service failed or replied unparseably", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EvaluationResponse>, ApiError> {
    let session = state.sessions.get(id).await.ok_or_else(|| session_not_found(id))?;
    let session = session.lock().await;

    let reply = state
        .interviewer
        .evaluate(&session)
        .await
        .map_err(map_interview_error)?;

    Ok(Json(EvaluationResponse {
        answers: reply.answers.into_iter().map(Into::into).collect(),
    }))
}

/// Relay an audio byte stream to the speech recognizer.
#[utoipa::path(
    post,
    path = "/transcriptions",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Best-effort transcript", body = TranscriptionResponse),
        (status = 400, description = "Malformed audio or no recognizer configured", body = ErrorResponse),
        (status = 502, description = "Recognizer unreachable", body = ErrorResponse)
    )
)]
pub async fn transcribe_audio(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let transcriber = state.transcriber.as_ref().ok_or_else(|| {
        ApiError::BadRequest("no speech recognizer endpoint is configured".to_string())
    })?;

    let text = transcriber
        .transcribe(body.to_vec())
        .await
        .map_err(map_transcribe_error)?;

    Ok(Json(TranscriptionResponse { text }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Provider};
    use async_trait::async_trait;
    use interview_core::{
        difficulty::{Difficulty, FixedDifficultyPicker},
        generator::{GenerateError, QuestionGenerator},
        interviewer::Interviewer,
        prompts::PromptLibrary,
    };
    use crate::state::SessionRegistry;
    use std::collections::HashMap;
    use tracing::Level;

    /// Returns the same canned reply for every prompt.
    struct CannedGenerator(&'static str);

    #[async_trait]
    impl QuestionGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Ok(self.0.to_string())
        }
    }

    fn library() -> PromptLibrary {
        let templates = HashMap::from([
            ("welcome".to_string(), "welcome {role}".to_string()),
            ("communication".to_string(), "comm {prior_answer}".to_string()),
            ("topic_question".to_string(), "topic {topic} {difficulty}".to_string()),
            ("conclusion".to_string(), "conclude {topics}".to_string()),
            ("evaluation".to_string(), "evaluate {questions}".to_string()),
        ]);
        PromptLibrary::new(templates).unwrap()
    }

    fn test_config() -> Config {
        Config {
            bind_address: "127.0.0.1:3000".parse().unwrap(),
            provider: Provider::Gemini,
            openai_api_key: None,
            gemini_api_key: Some("test-key".to_string()),
            chat_model: "gemini-1.5-flash".to_string(),
            log_level: Level::INFO,
            prompts_path: "./prompts".into(),
            transcriber_url: None,
        }
    }

    fn app_state(reply: &'static str) -> Arc<AppState> {
        Arc::new(AppState {
            sessions: SessionRegistry::default(),
            interviewer: Arc::new(Interviewer::new(
                library(),
                Arc::new(CannedGenerator(reply)),
                Box::new(FixedDifficultyPicker(Difficulty::Easy)),
            )),
            transcriber: None,
            config: Arc::new(test_config()),
        })
    }

    fn configure_payload() -> ConfigureSessionPayload {
        ConfigureSessionPayload {
            role: "Machine Learning".to_string(),
            topics: vec![
                "Linear Regression".to_string(),
                "Neural Network".to_string(),
            ],
        }
    }

    async fn configured_session_id(state: &Arc<AppState>) -> Uuid {
        let session = InterviewSession::new(
            "Machine Learning".to_string(),
            vec!["Linear Regression".to_string(), "Neural Network".to_string()],
        );
        state.sessions.create(session).await
    }

    #[tokio::test]
    async fn configure_session_reports_derived_total() {
        let state = app_state(r#"{"response": "q"}"#);
        let result = configure_session(State(state), Json(configure_payload())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn configure_session_rejects_empty_role() {
        let state = app_state(r#"{"response": "q"}"#);
        let payload = ConfigureSessionPayload {
            role: "  ".to_string(),
            topics: vec!["SQL".to_string()],
        };
        let err = configure_session(State(state), Json(payload))
            .await
            .err()
            .expect("empty role should be rejected");
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn configure_session_rejects_empty_topic_list() {
        let state = app_state(r#"{"response": "q"}"#);
        let payload = ConfigureSessionPayload {
            role: "Backend".to_string(),
            topics: vec![],
        };
        let err = configure_session(State(state), Json(payload))
            .await
            .err()
            .expect("empty topic list should be rejected");
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn next_question_for_unknown_session_is_not_found() {
        let state = app_state(r#"{"response": "q"}"#);
        let payload = NextQuestionPayload {
            step: 0,
            answer: String::new(),
        };
        let err = next_question(State(state), Path(Uuid::new_v4()), Json(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn next_question_returns_the_generated_reply() {
        let state = app_state(r#"{"response": "tell me about yourself"}"#);
        let id = configured_session_id(&state).await;

        let payload = NextQuestionPayload {
            step: 0,
            answer: String::new(),
        };
        let Json(reply) = next_question(State(state), Path(id), Json(payload))
            .await
            .unwrap();
        assert_eq!(reply.response, "tell me about yourself");
    }

    #[tokio::test]
    async fn out_of_sequence_step_is_a_bad_request() {
        let state = app_state(r#"{"response": "q"}"#);
        let id = configured_session_id(&state).await;

        let payload = NextQuestionPayload {
            step: 4,
            answer: "answer".to_string(),
        };
        let err = next_question(State(state), Path(id), Json(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unparseable_generation_reply_is_a_bad_gateway() {
        let state = app_state("free text, no structure");
        let id = configured_session_id(&state).await;

        let payload = NextQuestionPayload {
            step: 0,
            answer: String::new(),
        };
        let err = next_question(State(state), Path(id), Json(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadGateway(_)));
    }

    #[tokio::test]
    async fn evaluating_a_fresh_session_yields_an_empty_list() {
        let state = app_state(r#"{"answers": []}"#);
        let id = configured_session_id(&state).await;

        let Json(reply) = evaluate(State(state), Path(id)).await.unwrap();
        assert!(reply.answers.is_empty());
    }

    #[tokio::test]
    async fn transcription_without_a_recognizer_is_a_bad_request() {
        let state = app_state(r#"{"response": "q"}"#);
        let err = transcribe_audio(State(state), Bytes::from_static(b"RIFF"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
