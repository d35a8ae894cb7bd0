//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and the OpenAPI documentation.

use crate::{
    handlers,
    models::{
        ConfigureSessionPayload, ErrorResponse, EvaluatedAnswer, EvaluationResponse,
        NextQuestionPayload, QuestionResponse, SessionConfigured, TranscriptionResponse,
    },
    state::AppState,
};

use axum::{Router, routing::post};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::configure_session,
        handlers::next_question,
        handlers::evaluate,
        handlers::transcribe_audio,
    ),
    components(
        schemas(
            ConfigureSessionPayload,
            SessionConfigured,
            NextQuestionPayload,
            QuestionResponse,
            EvaluatedAnswer,
            EvaluationResponse,
            TranscriptionResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Interview API", description = "Session management for the mock-interview service")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/sessions", post(handlers::configure_session))
        .route("/sessions/{id}/questions", post(handlers::next_question))
        .route("/sessions/{id}/evaluation", post(handlers::evaluate))
        .route("/transcriptions", post(handlers::transcribe_audio))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
