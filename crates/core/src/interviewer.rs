//! Interview Engine
//!
//! Composes the session state machine, the prompt library, and the
//! generation client into the two operations the API exposes per session:
//! producing the next question for a step, and evaluating the finished
//! transcript.

use std::sync::Arc;

use tracing::debug;

use crate::difficulty::DifficultyPicker;
use crate::generator::{EvaluationReply, GenerateError, QuestionGenerator, QuestionReply};
use crate::prompts::PromptLibrary;
use crate::session::{InterviewSession, Phase, SessionError};

#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Drives interview steps against the external generation service.
pub struct Interviewer {
    prompts: PromptLibrary,
    generator: Arc<dyn QuestionGenerator>,
    picker: Box<dyn DifficultyPicker>,
}

impl Interviewer {
    pub fn new(
        prompts: PromptLibrary,
        generator: Arc<dyn QuestionGenerator>,
        picker: Box<dyn DifficultyPicker>,
    ) -> Self {
        Self {
            prompts,
            generator,
            picker,
        }
    }

    /// Runs one interview step.
    ///
    /// Validates the caller's step index, folds their answer into history
    /// (every step except 0), assembles the phase prompt, and dispatches it.
    /// The generated question is recorded for question-producing phases; the
    /// conclusion reply is a closing summary and is not part of the
    /// transcript.
    pub async fn next_question(
        &self,
        session: &mut InterviewSession,
        step: usize,
        answer: &str,
    ) -> Result<QuestionReply, InterviewError> {
        let phase = session.begin_step(step, answer, self.picker.as_ref())?;
        let prior = session.prior_exchange();

        let prompt = match &phase {
            Phase::Welcome => self.prompts.welcome(&session.role),
            Phase::Communication => self.prompts.communication(&session.role, prior.as_ref()),
            Phase::TopicQuestion { topic, difficulty } => self.prompts.topic_question(
                &session.role,
                topic,
                *difficulty,
                prior.as_ref(),
            ),
            Phase::Conclusion => {
                self.prompts
                    .conclusion(&session.role, &session.topics, prior.as_ref())
            }
        };

        debug!(step, phase = ?phase, "dispatching step prompt");
        let raw = self.generator.generate(&prompt).await?;
        let reply = QuestionReply::parse(&raw)?;

        if !matches!(phase, Phase::Conclusion) {
            session.record_question(&reply.response);
        }
        Ok(reply)
    }

    /// Evaluates the full transcript.
    ///
    /// With no questions asked yet there is nothing to evaluate; the result
    /// is an empty list, not an error, and no model call is made.
    pub async fn evaluate(
        &self,
        session: &InterviewSession,
    ) -> Result<EvaluationReply, InterviewError> {
        if session.asked_questions().is_empty() {
            return Ok(EvaluationReply::default());
        }

        let prompt = self.prompts.evaluation(
            &session.role,
            &session.topics,
            session.asked_questions(),
            session.given_answers(),
        );
        debug!(
            questions = session.asked_questions().len(),
            "dispatching evaluation prompt"
        );
        let raw = self.generator.generate(&prompt).await?;
        Ok(EvaluationReply::parse(&raw)?)
    }
}
